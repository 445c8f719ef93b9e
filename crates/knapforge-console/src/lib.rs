//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//! Output goes to stderr so structured results on stdout stay clean.
//!
//! ## Log Levels
//!
//! - **WARN**: Configuration files ignored by the `knapforge` facade
//! - **INFO**: Lifecycle events (solve start/end, sensitivity points)
//! - **DEBUG**: Warm start, incumbent improvements, progress every 10 000 expansions
//! - **TRACE**: Individual node expansions

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "knapforge_solver=info,knapforge=warn";

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call (of this or
/// [`init_with_filter`]) has effect. Prints the banner and reads the filter
/// from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        install(filter);
    });
}

/// Initializes the console output with explicit filter directives, such as
/// `"knapforge_solver=debug"`. No banner is printed.
pub fn init_with_filter(directives: &str) {
    INIT.get_or_init(|| install(EnvFilter::new(directives)));
}

fn install(filter: EnvFilter) {
    EPOCH.get_or_init(Instant::now);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(SolverConsoleLayer)
        .try_init();
}

// Seconds since the console was installed, shared by every solve.
// Per-solve time comes from the `duration_ms` field.
fn elapsed_secs() -> f64 {
    EPOCH.get().map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

fn print_banner() {
    let banner = r#"
 _                     __
| | ___ __   __ _ _ __ / _| ___  _ __ __ _  ___
| |/ / '_ \ / _` | '_ \ |_ / _ \| '__/ _` |/ _ \
|   <| | | | (_| | |_) |  _| (_) | | | (_| |  __/
|_|\_\_| |_|\__,_| .__/|_|  \___/|_|  \__, |\___|
                 |_|                  |___/
"#;

    let version_line = format!(
        "             v{} - Exact Branch-and-Bound Portfolio Solver\n",
        VERSION
    );

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", banner.bright_cyan());
    let _ = writeln!(stderr, "{}", version_line.bright_white().bold());
    let _ = stderr.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("knapforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    path: Option<String>,
    error: Option<String>,
    project_count: Option<u64>,
    searchable_count: Option<u64>,
    forced_count: Option<u64>,
    warm_start: Option<bool>,
    budget: Option<f64>,
    impact: Option<f64>,
    total_impact: Option<f64>,
    total_cost: Option<f64>,
    best_impact: Option<f64>,
    heuristic_impact: Option<f64>,
    marginal_impact_per_unit: Option<f64>,
    bound: Option<f64>,
    nodes_expanded: Option<u64>,
    nodes_pruned: Option<u64>,
    nodes_open: Option<u64>,
    frontier_len: Option<u64>,
    depth: Option<u64>,
    level: Option<u64>,
    selected_count: Option<u64>,
    points: Option<u64>,
    parallel: Option<bool>,
    optimal: Option<bool>,
    duration_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "status" => self.status = Some(s.trim_matches('"').to_string()),
            "path" => self.path = Some(s.trim_matches('"').to_string()),
            "error" => self.error = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "project_count" => self.project_count = Some(value),
            "searchable_count" => self.searchable_count = Some(value),
            "forced_count" => self.forced_count = Some(value),
            "nodes_expanded" => self.nodes_expanded = Some(value),
            "nodes_pruned" => self.nodes_pruned = Some(value),
            "nodes_open" => self.nodes_open = Some(value),
            "frontier_len" => self.frontier_len = Some(value),
            "depth" => self.depth = Some(value),
            "level" => self.level = Some(value),
            "selected_count" => self.selected_count = Some(value),
            "points" => self.points = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "budget" => self.budget = Some(value),
            "impact" => self.impact = Some(value),
            "total_impact" => self.total_impact = Some(value),
            "total_cost" => self.total_cost = Some(value),
            "best_impact" => self.best_impact = Some(value),
            "heuristic_impact" => self.heuristic_impact = Some(value),
            "marginal_impact_per_unit" => self.marginal_impact_per_unit = Some(value),
            "bound" => self.bound = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "warm_start" => self.warm_start = Some(value),
            "parallel" => self.parallel = Some(value),
            "optimal" => self.optimal = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "path" => self.path = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "warm_start" => format_warm_start(v),
        "new_incumbent" => format_new_incumbent(v),
        "progress" => format_progress(v),
        "expand" => format_expand(v, level),
        "sensitivity_point" => format_sensitivity_point(v),
        "sensitivity_end" => format_sensitivity_end(v),
        "config_fallback" => format_config_fallback(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    let projects = v.project_count.unwrap_or(0);
    let searchable = v.searchable_count.unwrap_or(projects);
    let forced = v.forced_count.unwrap_or(0);
    let budget = v.budget.unwrap_or(0.0);

    let mut output = format!(
        "{} {} Solving │ {} projects │ budget {} │ space {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        format_count(projects).bright_yellow(),
        format!("{budget:.2}").bright_yellow(),
        search_space(searchable).bright_magenta()
    );

    if forced > 0 {
        output.push_str(&format!(
            " │ {} forced",
            format_count(forced).bright_yellow()
        ));
    }
    if v.warm_start == Some(false) {
        output.push_str(&format!(" │ {}", "cold start".yellow()));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let is_optimal = status == "optimal";
    let impact = v.total_impact.unwrap_or(0.0);
    let cost = v.total_cost.unwrap_or(0.0);
    let expanded = v.nodes_expanded.unwrap_or(0);
    let pruned = v.nodes_pruned.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    let status_colored = if is_optimal {
        "OPTIMAL".bright_green().bold().to_string()
    } else {
        "LIMIT REACHED".bright_yellow().bold().to_string()
    };

    let mut output = format!(
        "{} {} Solving complete │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        status_colored
    );

    // Summary box
    let border = "═".repeat(58);
    output.push_str("\n\n");
    output.push_str(&format!("╔{border}╗").bright_cyan().to_string());
    output.push('\n');

    let status_text = if is_optimal {
        "PROVEN OPTIMAL SELECTION"
    } else {
        "BEST SELECTION WITHIN LIMITS"
    };
    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(status_text.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let status_text = if is_optimal {
        status_text.bright_green().bold().to_string()
    } else {
        status_text.bright_yellow().bold().to_string()
    };
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_text,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&format!("╠{border}╣").bright_cyan().to_string());
    output.push('\n');

    let mut rows = vec![
        ("Total impact:", format!("{impact:.2}")),
        ("Total cost:", format!("{cost:.2}")),
        ("Nodes expanded:", format_count(expanded)),
        ("Nodes pruned:", format_count(pruned)),
    ];
    if let Some(open) = v.nodes_open.filter(|&open| open > 0) {
        rows.push(("Left open:", format_count(open)));
    }
    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }

    output.push_str(&format!("╚{border}╝").bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_warm_start(v: &EventVisitor) -> String {
    format!(
        "{} {} Greedy warm start │ impact {}",
        format_elapsed(),
        "◆".bright_blue(),
        format_impact(v.heuristic_impact.unwrap_or(0.0))
    )
}

fn format_new_incumbent(v: &EventVisitor) -> String {
    format!(
        "{} {} New incumbent │ impact {} │ depth {} │ after {} nodes",
        format_elapsed(),
        "★".bright_yellow().bold(),
        format_impact(v.impact.unwrap_or(0.0)),
        v.depth.unwrap_or(0),
        format_count(v.nodes_expanded.unwrap_or(0)).white()
    )
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "{} {} {:>12} nodes │ frontier {:>10} │ best {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        format_count(v.nodes_expanded.unwrap_or(0)).white(),
        format_count(v.frontier_len.unwrap_or(0))
            .bright_magenta()
            .bold(),
        format_impact(v.best_impact.unwrap_or(0.0))
    )
}

fn format_expand(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    format!(
        "{} {} Level {:>4} │ bound {:>12.4}",
        format_elapsed(),
        "·".bright_black(),
        v.level.unwrap_or(0),
        v.bound.unwrap_or(0.0)
    )
    .bright_black()
    .to_string()
}

fn format_sensitivity_point(v: &EventVisitor) -> String {
    let marginal = match v.marginal_impact_per_unit {
        Some(m) if m != 0.0 => format!("{m:+.4}/unit").bright_magenta().to_string(),
        _ => "-".bright_black().to_string(),
    };

    format!(
        "{} {} Budget {:>10.2} │ impact {} │ {} selected │ {}",
        format_elapsed(),
        "◇".bright_blue(),
        v.budget.unwrap_or(0.0),
        format_impact(v.total_impact.unwrap_or(0.0)),
        v.selected_count.unwrap_or(0),
        marginal
    )
}

fn format_sensitivity_end(v: &EventVisitor) -> String {
    let mode = if v.parallel == Some(true) {
        "parallel"
    } else {
        "sequential"
    };
    let certified = if v.optimal == Some(false) {
        "some points not certified".bright_yellow().to_string()
    } else {
        "all points optimal".bright_green().to_string()
    };

    format!(
        "{} {} Sensitivity complete │ {} points │ {} │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_count(v.points.unwrap_or(0)).bright_yellow(),
        mode,
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        certified
    )
}

fn format_config_fallback(v: &EventVisitor) -> String {
    format!(
        "{} {} Ignoring {} │ {} │ using defaults",
        format_elapsed(),
        "⚠".bright_yellow().bold(),
        v.path.as_deref().unwrap_or("configuration").bright_white(),
        v.error.as_deref().unwrap_or("unreadable").yellow()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_impact(impact: f64) -> String {
    let text = format!("{impact:.2}");
    if impact > 0.0 {
        text.bright_green().to_string()
    } else {
        text.white().to_string()
    }
}

// Size of the full decision tree's leaf level.
fn search_space(project_count: u64) -> String {
    if project_count == 0 {
        return "1".to_string();
    }
    if project_count < 20 {
        return format_count(1u64 << project_count);
    }

    let log_scale = project_count as f64 * 2f64.log10();
    let exponent = log_scale.floor() as i32;
    let mantissa = 10f64.powf(log_scale - exponent as f64);

    format!("{:.3} x 10^{}", mantissa, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1_500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_search_space() {
        assert_eq!(search_space(0), "1");
        assert_eq!(search_space(4), "16");
        assert_eq!(search_space(15), "32,768");
        assert_eq!(search_space(100), "1.268 x 10^30");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("state".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::DEBUG).is_empty());
        assert!(format_event(&EventVisitor::default(), Level::INFO).is_empty());
    }

    #[test]
    fn test_expand_only_at_trace() {
        let visitor = EventVisitor {
            event: Some("expand".to_string()),
            level: Some(3),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::DEBUG).is_empty());
        assert!(format_event(&visitor, Level::TRACE).contains("Level"));
    }

    #[test]
    fn test_solve_end_summary() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            status: Some("optimal".to_string()),
            total_impact: Some(100.0),
            total_cost: Some(300.0),
            nodes_expanded: Some(12_345),
            nodes_pruned: Some(7),
            duration_ms: Some(42),
            ..Default::default()
        };
        let output = format_event(&visitor, Level::INFO);

        assert!(output.contains("OPTIMAL"));
        assert!(output.contains("100.00"));
        assert!(output.contains("12,345"));
        assert!(output.contains("42ms"));
    }

    #[test]
    fn test_solve_end_limit_reached() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            status: Some("limit reached".to_string()),
            nodes_open: Some(4_096),
            ..Default::default()
        };
        let output = format_event(&visitor, Level::INFO);

        assert!(output.contains("LIMIT REACHED"));
        assert!(output.contains("Left open:"));
        assert!(output.contains("4,096"));
    }

    #[test]
    fn test_solve_end_duration_is_per_solve() {
        let visitor = |duration_ms| EventVisitor {
            event: Some("solve_end".to_string()),
            status: Some("optimal".to_string()),
            duration_ms: Some(duration_ms),
            ..Default::default()
        };
        // interleaved solves from a parallel sweep keep their own durations
        let first = format_event(&visitor(1_500), Level::INFO);
        let _ = format_event(
            &EventVisitor {
                event: Some("solve_start".to_string()),
                ..Default::default()
            },
            Level::INFO,
        );
        let second = format_event(&visitor(250), Level::INFO);

        assert!(first.contains("1.50s"));
        assert!(second.contains("250ms"));
        assert!(!second.contains("Left open:"));
    }

    #[test]
    fn test_config_fallback() {
        let visitor = EventVisitor {
            event: Some("config_fallback".to_string()),
            path: Some("knapforge.toml".to_string()),
            error: Some("TOML parse error".to_string()),
            ..Default::default()
        };
        let output = format_event(&visitor, Level::WARN);

        assert!(output.contains("knapforge.toml"));
        assert!(output.contains("TOML parse error"));
        assert!(output.contains("using defaults"));
    }

    #[test]
    fn test_sensitivity_point() {
        let visitor = EventVisitor {
            event: Some("sensitivity_point".to_string()),
            budget: Some(200.0),
            total_impact: Some(70.0),
            selected_count: Some(1),
            marginal_impact_per_unit: Some(0.4),
            ..Default::default()
        };
        let output = format_event(&visitor, Level::INFO);

        assert!(output.contains("200.00"));
        assert!(output.contains("+0.4000/unit"));
    }
}
