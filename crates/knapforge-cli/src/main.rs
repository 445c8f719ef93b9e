use std::io::{self, Write};
use std::process;

use clap::Parser;
use knapforge_cli::{exitcode, output, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Completions { .. }) {
        knapforge_console::init_with_filter(cli.log_filter());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = knapforge_cli::execute(&cli, &mut out).and_then(|()| Ok(out.flush()?));

    match result {
        Ok(()) => process::exit(exitcode::OK),
        Err(e) => {
            output::error(&e);
            process::exit(e.exit_code());
        }
    }
}
