//! Catalog loading from JSON and TOML files.

use std::path::Path;

use knapforge_core::portfolio::retention_portfolio;
use knapforge_core::{Project, ProjectCatalog};
use serde::Deserialize;

use crate::error::{CliError, CliResult};

/// Accepted JSON layouts: a bare array or a `projects` table.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    List(Vec<Project>),
    Table { projects: Vec<Project> },
}

#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    projects: Vec<Project>,
}

/// Loads and validates the catalog at `path`, or the built-in retention
/// portfolio when no path is given.
pub fn load_catalog(path: Option<&Path>) -> CliResult<ProjectCatalog> {
    let projects = match path {
        Some(path) => read_projects(path)?,
        None => retention_portfolio(),
    };
    Ok(ProjectCatalog::new(projects)?)
}

/// Reads projects from a `.json` or `.toml` file.
pub fn read_projects(path: &Path) -> CliResult<Vec<Project>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let parse: fn(&str) -> Result<Vec<Project>, String> = match extension.as_deref() {
        Some("json") => parse_json,
        Some("toml") => parse_toml,
        _ => {
            return Err(CliError::Usage(format!(
                "{}: catalog must be a .json or .toml file",
                path.display()
            )))
        }
    };

    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents).map_err(|message| CliError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parses a JSON catalog.
pub fn parse_json(contents: &str) -> Result<Vec<Project>, String> {
    match serde_json::from_str(contents).map_err(|e| e.to_string())? {
        JsonCatalog::List(projects) | JsonCatalog::Table { projects } => Ok(projects),
    }
}

/// Parses a TOML catalog made of `[[projects]]` tables.
pub fn parse_toml(contents: &str) -> Result<Vec<Project>, String> {
    let catalog: TomlCatalog = toml::from_str(contents).map_err(|e| e.to_string())?;
    Ok(catalog.projects)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_list_and_table() {
        let list = r#"[{"id": "a", "cost": 10, "impact": 2.5}]"#;
        let table = r#"{"projects": [{"id": "a", "name": "Alpha", "cost": 10, "impact": 2.5}]}"#;

        let from_list = parse_json(list).unwrap();
        let from_table = parse_json(table).unwrap();

        assert_eq!(from_list[0].id().as_str(), "a");
        assert_eq!(from_list[0].cost(), 10.0);
        assert_eq!(from_table[0].name(), Some("Alpha"));
    }

    #[test]
    fn test_toml_projects() {
        let contents = r#"
[[projects]]
id = "mentoring"
category = "Growth"
cost = 40.0
impact = 10.0

[[projects]]
id = "wellness"
cost = 55.0
impact = 11.0
"#;
        let projects = parse_toml(contents).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].category(), Some("Growth"));
        assert_eq!(projects[1].impact(), 11.0);
    }

    #[test]
    fn test_malformed_input() {
        assert!(parse_json(r#"[{"id": "a", "cost": 10}]"#).is_err());
        assert!(parse_toml("projects = 3").is_err());
    }

    #[test]
    fn test_default_catalog_is_retention_portfolio() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog.len(), 15);
    }
}
