use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mailcraft_editor::schema::{Template, ValidationError};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Template file or directory (defaults to the configured template directory)
    pub input: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Outcome of checking one file
#[derive(Debug)]
pub enum FileReport {
    Valid { path: PathBuf, nodes: usize },
    Invalid { path: PathBuf, reason: Reason },
}

#[derive(Debug)]
pub enum Reason {
    Io(String),
    Json(String),
    Schema(ValidationError),
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        matches!(self, FileReport::Valid { .. })
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            FileReport::Valid { path, nodes } => json!({
                "file": path.display().to_string(),
                "valid": true,
                "nodes": nodes,
            }),
            FileReport::Invalid { path, reason } => {
                let error = match reason {
                    Reason::Io(message) => json!({ "kind": "io", "message": message }),
                    Reason::Json(message) => json!({ "kind": "json", "message": message }),
                    Reason::Schema(err) => json!({
                        "kind": "schema",
                        "path": err.path.as_str(),
                        "expected": err.expected,
                        "found": err.found,
                    }),
                };
                json!({
                    "file": path.display().to_string(),
                    "valid": false,
                    "error": error,
                })
            }
        }
    }
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let input = match args.input {
        Some(input) => input,
        None => Config::load(cwd)?.get_template_dir(cwd),
    };

    let files = if input.is_file() {
        vec![input.clone()]
    } else if input.is_dir() {
        find_template_files(&input)
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    let reports: Vec<FileReport> = files.iter().map(|file| check_file(file)).collect();
    let failures = reports.iter().filter(|report| !report.is_valid()).count();

    if args.format == "json" {
        let json: Vec<_> = reports.iter().map(FileReport::to_json).collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print_text(&input, &reports);
    }

    if failures > 0 {
        return Err(anyhow!("{} of {} file(s) failed validation", failures, reports.len()));
    }

    Ok(())
}

pub fn check_file(path: &Path) -> FileReport {
    let invalid = |reason: Reason| FileReport::Invalid {
        path: path.to_path_buf(),
        reason,
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => return invalid(Reason::Io(err.to_string())),
    };

    let value: serde_json::Value = match serde_json::from_str(&source) {
        Ok(value) => value,
        Err(err) => return invalid(Reason::Json(err.to_string())),
    };

    match Template::validate(&value) {
        Ok(template) => FileReport::Valid {
            path: path.to_path_buf(),
            nodes: template.node_count(),
        },
        Err(err) => invalid(Reason::Schema(err)),
    }
}

fn print_text(input: &Path, reports: &[FileReport]) {
    println!("🔍 {} Mailcraft validator", "Starting".green().bold());
    println!("   Input: {}", input.display());
    println!();

    for report in reports {
        match report {
            FileReport::Valid { path, nodes } => {
                println!("  {} {} ({} nodes)", "✓".green(), path.display(), nodes);
            }
            FileReport::Invalid { path, reason } => {
                let message = match reason {
                    Reason::Io(message) | Reason::Json(message) => message.clone(),
                    Reason::Schema(err) => err.to_string(),
                };
                println!("  {} {}", "✗".red(), path.display());
                println!("    {}", message.dimmed());
            }
        }
    }

    let failures = reports.iter().filter(|report| !report.is_valid()).count();
    println!();
    println!(
        "✨ {} Validation complete!",
        if failures > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", reports.len());
    if failures > 0 {
        println!("   {} {}", "Invalid:".red(), failures);
    } else {
        println!("   {} All templates valid!", "✓".green());
    }
}

fn find_template_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_editor::schema::default_template;
    use tempfile::TempDir;

    fn write_fixture(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string(&default_template()).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_check_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "ok.json");

        match check_file(&path) {
            FileReport::Valid { nodes, .. } => assert_eq!(nodes, default_template().node_count()),
            other => panic!("Expected valid report, got {:?}", other),
        }
    }

    #[test]
    fn test_check_reports_schema_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "title": "t", "preview": "p", "font": { "family": 1 }, "container": {} }"#).unwrap();

        match check_file(&path) {
            FileReport::Invalid {
                reason: Reason::Schema(err),
                ..
            } => assert_eq!(err.path.as_str(), "font.family"),
            other => panic!("Expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_check_reports_broken_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            check_file(&path),
            FileReport::Invalid {
                reason: Reason::Json(_),
                ..
            }
        ));
    }

    #[test]
    fn test_directory_with_failure_errors() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), "a.json");
        fs::write(dir.path().join("b.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(find_template_files(dir.path()).len(), 2);

        let result = validate(
            ValidateArgs {
                input: Some(dir.path().to_path_buf()),
                format: "json".to_string(),
            },
            &dir.path().display().to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_to_configured_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("templates")).unwrap();
        write_fixture(&dir.path().join("templates"), "welcome.json");

        let result = validate(
            ValidateArgs {
                input: None,
                format: "text".to_string(),
            },
            &dir.path().display().to_string(),
        );
        assert!(result.is_ok());
    }
}
