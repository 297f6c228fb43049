use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use mailcraft_editor::{Document, Mutation, UndoStack};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Template file to edit
    pub file: PathBuf,

    /// JSON file holding an array of mutations
    pub mutations: PathBuf,

    /// Write the result here instead of over the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Check the mutations without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut doc = Document::load(&args.file)?;

    let source = fs::read_to_string(&args.mutations)
        .with_context(|| format!("Cannot read {}", args.mutations.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid mutation list in {}", args.mutations.display()))?;

    let applied = apply_all(&mut doc, &mutations, config.undo_levels)?;

    for mutation in &mutations {
        println!("  {} {}", "✓".green(), mutation.label());
    }

    if args.dry_run {
        println!();
        println!("{} {} mutation(s) would apply cleanly", "Dry run:".yellow().bold(), applied);
        return Ok(());
    }

    let output = args.output.unwrap_or(args.file);
    doc.save_as(&output, config.pretty)?;

    println!();
    println!("✨ {} Applied {} mutation(s) → {}", "Done".green().bold(), applied, output.display());
    Ok(())
}

/// Apply every mutation as one undo step. Any failure rolls the document
/// back to where it started.
pub fn apply_all(doc: &mut Document, mutations: &[Mutation], undo_levels: usize) -> Result<usize> {
    let mut stack = UndoStack::with_max_levels(undo_levels);
    stack.begin_batch();
    stack.set_batch_description(format!("Apply {} mutation(s)", mutations.len()));

    for (i, mutation) in mutations.iter().enumerate() {
        if let Err(err) = stack.apply(mutation, doc) {
            stack.abort_batch(doc);
            return Err(err).with_context(|| format!("Mutation #{} ({}) failed", i + 1, mutation.label()));
        }
    }

    stack.end_batch(doc);
    debug!(count = mutations.len(), version = doc.version, "Applied mutation batch");
    Ok(mutations.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_editor::schema::default_template;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_apply_writes_output() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();
        let file = dir.path().join("digest.json");
        let mutations = dir.path().join("edits.json");
        let output = dir.path().join("out.json");

        Document::from_template(&file, default_template()).save_as(&file, true).unwrap();
        fs::write(
            &mutations,
            json!([
                { "RemoveNode": { "node_id": "row-footer" } },
                { "UpdateTemplate": { "patch": { "title": "Digest" } } }
            ])
            .to_string(),
        )
        .unwrap();

        apply(
            ApplyArgs {
                file: file.clone(),
                mutations,
                output: Some(output.clone()),
                dry_run: false,
            },
            &cwd,
        )
        .unwrap();

        let result = Document::load(&output).unwrap();
        assert_eq!(result.template().title, "Digest");
        assert!(result.template().find("row-footer").is_none());

        // Input untouched
        assert_eq!(Document::load(&file).unwrap().template(), &default_template());
    }

    #[test]
    fn test_failure_rolls_back_everything() {
        let mut doc = Document::from_template("digest.json", default_template());
        let mutations = vec![
            Mutation::RemoveNode {
                node_id: "row-logo".to_string(),
            },
            Mutation::RemoveNode {
                node_id: "container-1".to_string(),
            },
        ];

        let err = apply_all(&mut doc, &mutations, 10).unwrap_err();
        assert!(format!("{:#}", err).contains("Mutation #2"));
        assert_eq!(doc.template(), &default_template());
    }

    #[test]
    fn test_dry_run_leaves_file() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();
        let file = dir.path().join("digest.json");
        let mutations = dir.path().join("edits.json");

        Document::from_template(&file, default_template()).save_as(&file, false).unwrap();
        let before = fs::read_to_string(&file).unwrap();
        fs::write(&mutations, r#"[{ "DuplicateNode": { "node_id": "row-cta" } }]"#).unwrap();

        apply(
            ApplyArgs {
                file: file.clone(),
                mutations,
                output: None,
                dry_run: true,
            },
            &cwd,
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), before);
    }
}
