use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mailcraft_editor::schema::visitor::{KindCounter, Visitor};
use mailcraft_editor::schema::{Element, NodeRef, Template};
use mailcraft_editor::Document;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Template file
    pub file: PathBuf,

    /// Print only the node with this id, as JSON
    #[arg(long)]
    pub id: Option<String>,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let doc = Document::load(&args.file)?;
    let template = doc.template();

    match args.id {
        Some(id) => {
            let node = template
                .find(&id)
                .ok_or_else(|| anyhow!("No node with id `{}` in {}", id, args.file.display()))?;
            let json = if config.pretty {
                serde_json::to_string_pretty(&node)?
            } else {
                serde_json::to_string(&node)?
            };
            println!("{}", json);
        }
        None => {
            print!("{}", outline(template));

            let mut counter = KindCounter::default();
            counter.visit_template(template);
            let summary: Vec<String> = counter
                .counts
                .iter()
                .map(|(kind, count)| format!("{} {}", count, kind))
                .collect();
            println!();
            println!("   {} nodes: {}", counter.total(), summary.join(", ").dimmed());
        }
    }

    Ok(())
}

/// Indented tree of the template, one node per line
pub fn outline(template: &Template) -> String {
    let mut out = format!(
        "{} {} {}\n",
        template.title.bold(),
        format!("({})", template.preview).dimmed(),
        format!("[{}]", template.font.stack()).dimmed()
    );

    for (location, node) in template.nodes() {
        let label = label(&node).map(|l| format!(" {}", l.dimmed())).unwrap_or_default();
        out.push_str(&format!(
            "{}{} {}{}\n",
            "  ".repeat(location.depth() + 1),
            node.kind().as_str().cyan(),
            node.id(),
            label
        ));
    }

    out
}

fn label(node: &NodeRef<'_>) -> Option<String> {
    let text = match node {
        NodeRef::Container(_) => return None,
        NodeRef::Row(row) => format!("\"{}\" [{}]", row.attrs.title, row.attrs.columns),
        NodeRef::Column(column) => format!("\"{}\" {}", column.attrs.title, column.attrs.width),
        NodeRef::Element(element) => match element {
            Element::Heading(heading) => format!("{} \"{}\"", heading.attrs.level, heading.attrs.text),
            Element::Text(text) => format!("\"{}\"", truncate(&text.attrs.html, 40)),
            Element::Image(image) => image.attrs.src.clone(),
            Element::Button(button) => format!("\"{}\" → {}", button.attrs.text, button.attrs.href),
            Element::Divider(divider) => divider.attrs.width.clone(),
        },
    };
    Some(text)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}…", head)
    } else {
        text.to_string()
    }
}
