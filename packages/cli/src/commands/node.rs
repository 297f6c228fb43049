use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use mailcraft_editor::schema::{Node, NodeKind};
use serde_json::Value;

#[derive(Args, Debug)]
pub struct NodeArgs {
    /// Node kind (container, row, column, heading, text, image, button, hr)
    pub kind: String,

    /// JSON object of attribute overrides
    #[arg(short, long)]
    pub overrides: Option<String>,
}

pub fn node(args: NodeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let node = build_node(&args.kind, args.overrides.as_deref())?;

    let json = if config.pretty {
        serde_json::to_string_pretty(&node)?
    } else {
        serde_json::to_string(&node)?
    };
    println!("{}", json);

    Ok(())
}

pub fn build_node(kind: &str, overrides: Option<&str>) -> Result<Node> {
    let kind: NodeKind = kind.parse().map_err(|err: String| anyhow!(err))?;

    match overrides {
        Some(source) => {
            let overrides: Value = serde_json::from_str(source).context("Overrides are not valid JSON")?;
            Ok(Node::defaults_with(kind, &overrides)?)
        }
        None => Ok(Node::defaults(kind)),
    }
}
