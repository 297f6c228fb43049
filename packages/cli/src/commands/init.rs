use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailcraft_editor::schema::default_template;
use mailcraft_editor::Document;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Template directory
    #[arg(short, long, default_value = "templates")]
    pub dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Mailcraft project...".bright_blue().bold()
    );

    let config = Config {
        template_dir: args.dir.clone(),
        ..Config::default()
    };

    // Create template directory if it doesn't exist
    let template_dir = config.get_template_dir(cwd);
    if !template_dir.exists() {
        fs::create_dir_all(&template_dir)?;
        println!("  {} Created {}/", "✓".green(), args.dir);
    }

    // Seed with the default template
    let example_file = template_dir.join("default.json");
    if !example_file.exists() || args.force {
        Document::from_template(&example_file, default_template()).save_as(&example_file, config.pretty)?;
        println!("  {} Created {}/default.json", "✓".green(), args.dir);
    }

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/default.json", args.dir);
    println!("  2. Run: mailcraft validate");
    println!("  3. Run: mailcraft show {}/default.json", args.dir);

    Ok(())
}
