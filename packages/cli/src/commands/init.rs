use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::Page;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Pages JSON file
    #[arg(short, long, default_value = "pages.json")]
    pub pages_file: String,

    /// Page opened by default
    #[arg(short, long, default_value = "home")]
    pub default_page: String,

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

    println!("{}", "📝 Initializing Pagecraft project...".bright_blue().bold());

    let config = Config {
        pages_file: args.pages_file.clone(),
        default_page: args.default_page.clone(),
        ..Config::default()
    };

    // Create a starter pages file if it doesn't exist
    let pages_path = config.get_pages_path(cwd);
    if !pages_path.exists() {
        if let Some(parent) = pages_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let pages = vec![starter_page(&args.default_page)];
        fs::write(&pages_path, serde_json::to_string_pretty(&pages)?)?;
        println!("  {} Created {}", "✓".green(), args.pages_file);
    }

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft tree");
    println!("  2. Run: pagecraft edit move-down 0");

    Ok(())
}

fn starter_page(slug: &str) -> Page {
    let mut page = Page::new("page_1", "Home", slug);
    page.components = vec![
        json!({
            "tag": "header",
            "style": { "display": "flex", "padding": "p-4" },
            "children": [{ "tag": "h1", "content": "Welcome" }]
        }),
        json!({ "tag": "p", "content": "Start building your page." }),
    ];
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_editor::PageDocument;

    fn args() -> InitArgs {
        InitArgs {
            pages_file: "pages.json".to_string(),
            default_page: "home".to_string(),
            force: false,
        }
    }

    #[test]
    fn test_init_writes_config_and_pages() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        init(args(), &cwd).unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config, Config::default());

        let doc = PageDocument::load(config.get_pages_path(&cwd)).unwrap();
        let session = doc.open("home").unwrap();
        assert_eq!(session.forest().node_count(), 3);
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let config_path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&config_path, r#"{ "defaultPage": "shop" }"#).unwrap();

        init(args(), &cwd).unwrap();

        assert_eq!(Config::load(&cwd).unwrap().default_page, "shop");
        assert!(!dir.path().join("pages.json").exists());
    }
}
