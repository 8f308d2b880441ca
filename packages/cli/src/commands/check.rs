use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_common::{IdGenerator, Page, PageNode};
use pagecraft_editor::{denormalize_forest, normalize_forest, PageDocument};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Fail when a page is not in canonical form
    #[arg(long)]
    pub strict: bool,
}

/// Round-trip result for one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub slug: String,
    pub nodes: usize,

    /// Indices of root components whose canonical form differs from the stored one
    pub changed: Vec<usize>,
}

impl PageReport {
    pub fn is_canonical(&self) -> bool {
        self.changed.is_empty()
    }
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let pages_path = config.get_pages_path(cwd);
    let doc = PageDocument::load(&pages_path)?;

    println!("🔍 {} {}", "Checking".green().bold(), pages_path.display());
    println!();

    let reports: Vec<PageReport> = doc.pages.iter().map(check_page).collect();

    for report in &reports {
        if report.is_canonical() {
            println!("  {} {} ({} nodes)", "✓".green(), report.slug, report.nodes);
        } else {
            let changed: Vec<String> = report.changed.iter().map(usize::to_string).collect();
            println!(
                "  {} {} ({} nodes) rewritten on save: components {}",
                "⚠".yellow(),
                report.slug,
                report.nodes,
                changed.join(", ")
            );
        }
    }

    let non_canonical = reports.iter().filter(|report| !report.is_canonical()).count();

    println!();
    println!("   Pages checked: {}", reports.len());
    if non_canonical > 0 {
        println!("   {} {}", "Not canonical:".yellow(), non_canonical);
        if args.strict {
            return Err(anyhow!("{} page(s) not in canonical form", non_canonical));
        }
    }

    Ok(())
}

/// Normalize and denormalize a page, comparing each root with what is stored
pub fn check_page(page: &Page) -> PageReport {
    let mut ids = IdGenerator::new(&page.slug);
    let forest = normalize_forest(&page.components, &mut ids);
    let canonical: Vec<_> = denormalize_forest(&forest).iter().map(PageNode::to_value).collect();

    let changed = page
        .components
        .iter()
        .zip(&canonical)
        .enumerate()
        .filter(|(_, (stored, exported))| stored != exported)
        .map(|(index, _)| index)
        .collect();

    PageReport {
        slug: page.slug.clone(),
        nodes: forest.node_count(),
        changed,
    }
}
