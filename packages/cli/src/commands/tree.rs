use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_common::{walk_node_with_depth, DepthVisitor, Forest, Node, Path};
use pagecraft_editor::PageDocument;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Page slug (defaults to the configured page)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Also print node identities
    #[arg(long)]
    pub ids: bool,
}

pub fn tree(args: TreeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let doc = PageDocument::load(config.get_pages_path(cwd))?;
    let session = doc.open(config.page(args.page.as_deref()))?;

    println!(
        "{} {} ({} nodes)",
        "📄".bright_blue(),
        session.slug.bright_white().bold(),
        session.forest().node_count()
    );

    for row in outline(session.forest()) {
        let indent = "  ".repeat(row.path.depth().saturating_sub(1));
        let mut line = format!(
            "{}{} {}",
            indent,
            row.path.to_string().dimmed(),
            row.kind.cyan()
        );
        if let Some(text) = &row.text {
            line.push_str(&format!(" {}", format!("\"{}\"", text).green()));
        }
        if args.ids {
            line.push_str(&format!(" {}", row.id.dimmed()));
        }
        println!("{}", line);
    }

    Ok(())
}

/// One printed row of the tree
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineRow {
    pub path: Path,
    pub id: String,
    pub kind: String,
    pub text: Option<String>,
}

/// Rows of the forest in document order
pub fn outline(forest: &Forest) -> Vec<OutlineRow> {
    let mut printer = Outline::default();
    printer.visit_forest(forest);
    printer.rows
}

#[derive(Default)]
struct Outline {
    current: Vec<usize>,
    rows: Vec<OutlineRow>,
}

impl DepthVisitor for Outline {
    fn visit_node(&mut self, node: &Node, depth: usize, index: usize) {
        self.current.truncate(depth);
        self.current.push(index);
        self.rows.push(OutlineRow {
            path: Path::from(self.current.as_slice()),
            id: node.id.clone(),
            kind: node.kind.clone(),
            text: node.text().map(str::to_string),
        });
        walk_node_with_depth(self, node, depth);
    }
}
