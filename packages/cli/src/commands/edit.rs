use crate::commands::tree::outline;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use pagecraft_common::{Forest, Path};
use pagecraft_editor::{get_at_path, DropZone, Mutation, PageDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EditOp {
    MoveUp,
    MoveDown,
    Indent,
    Outdent,
    Merge,
    Reorder,
    Delete,
    Duplicate,
    AddContainer,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Operation to apply
    #[arg(value_enum)]
    pub op: EditOp,

    /// Dotted path of the node (the parent for add-container)
    pub path: Path,

    /// Dotted path of the drop target (merge, reorder)
    pub target: Option<Path>,

    /// Drop zone for reorder (before, after)
    #[arg(short, long, default_value = "before")]
    pub zone: DropZone,

    /// Page slug (defaults to the configured page)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Print the result without saving
    #[arg(long)]
    pub dry_run: bool,
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut doc = PageDocument::load(config.get_pages_path(cwd))?;
    let mut session = doc.open(config.page(args.page.as_deref()))?;

    let mutation = plan(
        session.forest(),
        args.op,
        &args.path,
        args.target.as_ref(),
        args.zone,
    )?;

    if let Err(reason) = mutation.validate(session.forest()) {
        println!("{} {}", "⚠️  Nothing to do:".yellow(), reason);
        return Ok(());
    }

    if !session.apply(&mutation) {
        println!("{}", "⚠️  Nothing changed".yellow());
        return Ok(());
    }

    match mutation.node_id().and_then(|id| session.path_of(id)) {
        Some(path) if !matches!(mutation, Mutation::AddContainer { .. }) => {
            println!("  {} {} → {}", "✓".green(), mutation.name(), path);
        }
        _ => println!("  {} {}", "✓".green(), mutation.name()),
    }

    if args.dry_run {
        for row in outline(session.forest()) {
            let indent = "  ".repeat(row.path.depth().saturating_sub(1));
            println!("{}{} {}", indent, row.path.to_string().dimmed(), row.kind);
        }
        println!("{}", "(dry run, not saved)".dimmed());
        return Ok(());
    }

    doc.sync(&session)?;
    doc.save(config.pretty)?;
    if let Some(path) = doc.path() {
        println!("  {} Saved {}", "✓".green(), path.display());
    }

    Ok(())
}

/// Turn a path-addressed CLI edit into an identity-addressed mutation
pub fn plan(
    forest: &Forest,
    op: EditOp,
    path: &Path,
    target: Option<&Path>,
    zone: DropZone,
) -> Result<Mutation> {
    let node_id = identity_at(forest, path)?;

    let target_id = || -> Result<String> {
        let target = target.ok_or_else(|| anyhow!("A target path is required for this operation"))?;
        identity_at(forest, target)
    };

    let mutation = match op {
        EditOp::MoveUp => Mutation::MoveUp { node_id },
        EditOp::MoveDown => Mutation::MoveDown { node_id },
        EditOp::Indent => Mutation::Indent { node_id },
        EditOp::Outdent => Mutation::Outdent { node_id },
        EditOp::Merge => Mutation::Merge {
            node_id,
            target_id: target_id()?,
        },
        EditOp::Reorder => Mutation::Reorder {
            node_id,
            target_id: target_id()?,
            zone,
        },
        EditOp::Delete => Mutation::Remove { node_id },
        EditOp::Duplicate => Mutation::Duplicate { node_id },
        EditOp::AddContainer => Mutation::AddContainer { parent_id: node_id },
    };
    Ok(mutation)
}

fn identity_at(forest: &Forest, path: &Path) -> Result<String> {
    get_at_path(forest, path)
        .map(|node| node.id.clone())
        .ok_or_else(|| anyhow!("No node at path {}", path))
}
