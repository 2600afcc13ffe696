//! Command line front end for schema-driven adaptive form trees.
//!
//! Loads a form schema, applies branch selections and field input given on
//! the command line, and prints the aggregated descriptive line to stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::debug;
use treeform::{FieldKind, FormSession};

#[derive(Parser)]
#[command(
    name = "formtool",
    version,
    about = "Compose descriptive lines from adaptive form schemas"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a schema, apply selections and field input, print the line.
    Render {
        /// Schema file (.json or .toml).
        schema: PathBuf,
        /// Branch selection path, e.g. `--pick "Issue.In class"`.
        /// Every dot segment is selected in turn, starting at the root.
        #[arg(long = "pick", value_name = "PATH")]
        picks: Vec<String>,
        /// Field input, e.g. `--set Issue.issue_number=42`. The last dot
        /// separates the field name from its node path. Text fields replace
        /// their text; file list fields append one path per occurrence.
        #[arg(long = "set", value_name = "PATH=VALUE")]
        sets: Vec<String>,
    },
    /// Validate that a schema file loads.
    Check {
        /// Schema file (.json or .toml).
        schema: PathBuf,
    },
    /// List the registered field kinds.
    Kinds,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            schema,
            picks,
            sets,
        } => render(&schema, &picks, &sets),
        Command::Check { schema } => check(&schema),
        Command::Kinds => {
            for kind in FieldKind::KINDS {
                println!("{kind}");
            }
            Ok(())
        }
    }
}

fn render(schema: &Path, picks: &[String], sets: &[String]) -> Result<()> {
    let mut session = FormSession::new();
    session.load_path(schema)?;

    let root = session
        .root_mut()
        .context("schema loaded but no tree installed")?;
    for pick in picks {
        root.select_path(pick)
            .with_context(|| format!("applying --pick {pick:?}"))?;
    }
    for set in sets {
        let (target, value) = split_set(set)?;
        let (node_path, field_name) = split_field(target);
        let node = root
            .get_mut_by_path(node_path)
            .with_context(|| format!("no node at path {node_path:?}"))?;
        let field = node
            .field_mut(field_name)
            .with_context(|| format!("no field `{field_name}` at path {node_path:?}"))?;
        field.apply_input(value);
        debug!("set {target} = {value:?}");
    }

    println!("{}", session.output().unwrap_or_default());
    Ok(())
}

fn check(schema: &Path) -> Result<()> {
    let mut session = FormSession::new();
    session.load_path(schema)?;
    println!("OK: {}", schema.display());
    Ok(())
}

/// Split a `--set` argument into target and value at its first `=`.
fn split_set(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((target, value)) if !target.is_empty() => Ok((target, value)),
        _ => bail!("--set expects PATH=VALUE, got {arg:?}"),
    }
}

/// Split a field target into node path and field name at the last `.`.
///
/// A target without a dot names a field on the root node.
fn split_field(target: &str) -> (&str, &str) {
    match target.rsplit_once('.') {
        Some((path, field)) => (path, field),
        None => ("", target),
    }
}
