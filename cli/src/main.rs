use std::env;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ontology_discovery::builder::{UniverseBuilder, UniverseSource};
use ontology_discovery::output::{OutputFormat, format_universe};
use ontology_discovery::overlay::validate_overlay;
use ontology_discovery::walk::recursive_dir_walk;

/// Fallback ontology root when neither `--ontology-root` nor the
/// `ONTOLOGY_ROOT` environment variable is set.
const DEFAULT_ONTOLOGY_ROOT: &str = "ontology/yaml/resources";

#[derive(Debug, Parser)]
#[command(name = "universe-build")]
#[command(about = "Assemble and validate ontology universes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a universe from the default root, an overlay, or the fixture.
    Build(BuildArgs),
    /// Check a modified ontology tree against the reference tree.
    CheckOverlay(CheckOverlayArgs),
    /// List the source files discovery would feed into a build.
    ListFiles(ListFilesArgs),
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Use the in-memory simplified universe (skips all file loading).
    #[arg(long)]
    simplified: bool,
    /// Path to a modified ontology tree to build instead of the default.
    #[arg(long)]
    modified_types: Option<PathBuf>,
    /// Default ontology root (falls back to $ONTOLOGY_ROOT).
    #[arg(long)]
    ontology_root: Option<PathBuf>,
    /// Output format for the assembled universe.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct CheckOverlayArgs {
    /// Modified ontology tree to check.
    #[arg(long)]
    changed: PathBuf,
    /// Reference tree (falls back to $ONTOLOGY_ROOT).
    #[arg(long)]
    original: Option<PathBuf>,
    /// Only compare relative paths containing this text.
    #[arg(long)]
    filter: Option<String>,
    /// Report divergences as warnings instead of failing.
    #[arg(long)]
    interactive: bool,
}

#[derive(Debug, Args)]
struct ListFilesArgs {
    /// Root to walk (falls back to $ONTOLOGY_ROOT).
    #[arg(long)]
    root: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Build(args) => run_build(args),
        Command::CheckOverlay(args) => run_check_overlay(args),
        Command::ListFiles(args) => run_list_files(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Resolves the default ontology root from the flag, the environment, or
/// the built-in fallback, in that order.
fn resolve_root(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| env::var_os("ONTOLOGY_ROOT").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ONTOLOGY_ROOT))
}

fn run_build(args: BuildArgs) -> Result<(), String> {
    let builder = UniverseBuilder::new(resolve_root(args.ontology_root));
    let source = UniverseSource::from_flags(args.simplified, args.modified_types);

    let universe = builder.build(source).map_err(|err| err.to_string())?;
    let rendered = format_universe(&universe, args.format)?;
    println!("{rendered}");
    Ok(())
}

fn run_check_overlay(args: CheckOverlayArgs) -> Result<(), String> {
    let original = resolve_root(args.original);
    validate_overlay(
        args.filter.as_deref(),
        &args.changed,
        &original,
        args.interactive,
    )
    .map_err(|err| err.to_string())?;

    println!(
        "Overlay '{}' is structurally consistent with '{}'.",
        args.changed.display(),
        original.display()
    );
    Ok(())
}

fn run_list_files(args: ListFilesArgs) -> Result<(), String> {
    let root = resolve_root(args.root);
    let files = recursive_dir_walk(&root)
        .map_err(|err| format!("Failed to walk '{}': {err}", root.display()))?;

    for file in &files {
        println!("{}", file.relative.display());
    }
    println!("{} source file(s) under '{}'.", files.len(), root.display());
    Ok(())
}
