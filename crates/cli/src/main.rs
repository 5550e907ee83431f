use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use triage_classifier::{default_rules, CompiledRules, RuleSet};
use triage_pipeline::{
    classify_directory, inventory_directory, plan, summarize, write_report, ClassifyOptions,
};

mod flags;

use flags::OnExistsFlag;

#[derive(Parser)]
#[command(name = "doctriage")]
#[command(about = "Sort office documents into EDB / NDC / OTHERS", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML rule-set override (defaults compiled in)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the .docx files of a directory and file copies into buckets
    Classify(ClassifyArgs),

    /// Copy pdf/doc/docx out of a raw directory and write an inventory CSV
    Inventory(InventoryArgs),

    /// Keep one copy per document (docx > doc > pdf, then newest)
    Dedupe(DedupeArgs),
}

#[derive(Args)]
struct ClassifyArgs {
    /// Input directory
    input: PathBuf,

    /// Output directory (default: `classified` next to the input)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Report CSV path (default: `classify_report.csv` next to the input)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Walk subdirectories of the input
    #[arg(long)]
    recursive: bool,

    /// What to do when a bucket copy already exists
    #[arg(long, value_enum, default_value_t = OnExistsFlag::Skip)]
    on_exists: OnExistsFlag,

    /// Save each extracted first page under `<out>/_debug_first_pages`
    #[arg(long)]
    debug_first_pages: bool,

    /// Maximum documents in flight (default: available parallelism)
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Args)]
struct InventoryArgs {
    /// Raw directory to inventory
    raw: PathBuf,

    /// Report CSV path (default: `raw_inventory.csv` next to the raw directory)
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Args)]
struct DedupeArgs {
    /// Flat directory of pdf/doc/docx files
    source: PathBuf,

    /// Report CSV path (default: `dedupe_report.csv` next to the source)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the plan report without copying anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let rules = Arc::new(load_rules(cli.rules.as_deref())?);

    match cli.command {
        Commands::Classify(args) => run_classify(args, rules).await?,
        Commands::Inventory(args) => run_inventory(args)?,
        Commands::Dedupe(args) => run_dedupe(args)?,
    }

    Ok(())
}

fn load_rules(path: Option<&Path>) -> Result<CompiledRules> {
    let Some(path) = path else {
        return Ok(default_rules().clone());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read rule set {}", path.display()))?;
    let rules: RuleSet = toml::from_str(&text).context("invalid rule set")?;
    Ok(rules.compile()?)
}

/// Directory the defaults hang off: the parent of the processed directory,
/// so outputs land next to it rather than inside it.
fn sibling_base(dir: &Path) -> PathBuf {
    dir.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf())
}

async fn run_classify(args: ClassifyArgs, rules: Arc<CompiledRules>) -> Result<()> {
    let input = args.input.canonicalize().context("invalid input directory")?;
    let base = sibling_base(&input);
    let out = args.out.unwrap_or_else(|| base.join("classified"));
    let report = args.report.unwrap_or_else(|| base.join("classify_report.csv"));

    let mut options = ClassifyOptions::new(&input, &out);
    options.recursive = args.recursive;
    options.on_exists = args.on_exists.as_domain();
    options.debug_first_pages = args.debug_first_pages;
    if let Some(jobs) = args.jobs {
        options.concurrency = jobs.max(1);
    }

    let outcomes = classify_directory(rules, Arc::new(options)).await?;
    write_report(&report, &outcomes)?;

    for (category, count) in summarize(&outcomes) {
        log::info!("{category}: {count} document(s)");
    }
    println!(
        "classified {} document(s) into {}",
        outcomes.len(),
        out.display()
    );
    println!("report: {}", report.display());
    Ok(())
}

fn run_inventory(args: InventoryArgs) -> Result<()> {
    let raw = args.raw.canonicalize().context("invalid raw directory")?;
    let report = args
        .report
        .unwrap_or_else(|| sibling_base(&raw).join("raw_inventory.csv"));

    let summary = inventory_directory(&raw, &report)?;
    println!(
        "kept {} file(s) in {}, ignored {}",
        summary.kept,
        summary.target_dir.display(),
        summary.ignored
    );
    println!("report: {}", report.display());
    Ok(())
}

fn run_dedupe(args: DedupeArgs) -> Result<()> {
    let source = args
        .source
        .canonicalize()
        .context("invalid source directory")?;
    let report = args
        .report
        .unwrap_or_else(|| sibling_base(&source).join("dedupe_report.csv"));

    let plan = plan(&source)?;
    plan.write_report(&report)?;
    println!("report: {}", report.display());

    if args.dry_run {
        println!(
            "dry run: {} file(s) would be copied to {}",
            plan.keepers().count(),
            plan.dedupe_dir.display()
        );
    } else {
        let copied = plan.execute()?;
        println!("copied {copied} file(s) to {}", plan.dedupe_dir.display());
    }
    Ok(())
}
