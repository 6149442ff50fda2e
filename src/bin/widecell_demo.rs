use std::{io, path::PathBuf, process};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use widecell::{DemoWorkflow, Result, StoreConfig, StoreContext};

#[derive(Parser, Debug)]
#[command(name = "widecell-demo")]
#[command(about = "Create a table, write greetings, read them back and delete the table")]
#[command(version)]
struct Args {
    /// JSON config file; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project id
    #[arg(long)]
    project: Option<String>,

    /// Instance id
    #[arg(long)]
    instance: Option<String>,

    /// Table id
    #[arg(short, long)]
    table: Option<String>,

    /// Column family for the greetings
    #[arg(short, long)]
    family: Option<String>,

    /// Cells kept per column by the filter stage
    #[arg(short = 'k', long)]
    cells_per_column: Option<u32>,

    /// Print store statistics after the run
    #[arg(long)]
    stats: bool,
}

impl Args {
    fn store_config(&self) -> Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::from_file(path)?,
            None => StoreConfig::default(),
        };
        if let Some(project) = &self.project {
            config.project_id = project.clone();
        }
        if let Some(instance) = &self.instance {
            config.instance_id = instance.clone();
        }
        if let Some(table) = &self.table {
            config.table_id = table.clone();
        }
        if let Some(family) = &self.family {
            config.column_family = family.clone();
        }
        if let Some(k) = self.cells_per_column {
            config.cells_per_column = k;
        }
        config.validate()?;
        Ok(config)
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.store_config()?;
    info!(
        instance = %config.instance_name(),
        table = %config.table_id,
        "starting demo"
    );

    let (ctx, store) = StoreContext::in_memory(&config);
    let report = DemoWorkflow::new(ctx, config).run(&mut io::stdout().lock())?;
    info!(
        rows_written = report.write.written.len(),
        rows_scanned = report.scanned_rows.len(),
        deleted = report.table_deleted,
        "demo finished"
    );

    if args.stats {
        println!("\n{}", store.statistics().report());
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("widecell=info,warn")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("widecell-demo: {e}");
        process::exit(1);
    }
}
