use anyhow::Result;
use clap::{Parser, Subcommand};
use ftmemo_core::config;
use ftmemo_core::engine::Engine;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;
    init_logging(cfg.debug);

    let mut engine = Engine::new(cfg)?;

    match cli.command {
        Commands::List { json } => run_list(&engine, json),
        Commands::Clear { path, json } => run_clear(&mut engine, &path, json),
        Commands::Cleanup { json } => run_cleanup(&mut engine, json),
    }
}

#[derive(Parser)]
#[command(name = "ftmemo")]
#[command(about = "Remembers manually chosen filetypes per file", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all stored filetype mappings
    List {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove the stored mapping for a path
    Clear {
        /// File whose mapping should be forgotten
        path: String,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Drop mappings whose files no longer exist
    Cleanup {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_list(engine: &Engine, json: bool) -> Result<()> {
    let entries = engine.list();
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            println!("{}\t{}", entry.path, entry.filetype);
        }
    }
    Ok(())
}

fn run_clear(engine: &mut Engine, path: &str, json: bool) -> Result<()> {
    let removed = engine.clear_path(path)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "status": "ok",
                "path": path,
                "removed": removed,
            }))?
        );
    } else if removed {
        println!("cleared mapping for {}", path);
    } else {
        println!("no mapping stored for {}", path);
    }
    Ok(())
}

fn run_cleanup(engine: &mut Engine, json: bool) -> Result<()> {
    let summary = engine.cleanup()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("removed {} stale mapping(s)", summary.removed);
    }
    Ok(())
}
