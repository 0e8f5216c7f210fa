// Thu Aug 06 2026 - Alex

use anyhow::bail;
use clap::Parser;
use colored::Colorize;
use script_sandbox::engine::{self, register_builtins, BuiltinScripts, HostEngine};
use script_sandbox::utils::logging;
use script_sandbox::{trace, RunnerConfig, Sandbox};
use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Sandboxed script runner", long_about = None)]
struct Args {
    /// Script file to run
    script: Option<PathBuf>,

    /// Evaluate the given source instead of reading a file
    #[arg(short, long)]
    eval: Option<String>,

    /// Filename used in error messages and traces
    #[arg(long)]
    filename: Option<String>,

    /// JSON object seeding the sandbox; the script runs in a new context
    /// and the sandbox is written back after the run
    #[arg(short, long)]
    sandbox: Option<String>,

    /// Runner configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// List built-in script sources and exit
    #[arg(long)]
    list: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };

    setup_logging(&args, &config);

    let host = Arc::new(HostEngine::new());
    register_builtins(&host);
    engine::install(host);

    if args.list {
        for (source, description) in BuiltinScripts::list() {
            println!("{:<20} {}", source.cyan(), description);
        }
        return Ok(());
    }

    let (source, default_name) = if let Some(eval) = &args.eval {
        (eval.clone(), "[eval]".to_string())
    } else if let Some(path) = &args.script {
        (fs::read_to_string(path)?, path.display().to_string())
    } else {
        bail!("nothing to run: pass a script file or --eval (see --list)");
    };
    let filename = args.filename.clone().unwrap_or(default_name);

    let sandbox = load_sandbox(&args, &config)?;

    match sandbox {
        Some(mut sandbox) => {
            let result = script_sandbox::script::run_in_new_context(
                &source,
                Some(&mut sandbox),
                &filename,
            )?;
            println!("{} {}", "[+]".green(), result);
            if config.print_sandbox {
                println!("{}", serde_json::to_string_pretty(&sandbox.to_json())?);
            }
        }
        None => {
            let result = script_sandbox::script::run_in_this_context(&source, &filename)?;
            println!("{} {}", "[+]".green(), result);
        }
    }

    Ok(())
}

fn setup_logging(args: &Args, config: &RunnerConfig) {
    if std::env::var_os("RUST_LOG").is_some() {
        logging::init_from_env();
        return;
    }

    let level = if args.verbose || trace::enabled() {
        log::LevelFilter::Debug
    } else {
        logging::level_from_str(&config.log_level)
    };
    logging::init_logger(level);
}

fn load_sandbox(args: &Args, config: &RunnerConfig) -> anyhow::Result<Option<Sandbox>> {
    let json = if let Some(inline) = &args.sandbox {
        inline.clone()
    } else if let Some(path) = &config.sandbox_file {
        fs::read_to_string(path)?
    } else {
        return Ok(None);
    };

    let value: serde_json::Value = serde_json::from_str(&json)?;
    if !value.is_object() {
        bail!("sandbox must be a JSON object");
    }
    Ok(Some(Sandbox::from_json(&value)))
}
