//! proofc - propositional logic proof compiler
//!
//! Command-line interface: check, compact and typeset proof files.

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use proofc::render::title_case;
use proofc::{Compiler, LogLevel, OutputFormat, ProofcConfig, ProofcError};

#[derive(Parser)]
#[command(name = "proofc")]
#[command(author = "proofc Authors")]
#[command(version = "0.1.0")]
#[command(about = "Check, compact and typeset propositional logic proofs", long_about = None)]
struct Cli {
    /// Proof files to compile
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Directory for generated files (defaults to beside each input)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Print output instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Only check the proofs
    #[arg(long)]
    check: bool,

    /// Keep every line and its original numbering
    #[arg(long = "no-optimize")]
    no_optimize: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,

    /// List the available rules and exit
    #[arg(long = "list-rules")]
    list_rules: bool,

    /// Write a commented proofc.toml to the current directory and exit
    #[arg(long = "init-config")]
    init_config: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Canonical proof text
    Text,
    /// LaTeX proof environment
    Latex,
    /// Nested JSON for MathJax
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Latex => OutputFormat::Latex,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = ProofcConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            config.apply_env_overrides()?;
            config
        }
        None => ProofcConfig::load().context("Failed to load configuration")?,
    };
    apply_cli(&cli, &mut config);
    init_logging(config.general.log_level);
    if let Ok(effective) = config.to_toml() {
        debug!("effective configuration:\n{}", effective);
    }

    if cli.init_config {
        return init_config();
    }

    let compiler = Compiler::new(config);

    if cli.list_rules {
        list_rules(&compiler);
        return Ok(());
    }

    if cli.files.is_empty() {
        bail!("no input files");
    }

    let format = compiler.config().general.format;
    let mut status = 0;
    for path in &cli.files {
        let result = if cli.check {
            compiler.compile_file(path).map(|compiled| {
                info!(
                    "'{}' is valid ({} of {} lines needed)",
                    path.display(),
                    compiled.proof.lines.len(),
                    compiled.source_lines
                );
            })
        } else if cli.stdout {
            compiler
                .compile_file(path)
                .and_then(|compiled| compiler.render(&compiled, format))
                .map(|output| print!("{}", output))
        } else {
            compiler.compile_to_file(path, format).map(|_| ())
        };

        if let Err(e) = result {
            report(&e);
            if status == 0 {
                status = e.exit_code();
            }
        }
    }

    if status != 0 {
        process::exit(status);
    }
    Ok(())
}

/// Command-line flags take precedence over file and environment settings
fn apply_cli(cli: &Cli, config: &mut ProofcConfig) {
    if let Some(format) = cli.format {
        config.general.format = format.into();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = Some(dir.display().to_string());
    }
    if cli.no_optimize {
        config.checker.optimize = false;
    }
    if cli.quiet {
        config.general.log_level = LogLevel::Quiet;
    } else if cli.verbose {
        config.general.log_level = LogLevel::Verbose;
    }
}

fn init_logging(level: LogLevel) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.filter_directive())),
        )
        .init();
}

fn init_config() -> Result<()> {
    let path = PathBuf::from("proofc.toml");
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    fs::write(&path, ProofcConfig::default_config_content())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn list_rules(compiler: &Compiler) {
    let catalog = compiler.catalog();
    println!("Inference rules:");
    for (name, _) in catalog.iter().filter(|(_, rule)| !rule.is_equivalence()) {
        println!("  {}", title_case(name));
    }
    println!("Equivalence rules:");
    for (name, _) in catalog.iter().filter(|(_, rule)| rule.is_equivalence()) {
        println!("  {}", title_case(name));
    }
}

fn report(err: &ProofcError) {
    debug!("{}", err.to_json());
    eprintln!("{}: {}", err.category(), err);
}
