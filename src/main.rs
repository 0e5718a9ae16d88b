use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use std::fs;
use std::io;
use std::path::PathBuf;

use cppgen::error::{DiagnosticError, ModelError};
use cppgen::{GenerationUnit, ModelArena};

#[derive(Parser)]
#[command(name = "cppgen")]
#[command(author, version, about = "Emit C++ expressions from a JSON model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit every expression of a model as C++ text
    Emit {
        /// The JSON model file
        input: PathBuf,

        /// Write the expressions to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Also print the dependencies of the unit
        #[arg(long)]
        deps: bool,
    },

    /// Print the declarations the model's expressions depend on
    Deps {
        /// The JSON model file
        input: PathBuf,
    },

    /// Load and validate a model without emitting anything
    Check {
        /// The JSON model file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over the verbose flag
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let result = match cli.command {
        Commands::Emit {
            input,
            output,
            deps,
        } => emit(input, output, deps),
        Commands::Deps { input } => print_deps(input),
        Commands::Check { input } => check(input),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Model source kept around for diagnostics
struct ModelState {
    source: String,
    files: SimpleFiles<String, String>,
    file_id: usize,
}

impl ModelState {
    fn new(input: PathBuf) -> Result<Self> {
        let source = fs::read_to_string(&input)
            .with_context(|| format!("Failed to read model file: {:?}", input))?;

        let mut files = SimpleFiles::new();
        let file_id = files.add(input.display().to_string(), source.clone());

        Ok(Self {
            source,
            files,
            file_id,
        })
    }

    fn report_error(&self, diagnostic: &Diagnostic<usize>) -> Result<()> {
        let writer = StandardStream::stderr(ColorChoice::Always);
        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, diagnostic)?;
        Ok(())
    }

    fn load(&self) -> Result<ModelArena> {
        log::debug!("Loading model");
        match ModelArena::from_json(&self.source) {
            Ok(arena) => Ok(arena),
            Err(e @ ModelError::Json { .. }) => {
                let diagnostic = DiagnosticError::new(e.into(), self.file_id).to_diagnostic();
                self.report_error(&diagnostic)?;
                anyhow::bail!("Model parsing failed");
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn emit(input: PathBuf, output: Option<PathBuf>, print_deps: bool) -> Result<()> {
    log::info!("Emitting {:?}", input);

    let state = ModelState::new(input)?;
    let arena = state.load()?;
    let exprs = arena.build()?;

    let mut unit = GenerationUnit::new();
    unit.add_all(&exprs);

    match output {
        Some(path) => {
            log::debug!("Writing expressions to {:?}", path);
            let file = fs::File::create(&path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            unit.write_into(io::BufWriter::new(file))
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("{}: Wrote {:?}", "success".green().bold(), path);
        }
        None => {
            let stdout = io::stdout();
            unit.write_into(stdout.lock())
                .context("Failed to write to stdout")?;
        }
    }

    if print_deps {
        println!("{}", "=== Dependencies ===".blue().bold());
        for dep in unit.dependencies().iter() {
            println!("  {}", dep);
        }
    }

    for error in unit.errors().errors() {
        eprintln!("{}: {}", "error".red().bold(), error);
    }
    if unit.errors().has_errors() {
        anyhow::bail!("{} expression(s) failed", unit.errors().error_count());
    }

    Ok(())
}

fn print_deps(input: PathBuf) -> Result<()> {
    log::info!("Collecting dependencies of {:?}", input);

    let state = ModelState::new(input)?;
    let arena = state.load()?;
    let exprs = arena.build()?;

    let mut unit = GenerationUnit::new();
    if !unit.add_all(&exprs) {
        anyhow::bail!("{} expression(s) failed", unit.errors().error_count());
    }

    for dep in unit.dependencies().iter() {
        println!("{}", dep);
    }
    Ok(())
}

fn check(input: PathBuf) -> Result<()> {
    log::info!("Checking {:?}", input);

    let state = ModelState::new(input)?;
    let arena = state.load()?;
    let exprs = arena.build()?;

    println!(
        "{}: {} expression(s), no errors found",
        "success".green().bold(),
        exprs.len()
    );
    Ok(())
}
