use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};

use plotscript::config::RunnerConfig;
use plotscript::runner::run_script;
use plotscript::schema::{parse_figure, schema_json_pretty};
use plotscript::script::Figure;

#[derive(Parser)]
#[command(name = "plotscript")]
#[command(
    about = "Compile figure descriptions into pylab scripts",
    long_about = "Reads a JSON figure description (series, axes, legend, subplot layout), emits a matplotlib/pylab script and optionally runs it through Python to produce a PDF."
)]
struct Cli {
    /// Log verbosity level
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,
    /// Write log output to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a figure description into a script
    Compile {
        /// JSON figure description.
        #[arg(long, required = true)]
        figure: String,
        /// Write the script here instead of printing it.
        #[arg(long)]
        out: Option<String>,
    },
    /// Compile a figure description and run the script through Python
    Run {
        /// JSON figure description.
        #[arg(long, required = true)]
        figure: String,
        /// Runner configuration JSON (interpreter, script name, working directory).
        #[arg(long)]
        config: Option<String>,
        /// Python interpreter; overrides the config file.
        #[arg(long)]
        python: Option<String>,
        /// Script file name; overrides the config file.
        #[arg(long)]
        script_name: Option<String>,
    },
    /// Print the JSON Schema of figure descriptions
    Schema,
    /// Render the sine wave demo figure
    Demo {
        /// Python interpreter.
        #[arg(long)]
        python: Option<String>,
    },
}

fn load_figure(path: &str) -> Result<Figure> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read figure {}", path))?;
    parse_figure(&text).with_context(|| format!("Invalid figure description {}", path))
}

fn run_figure(figure: &Figure, config: &RunnerConfig) -> Result<ExitCode> {
    let script = figure.compile()?;
    let output = run_script(&script, config)?;
    print!("{}", output.stdout);
    if output.success() {
        info!("Saved {}", figure.output_path());
        Ok(ExitCode::SUCCESS)
    } else {
        eprint!("{}", output.stderr);
        Ok(ExitCode::FAILURE)
    }
}

fn execute(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Compile { figure, out } => {
            let script = load_figure(figure)?.compile()?;
            match out {
                Some(path) => {
                    fs::write(path, &script)
                        .with_context(|| format!("Failed to write script {}", path))?;
                    info!("Wrote script to {}", path);
                }
                None => print!("{}", script),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run {
            figure,
            config,
            python,
            script_name,
        } => {
            let runner_config = match config {
                Some(path) => RunnerConfig::load(path)?,
                None => RunnerConfig::default(),
            }
            .with_python(python.as_deref())
            .with_script_name(script_name.as_deref());
            run_figure(&load_figure(figure)?, &runner_config)
        }
        Commands::Schema => {
            println!("{}", schema_json_pretty().map_err(anyhow::Error::msg)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Demo { python } => {
            let runner_config = RunnerConfig::default().with_python(python.as_deref());
            run_figure(&Figure::demo(), &runner_config)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false);
    if let Some(ref path) = cli.log_file {
        match fs::File::create(path) {
            Ok(file) => {
                log_builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("Could not open log file '{}': {}", path, e);
                return ExitCode::FAILURE;
            }
        }
    }
    log_builder.init();

    match execute(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
