//! CLI entrypoint for eskai
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use eskai_application::{Pipeline, ProcessLimits, ToolTable};
use eskai_domain::ResultEnvelope;
use eskai_infrastructure::{
    BackendRegistry, ConfigLoader, FileConfig, FileLoggingConfig, FileOutputFormat,
    InMemoryHistory, register_builtin_tools,
};
use eskai_presentation::{
    ChatRepl, Cli, Command, ConsoleFormatter, InitConfigArgs, OutputConfig, OutputFormat,
    ProcessArgs, ReplConfig, run_prompt,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    let _log_guard = init_logging(cli.verbose, &config.logging)?;
    info!("Starting eskai");
    if !cli.no_config {
        for source in ConfigLoader::describe_sources() {
            debug!(source = %source, "Configuration source");
        }
    }

    let output = output_config(&config);
    if !output.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Command::InitConfig(args) => {
            init_config(&args)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Status => {
            let pipeline = build_pipeline(&config)?;
            let status = pipeline.status().await;
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Process(args) => {
            let pipeline = Arc::new(build_pipeline(&config)?);
            let repl = ReplConfig {
                show_progress: config.repl.show_progress && !cli.quiet,
                history_file: config
                    .repl
                    .history_file
                    .as_ref()
                    .map(PathBuf::from)
                    .or_else(ConfigLoader::default_history_path),
            };
            process(pipeline, args, &output, repl, !cli.quiet).await
        }
    }
}

/// stderr follows `-v` (or `RUST_LOG`); the optional file sink follows `[logging] level`
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let stderr_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let (file_layer, guard) = match logging.file.as_deref().map(Path::new) {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let dir = dir.unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::daily(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new(logging.level.to_lowercase()));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(guard)
}

fn output_config(config: &FileConfig) -> OutputConfig {
    OutputConfig {
        format: match config.output.format {
            FileOutputFormat::Pretty => OutputFormat::Pretty,
            FileOutputFormat::Json => OutputFormat::Json,
        },
        color: config.output.color,
    }
}

/// === Dependency Injection ===
fn build_pipeline(config: &FileConfig) -> Result<Pipeline> {
    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("config error: {error}");
        }
        bail!("Invalid configuration ({} problem(s))", errors.len());
    }

    let pool = BackendRegistry::new().build_pool(&config.providers)?;

    let mut tools = ToolTable::new();
    register_builtin_tools(&mut tools, &config.tools)?;

    Ok(Pipeline::new(Arc::new(pool), Arc::new(tools), config.pipeline_config())
        .with_history(Arc::new(InMemoryHistory::default())))
}

fn init_config(args: &InitConfigArgs) -> Result<()> {
    let path = match &args.output {
        Some(path) => path.clone(),
        None => ConfigLoader::global_config_path()
            .context("Could not determine the config directory; pass --output")?,
    };
    ConfigLoader::write_template(&path, args.force)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote configuration template to {}", path.display());
    Ok(())
}

async fn process(
    pipeline: Arc<Pipeline>,
    args: ProcessArgs,
    output: &OutputConfig,
    repl: ReplConfig,
    show_progress: bool,
) -> Result<ExitCode> {
    let format = output.resolve_format(args.format);

    let mut limits = ProcessLimits::new();
    if let Some(secs) = args.max_time {
        limits = limits.with_max_execution_time(Duration::from_secs(secs));
    }
    if args.no_internet {
        limits = limits.without_internet();
    }
    if args.no_code {
        limits = limits.without_code_execution();
    }

    if args.interactive {
        let mut chat = ChatRepl::new(pipeline, limits)
            .with_format(format)
            .with_config(repl);
        chat.run().await?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(prompt) = args.prompt else {
        bail!("A prompt is required. Use --interactive for an interactive session.");
    };

    let envelope = run_prompt(&pipeline, &prompt, limits, show_progress).await;

    match format {
        OutputFormat::Pretty => println!("{}", ConsoleFormatter::format(&envelope)),
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&envelope)),
    }
    if let Some(path) = &args.output {
        write_json(path, &envelope)?;
    }

    Ok(if envelope.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn write_json(path: &Path, envelope: &ResultEnvelope) -> Result<()> {
    std::fs::write(path, ConsoleFormatter::format_json(envelope))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Result written");
    Ok(())
}
