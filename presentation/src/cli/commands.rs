//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for pipeline results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored human-readable rendering
    #[default]
    Pretty,
    /// Pretty-printed JSON envelope
    Json,
}

/// CLI arguments for eskai
#[derive(Parser, Debug)]
#[command(name = "eskai")]
#[command(author, version, about = "Six-stage reasoning pipeline over multiple LLM backends")]
#[command(long_about = r#"
ESKAI turns a free-form request into either a short conversational reply or
a fully executed, multi-step solution.

The pipeline has six stages:
1. Assessment: chat or objective, by pattern scoring and a backend vote
2. Objectives: extracted by every backend, pooled and deduplicated
3. Work plan: one step per primary objective
4. Orchestration: steps bound to agents, tools and phases
5. Execution: agents run with retries and timeouts
6. Rendering: outputs synthesized and scored against the objectives

Configuration files are loaded from (in priority order):
1. ESKAI_* environment variables
2. --config <path>     Explicit config file
3. ./eskai.toml        Project-level config
4. ~/.config/eskai/config.toml   Global config

Example:
  eskai process "Research the top three Rust web frameworks and compare them"
  eskai process --interactive
  eskai status
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a prompt through the pipeline
    Process(ProcessArgs),

    /// Probe every configured backend and print the static configuration
    Status,

    /// Write a commented configuration template
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Default)]
pub struct ProcessArgs {
    /// The request to process (not required in interactive mode)
    pub prompt: Option<String>,

    /// Start an interactive session
    #[arg(short, long)]
    pub interactive: bool,

    /// Total time budget in seconds
    #[arg(long, value_name = "SECS")]
    pub max_time: Option<u64>,

    /// Do not let agents fetch web pages
    #[arg(long)]
    pub no_internet: bool,

    /// Do not let agents run code
    #[arg(long)]
    pub no_code: bool,

    /// Also write the JSON result to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug, Default)]
pub struct InitConfigArgs {
    /// Destination (defaults to the global config path)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process() {
        let cli = Cli::parse_from([
            "eskai",
            "-vv",
            "process",
            "Compare Rust web frameworks",
            "--max-time",
            "120",
            "--no-internet",
            "--format",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        let Command::Process(args) = cli.command else {
            panic!("expected process");
        };
        assert_eq!(args.prompt.as_deref(), Some("Compare Rust web frameworks"));
        assert_eq!(args.max_time, Some(120));
        assert!(args.no_internet);
        assert!(!args.no_code);
        assert_eq!(args.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["eskai", "status", "--quiet", "--no-config"]);
        assert!(matches!(cli.command, Command::Status));
        assert!(cli.quiet);
        assert!(cli.no_config);
    }

    #[test]
    fn test_parse_init_config() {
        let cli = Cli::parse_from(["eskai", "init-config", "--output", "eskai.toml", "--force"]);
        let Command::InitConfig(args) = cli.command else {
            panic!("expected init-config");
        };
        assert_eq!(args.output, Some(PathBuf::from("eskai.toml")));
        assert!(args.force);
    }
}
