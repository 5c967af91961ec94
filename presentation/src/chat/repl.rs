//! REPL (Read-Eval-Print Loop) for interactive sessions

use crate::cli::commands::OutputFormat;
use crate::config::ReplConfig;
use crate::runner::run_prompt;
use crate::ConsoleFormatter;
use colored::Colorize;
use eskai_application::{Pipeline, ProcessLimits};
use eskai_domain::ResultEnvelope;
use eskai_domain::core::string::truncate_bytes;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;

/// Previous turn carried into classification, in bytes
const CONTEXT_LIMIT: usize = 2000;

/// Number of runs shown by `history`
const HISTORY_LIMIT: usize = 10;

/// A line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Status,
    History,
    Exit,
    Unknown(String),
    Prompt(String),
}

impl ReplCommand {
    /// Parse a non-empty, trimmed line; a leading `/` is optional on commands
    pub fn parse(line: &str) -> Self {
        let word = line.strip_prefix('/').unwrap_or(line);
        match word {
            "help" | "h" | "?" => ReplCommand::Help,
            "status" => ReplCommand::Status,
            "history" => ReplCommand::History,
            "exit" | "quit" | "q" => ReplCommand::Exit,
            _ if line.starts_with('/') => ReplCommand::Unknown(line.to_string()),
            _ => ReplCommand::Prompt(line.to_string()),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    pipeline: Arc<Pipeline>,
    limits: ProcessLimits,
    format: OutputFormat,
    config: ReplConfig,
    /// Last prompt and chat reply, passed as context to the next run
    context: Option<String>,
}

impl ChatRepl {
    pub fn new(pipeline: Arc<Pipeline>, limits: ProcessLimits) -> Self {
        Self {
            pipeline,
            limits,
            format: OutputFormat::Pretty,
            config: ReplConfig::default(),
            context: None,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("eskai> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    match ReplCommand::parse(line) {
                        ReplCommand::Exit => {
                            println!("Bye!");
                            break;
                        }
                        ReplCommand::Help => Self::print_help(),
                        ReplCommand::Status => self.print_status().await,
                        ReplCommand::History => self.print_history(),
                        ReplCommand::Unknown(cmd) => {
                            println!("Unknown command: {}", cmd);
                            println!("Type help for available commands");
                        }
                        ReplCommand::Prompt(prompt) => self.process(&prompt).await,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.config.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          ESKAI - Interactive Session        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Backends: {}", self.pipeline.pool().names().join(", "));
        Self::print_help();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  help, /h, /?        - Show this help");
        println!("  status              - Probe backends");
        println!("  history             - Show recent runs");
        println!("  exit, quit, /q      - Exit");
        println!();
        println!("Anything else is processed as a request. Ctrl-C cancels a running request.");
        println!();
    }

    async fn print_status(&self) {
        let status = self.pipeline.status().await;
        match self.format {
            OutputFormat::Pretty => println!("{}", ConsoleFormatter::format_status(&status)),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&status).unwrap_or_else(|_| "{}".to_string())
            ),
        }
    }

    fn print_history(&self) {
        let entries = self.pipeline.execution_history(HISTORY_LIMIT);
        if entries.is_empty() {
            println!("No runs yet.");
            return;
        }
        for entry in entries {
            let marker = if entry.success { "v".green() } else { "x".red() };
            println!(
                "  {} {} {} {}",
                marker,
                entry.recorded_at.format("%H:%M:%S").to_string().dimmed(),
                format!("[{}]", entry.kind).cyan(),
                truncate_bytes(&entry.prompt, 60)
            );
        }
    }

    async fn process(&mut self, prompt: &str) {
        println!();

        let mut limits = self.limits.clone();
        if let Some(context) = &self.context {
            limits = limits.with_context(context.clone());
        }

        let envelope = run_prompt(&self.pipeline, prompt, limits, self.config.show_progress).await;
        self.context = Self::next_context(prompt, &envelope);

        match self.format {
            OutputFormat::Pretty => println!("{}", ConsoleFormatter::format(&envelope)),
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&envelope)),
        }
    }

    fn next_context(prompt: &str, envelope: &ResultEnvelope) -> Option<String> {
        let reply = match envelope {
            ResultEnvelope::Chat { response, .. } => response.as_str(),
            ResultEnvelope::Objective(outcome) => &outcome.final_result.synthesized_text,
            ResultEnvelope::Error { .. } => return None,
        };
        let turn = format!("User: {prompt}\nAssistant: {reply}");
        Some(truncate_bytes(&turn, CONTEXT_LIMIT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/?"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("status"), ReplCommand::Status);
        assert_eq!(ReplCommand::parse("quit"), ReplCommand::Exit);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Exit);
        assert_eq!(ReplCommand::parse("/models"), ReplCommand::Unknown("/models".into()));
    }

    #[test]
    fn test_parse_prompt() {
        assert_eq!(
            ReplCommand::parse("help me plan a trip"),
            ReplCommand::Prompt("help me plan a trip".into())
        );
    }

    #[test]
    fn test_next_context() {
        let chat = ResultEnvelope::chat("id", "Hello!", 0.1);
        assert_eq!(
            ChatRepl::next_context("hi", &chat).as_deref(),
            Some("User: hi\nAssistant: Hello!")
        );
        let error = ResultEnvelope::error("id", "operation cancelled", 0.1);
        assert!(ChatRepl::next_context("hi", &error).is_none());
    }
}
