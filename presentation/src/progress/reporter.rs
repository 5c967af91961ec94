//! Progress reporting for pipeline runs

use colored::Colorize;
use eskai_application::PipelineProgress;
use eskai_domain::{AgentRecord, AgentSpec, Stage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per stage and a bar over agents
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
    agent_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
            agent_bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn agent_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("  {prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn stage_display_name(stage: Stage) -> String {
        format!("Stage {}/6", stage.number())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineProgress for ProgressReporter {
    fn on_stage_start(&self, stage: Stage) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::stage_display_name(stage));
        pb.set_message(format!("{}...", stage.description()));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.stage_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_stage_complete(&self, stage: Stage) {
        if stage == Stage::Execution
            && let Some(bar) = self.agent_bar.lock().ok().and_then(|mut b| b.take())
        {
            bar.finish_and_clear();
        }
        if let Some(pb) = self.stage_bar.lock().ok().and_then(|mut b| b.take()) {
            pb.finish_with_message(format!("{} {}", stage.description(), "done".green()));
        }
    }

    fn on_agent_start(&self, agent: &AgentSpec) {
        let Ok(mut slot) = self.agent_bar.lock() else {
            return;
        };
        let bar = slot.get_or_insert_with(|| {
            let bar = self.multi.add(ProgressBar::new(0));
            bar.set_style(Self::agent_style());
            bar.set_prefix("Agents");
            bar
        });
        bar.inc_length(1);
        bar.set_message(agent.id.clone());
    }

    fn on_agent_complete(&self, record: &AgentRecord) {
        let Ok(slot) = self.agent_bar.lock() else {
            return;
        };
        if let Some(bar) = slot.as_ref() {
            let status = if record.is_completed() {
                format!("{} {}", "v".green(), record.agent_id)
            } else {
                format!("{} {}", "x".red(), record.agent_id)
            };
            bar.set_message(status);
            bar.inc(1);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl PipelineProgress for SimpleProgress {
    fn on_stage_start(&self, stage: Stage) {
        eprintln!(
            "{} {} {}",
            "->".cyan(),
            ProgressReporter::stage_display_name(stage).bold(),
            stage.description()
        );
    }

    fn on_stage_complete(&self, _stage: Stage) {}

    fn on_agent_complete(&self, record: &AgentRecord) {
        if record.is_completed() {
            eprintln!("  {} {}", "v".green(), record.agent_id);
        } else {
            eprintln!(
                "  {} {} ({})",
                "x".red(),
                record.agent_id,
                record.status.as_str()
            );
        }
    }
}
