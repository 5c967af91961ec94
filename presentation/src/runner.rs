//! Running one prompt from the terminal
//!
//! Ctrl-C cancels the run in flight instead of killing the process; the
//! pipeline then returns its `operation cancelled` envelope.

use eskai_application::{NoProgress, Pipeline, PipelineProgress, ProcessLimits};
use eskai_domain::ResultEnvelope;
use tracing::info;

use crate::progress::reporter::ProgressReporter;

/// Run `prompt`, with progress bars unless `show_progress` is false
pub async fn run_prompt(
    pipeline: &Pipeline,
    prompt: &str,
    limits: ProcessLimits,
    show_progress: bool,
) -> ResultEnvelope {
    let reporter;
    let progress: &dyn PipelineProgress = if show_progress {
        reporter = ProgressReporter::new();
        &reporter
    } else {
        &NoProgress
    };

    let token = limits.cancellation.clone().unwrap_or_default();
    let run = pipeline.process_with_progress(prompt, limits.with_cancellation(token.clone()), progress);
    tokio::pin!(run);

    tokio::select! {
        envelope = &mut run => envelope,
        _ = interrupted() => {
            info!("Interrupted, cancelling run");
            token.cancel();
            run.await
        }
    }
}

async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; never resolve
        std::future::pending::<()>().await;
    }
}

