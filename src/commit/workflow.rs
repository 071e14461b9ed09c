//! The commit message pipeline: staged diff in, commit message out.
//!
//! Steps, in order, with no way back:
//! 1. skip when git already supplied a message (hook commit source)
//! 2. read the staged diff; nothing staged is an error
//! 3. read the shortstat of the same change set and parse it
//! 4. pick a model by change count
//! 5. check the endpoint and API key are configured
//! 6. send the instruction and the diff, take the first choice
//! 7. optionally append a trace block
//! 8. write to the destination
//!
//! The write is the last step, so any failure leaves the destination untouched.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ConfigError, WorkflowError};
use crate::git::{DiffStats, StagedChanges};
use crate::hook::HookContext;
use crate::llm::{ChatCompletions, select_model};

use super::output::Destination;
use super::prompt::build_commit_prompt;
use super::trace::{Stopwatch, TraceRecord};

/// How a run ended successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Git already has a message from this source; nothing was generated.
    Skipped { commit_source: String },
    /// A message was generated and written.
    Written {
        model: String,
        stats: DiffStats,
        message: String,
    },
}

/// A generated message before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMessage {
    pub model: String,
    pub stats: DiffStats,
    pub message: String,
}

/// Generates one commit message per invocation.
pub struct CommitMessageWorkflow<'a, G, C> {
    config: &'a Config,
    git: &'a G,
    chat: &'a C,
}

impl<'a, G, C> CommitMessageWorkflow<'a, G, C>
where
    G: StagedChanges,
    C: ChatCompletions,
{
    pub fn new(config: &'a Config, git: &'a G, chat: &'a C) -> Self {
        Self { config, git, chat }
    }

    /// Run the whole pipeline, including the final write.
    pub async fn run(
        &self,
        hook: &HookContext,
        destination: &Destination,
    ) -> Result<Outcome, WorkflowError> {
        let mut stopwatch = self.config.trace.then(Stopwatch::start);

        if hook.should_skip() {
            let commit_source = hook.commit_source.clone().unwrap_or_default();
            info!("Commit source is '{}', keeping git's message", commit_source);
            return Ok(Outcome::Skipped { commit_source });
        }

        let generated = self.generate(stopwatch.as_mut()).await?;
        destination.write(&generated.message)?;

        Ok(Outcome::Written {
            model: generated.model,
            stats: generated.stats,
            message: generated.message,
        })
    }

    /// Everything except the hook check and the write.
    pub async fn generate(
        &self,
        mut stopwatch: Option<&mut Stopwatch>,
    ) -> Result<GeneratedMessage, WorkflowError> {
        let diff = self.git.diff()?;
        if diff.trim().is_empty() {
            return Err(WorkflowError::NothingStaged);
        }

        let stats = DiffStats::parse(&self.git.shortstat()?)?;
        debug!(
            "Staged: {} files, {} insertions, {} deletions",
            stats.files_changed, stats.insertions, stats.deletions
        );

        let model = select_model(&stats, &self.config.diff)?;
        self.check_provider()?;

        let messages = build_commit_prompt(&diff);
        if let Some(watch) = stopwatch.as_deref_mut() {
            watch.mark_request();
        }
        let completion = self.chat.complete(model, &messages).await?;
        let elapsed = stopwatch.map(|watch| watch.elapsed());

        let text = completion
            .first_content()
            .ok_or(WorkflowError::EmptyResponse)?;

        let message = match elapsed {
            Some((response, total)) => TraceRecord::new(model, response, total)
                .append_to(text)
                .map_err(WorkflowError::TraceFailed)?,
            None => text.to_string(),
        };

        Ok(GeneratedMessage {
            model: model.to_string(),
            stats,
            message,
        })
    }

    fn check_provider(&self) -> Result<(), ConfigError> {
        let provider = &self.config.provider;
        if provider.base_url.trim().is_empty() {
            return Err(ConfigError::MissingSetting("provider.base_url".to_string()));
        }
        if provider.api_key.trim().is_empty() {
            return Err(ConfigError::MissingSetting("provider.api_key".to_string()));
        }
        if provider.secret.is_empty() {
            return Err(ConfigError::MissingSetting(format!(
                "{} (API key environment variable)",
                provider.api_key
            )));
        }
        Ok(())
    }
}
