//! The interactive chat loop.
//!
//! ```text
//! AwaitingInput -> Dispatching -> Polling -> Rendering -> AwaitingInput
//!       |
//!       +-> Closing (exit keyword or end of input)
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use arxivgpt_ai::{Run, RunStatus};

use super::SessionController;
use crate::model::Session;
use crate::poll::{wait_for_run, PollOutcome};
use crate::transcript::write_transcript;

/// What happened to one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The latest turn was shown to the user.
    Replied(String),
    /// The run ended without output to show.
    NoReply(RunStatus),
    /// The run was still pending when polling gave up.
    TimedOut,
    /// The message never reached the thread.
    NotDelivered,
    /// Starting, polling, or reading back the run failed.
    RunFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopSummary {
    pub outcomes: Vec<TurnOutcome>,
    /// Where the transcript was written, if collecting it succeeded.
    pub transcript: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("session {0:?} has no assistant or thread")]
    UnboundSession(String),

    #[error("console io error: {0}")]
    Io(#[from] std::io::Error),
}

enum LoopState {
    AwaitingInput,
    Dispatching(String),
    Polling,
    Rendering(Run),
    Closing,
}

impl SessionController<'_> {
    /// Chat on `session` until an exit keyword or end of input, then write
    /// the transcript.
    pub async fn chat<R: BufRead, W: Write>(
        &self,
        session: &Session,
        mut input: R,
        mut output: W,
    ) -> Result<LoopSummary, TurnError> {
        if !session.is_bound() {
            return Err(TurnError::UnboundSession(session.display_name.clone()));
        }

        let mut outcomes = Vec::new();
        let mut state = LoopState::AwaitingInput;

        loop {
            state = match state {
                LoopState::AwaitingInput => {
                    write!(output, "You: ")?;
                    output.flush()?;
                    let mut raw = Vec::new();
                    if input.read_until(b'\n', &mut raw)? == 0 {
                        debug!("End of input");
                        LoopState::Closing
                    } else {
                        // Undecodable bytes become U+FFFD rather than ending the session.
                        let line = String::from_utf8_lossy(&raw);
                        let text = line.trim();
                        if text.is_empty() {
                            LoopState::AwaitingInput
                        } else if self.is_exit(text) {
                            writeln!(output, "Exiting the program.")?;
                            LoopState::Closing
                        } else {
                            LoopState::Dispatching(text.to_string())
                        }
                    }
                }

                LoopState::Dispatching(text) => {
                    match self
                        .ctx
                        .registry
                        .send_message(&session.thread_id, &text, &session.file_ids)
                        .await
                    {
                        Ok(message_id) => {
                            debug!(%message_id, "Message posted");
                            LoopState::Polling
                        }
                        Err(e) => {
                            error!(thread_id = %session.thread_id, error = %e, "Sending message failed");
                            outcomes.push(TurnOutcome::NotDelivered);
                            LoopState::AwaitingInput
                        }
                    }
                }

                LoopState::Polling => match self.run_turn(session).await {
                    Some(run) => LoopState::Rendering(run),
                    None => {
                        outcomes.push(TurnOutcome::RunFailed);
                        LoopState::AwaitingInput
                    }
                },

                LoopState::Rendering(run) => {
                    outcomes.push(self.render(session, &run, &mut output).await?);
                    LoopState::AwaitingInput
                }

                LoopState::Closing => {
                    let transcript = self.close(session, &mut output).await?;
                    return Ok(LoopSummary {
                        outcomes,
                        transcript,
                    });
                }
            };
        }
    }

    fn is_exit(&self, text: &str) -> bool {
        self.ctx
            .settings
            .exit_keywords
            .iter()
            .any(|keyword| keyword.trim().eq_ignore_ascii_case(text))
    }

    /// Start a run and wait for it. `None` when the service call failed.
    async fn run_turn(&self, session: &Session) -> Option<Run> {
        let ctx = self.ctx;
        let run = match ctx
            .registry
            .create_run(&session.thread_id, &session.assistant_id)
            .await
        {
            Ok(run) => run,
            Err(e) => {
                error!(thread_id = %session.thread_id, error = %e, "Starting run failed");
                return None;
            }
        };
        debug!(run_id = %run.id, status = ?run.status, "Run started");

        match wait_for_run(
            ctx.registry.as_ref(),
            ctx.sleeper.as_ref(),
            ctx.settings.poll,
            &session.thread_id,
            run,
        )
        .await
        {
            Ok(PollOutcome::Finished(run)) => Some(run),
            Ok(PollOutcome::TimedOut { run, attempts }) => {
                warn!(run_id = %run.id, status = ?run.status, attempts, "Run still pending, giving up");
                Some(run)
            }
            Err(e) => {
                error!(error = %e, "Checking run status failed");
                None
            }
        }
    }

    async fn render<W: Write>(
        &self,
        session: &Session,
        run: &Run,
        output: &mut W,
    ) -> Result<TurnOutcome, TurnError> {
        if run.status.is_pending() {
            return Ok(TurnOutcome::TimedOut);
        }
        if run.status != RunStatus::Completed {
            warn!(run_id = %run.id, status = ?run.status, "Run ended without a reply");
            return Ok(TurnOutcome::NoReply(run.status));
        }

        let turns = match self.ctx.registry.list_messages(&session.thread_id).await {
            Ok(turns) => turns,
            Err(e) => {
                error!(thread_id = %session.thread_id, error = %e, "Listing messages failed");
                return Ok(TurnOutcome::RunFailed);
            }
        };
        let Some(latest) = turns.into_iter().next() else {
            warn!(run_id = %run.id, "Completed run left no messages");
            return Ok(TurnOutcome::NoReply(run.status));
        };

        writeln!(output, "{}: {}", session.display_name, latest.content)?;
        Ok(TurnOutcome::Replied(latest.content))
    }

    async fn close<W: Write>(
        &self,
        session: &Session,
        output: &mut W,
    ) -> Result<Option<PathBuf>, TurnError> {
        let written = match self.ctx.registry.list_messages(&session.thread_id).await {
            Ok(history) => write_transcript(
                &self.ctx.settings.transcript_dir,
                &session.display_name,
                &history,
            )
            .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match written {
            Ok(path) => {
                info!(path = %path.display(), "Transcript written");
                writeln!(output, "Messages saved to {}", path.display())?;
                Ok(Some(path))
            }
            Err(e) => {
                error!(error = %e, "Collecting message history failed");
                writeln!(output, "Error collecting message history.")?;
                Ok(None)
            }
        }
    }
}
