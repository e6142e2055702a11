//! Session lifecycle for arxiv-gpt.
//!
//! A session binds a named assistant, a conversation thread and the corpus
//! files uploaded for it. [`SessionController`] creates sessions from a
//! fresh arXiv scrape, reopens stored ones, and runs the chat loop; the
//! flat [`SessionStore`] keeps every session ever created.

pub mod context;
pub mod controller;
pub mod model;
pub mod poll;
pub mod store;
pub mod transcript;

#[cfg(test)]
mod testing;

pub use context::{AppContext, SessionSettings};
pub use controller::{
    BootstrapError, LoopSummary, ResumeError, SessionController, TurnError, TurnOutcome,
};
pub use model::{Session, SessionSummary};
pub use poll::{wait_for_run, PollOutcome, PollPolicy, Sleeper, TokioSleeper};
pub use store::SessionStore;
pub use transcript::{render_transcript, transcript_file_name, write_transcript};
