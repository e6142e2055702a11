//! Session lifecycle: create, resume, and chat.

mod bootstrap;
mod resume;
mod turn_loop;


pub use bootstrap::BootstrapError;
pub use resume::ResumeError;
pub use turn_loop::{LoopSummary, TurnError, TurnOutcome};

use crate::context::AppContext;

/// Drives sessions against the collaborators in an [`AppContext`].
pub struct SessionController<'a> {
    ctx: &'a AppContext,
}

impl<'a> SessionController<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }
}
