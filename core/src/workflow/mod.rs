//! Connected-account workflows

pub mod prompt;
pub mod quickstart;

pub use prompt::{AuthorizationPrompt, NoPrompt};
pub use quickstart::{Quickstart, QuickstartOptions, QuickstartOutcome};
