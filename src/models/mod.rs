//! Bugsnag API model types.

mod event;
mod organisation;
mod project;

pub use event::*;
pub use organisation::*;
pub use project::*;
