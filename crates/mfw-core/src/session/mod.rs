//! Session domain module.
//!
//! - `state`: the per-session state machine (`SessionState`, `SessionPhase`)
//! - `view`: the read-only snapshot handed to presentation adapters

mod state;
mod view;

pub use state::{SelectedTopic, SessionPhase, SessionState};
pub use view::SessionView;
