//! Recording state machine
//!
//! Governs the idle/recording/stopped/playing transitions for the active
//! question, the 1-second elapsed counter, and the lifetime of the capture
//! stream and its background tasks.

mod recorder;
mod state;

pub use recorder::Recorder;
pub use state::RecorderState;

/// Format elapsed seconds as `mm:ss` for display
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
