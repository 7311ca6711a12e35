//! State shared between the HTTP layer and background tasks

pub mod app_state;
pub mod timer_handle;

// Re-export main types
pub use app_state::AppState;
pub use timer_handle::{CommandEnvelope, TimerHandle};
