//! Background tasks module
//!
//! This module contains the tasks that run alongside the HTTP server.

pub mod remote_sync;
pub mod timer_loop;

// Re-export main functions
pub use remote_sync::remote_sync_task;
pub use timer_loop::{spawn_timer_task, timer_task};
