//! Background Tasks Module
//!
//! Periodic maintenance running alongside the request loop.

mod cleanup;

pub use cleanup::spawn_cleanup_task;
