//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Sweep: Removes expired entries from every cache at a configured interval

mod sweep;

pub use sweep::spawn_sweep_task;
