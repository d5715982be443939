//! Background tasks for the HTTP presentation layer

mod cache_sweep;
mod shutdown;

pub use cache_sweep::spawn_cache_sweep_task;
pub use shutdown::drain_deadline;
