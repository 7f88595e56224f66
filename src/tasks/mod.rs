//! Background Tasks Module
//!
//! Tasks that run periodically for the lifetime of the process.
//!
//! # Tasks
//! - Expiry sweep: proactively removes expired cache entries so dead
//!   entries do not hold memory between reads.

mod sweep;

pub use sweep::spawn_sweep_task;
