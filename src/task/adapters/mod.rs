//! Adapter implementations for task management ports.

pub mod memory;
pub mod postgres;
