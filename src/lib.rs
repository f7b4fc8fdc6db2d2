//! Taskdeck: task tracking backend.
//!
//! This crate stores tasks with a title, optional description, optional due
//! date and a priority rank from 1 to 10. It supports filtered listing,
//! overdue lookup, partial updates, removal and bulk reordering of
//! priorities.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (Postgres, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task domain, persistence and management service
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Tracing subscriber set-up

pub mod config;
pub mod task;
pub mod telemetry;
