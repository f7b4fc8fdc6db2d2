//! Task management for Taskdeck.
//!
//! This module implements task creation, filtered listing, overdue lookup,
//! partial updates, removal and bulk reordering by priority. Raw request
//! payloads pass through [`validation`] before reaching the service. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Request parsing and transport mapping in [`validation`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
