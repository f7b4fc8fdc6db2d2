//! Unit tests for the task module.
//!
//! Tests are organised by layer: domain values and filters, request
//! validation, service orchestration, and store error translation.
