//! # Taskboard Shared Library
//!
//! This crate contains the data-access layer shared by the Taskboard API
//! server and any future tooling built on the same store.
//!
//! ## Module Organization
//!
//! - `models`: Database models and the integrity rules around them
//! - `db`: Connection pool and migration runner

pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
