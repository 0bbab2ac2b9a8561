//! Civic TUI library.
//!
//! This module exposes the internal modules for testing.

pub mod api;
pub mod app;
pub mod config;
pub mod geocode;
pub mod location;
pub mod logging;
pub mod map;
pub mod query;
pub mod report;
pub mod screens;
pub mod ui;
pub mod util;
pub mod workflow;
