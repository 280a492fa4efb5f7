//! CineScout - Movie search proxy for the CineScout frontend
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod gateway;
pub mod server;
