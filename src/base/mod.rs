//! Core components, types, and utilities for recipena.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Fixed reply texts sent back to LINE users.
//! - Common types, error kinds, and result handling.

pub mod config;
pub mod error;
pub mod messages;
pub mod types;
