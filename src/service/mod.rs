//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services recipena talks to:
//! - Chat services (e.g., LINE) for replying to users
//! - Store services (e.g., Notion) for saving shared links
//! - Title services (e.g., plain HTTP scraping) for naming them
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod store;
pub mod title;
