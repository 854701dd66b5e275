//! Event handling and user interactions for recipena.
//!
//! This module provides functionality for handling LINE webhook deliveries:
//! - Verifying the request signature
//! - Parsing the delivered events
//! - Dispatching each event and replying to the user

pub mod dispatch;
pub mod event;
pub mod signature;
pub mod webhook;
