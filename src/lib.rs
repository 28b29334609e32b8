//! Data model and client for the Telegra.ph publishing API.
//!
//! Page bodies are trees of [`Node`](telegraph::Node) values; see
//! [`telegraph::node`] for the JSON codec and vocabulary validation.

pub mod config;
pub mod helper;
pub mod telegraph;
pub mod types;
