//! Hosted insight generation
//!
//! Forwards the extracted month series to an OpenAI-compatible chat
//! gateway and returns the free-text narrative analysis.

mod client;

pub use client::{InsightClient, DEFAULT_API_URL, DEFAULT_MODEL};
