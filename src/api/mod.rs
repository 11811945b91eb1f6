//! # Backend API
//!
//! HTTP plumbing for the message relay backend. `MessageApi` is the seam the
//! rest of the app depends on; `HttpMessageApi` is the reqwest implementation.

pub mod client;
pub mod types;

pub use client::{ApiError, HttpMessageApi, MessageApi};
pub use types::{HealthReport, Message, OutgoingMessage, SendReceipt, Timestamp};
