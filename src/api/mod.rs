//! Issuetrak API client and types.
//!
//! This module provides the interface for communicating with the Issuetrak REST API.

pub mod auth;
mod client;
pub mod error;
pub mod request;
mod response;
pub mod types;

pub use auth::Auth;
pub use client::IssuetrakClient;
pub use error::ApiError;
pub use request::{Lookup, Request};
pub use response::ApiResponse;
