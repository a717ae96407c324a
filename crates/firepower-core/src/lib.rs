//! # firepower-core
//!
//! Core plumbing shared by the Firepower management API clients.
//!
//! This crate owns everything below the resource facades: configuration,
//! request construction, transport, status checking, JSON decoding and the
//! error taxonomy callers inspect.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and vendor error bodies
//! - [`config`] - Validated configuration for FMC connections
//! - [`client`] - The shared HTTP client and its transport seam
//! - [`path`] - Percent-encoding of caller-supplied path segments
//! - [`query`] - Query-string builder for option records
//! - [`response`] - Response metadata returned with every decoded body

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod path;
pub mod query;
pub mod response;

// Re-export commonly used types
pub use error::{Error, Result};
pub use response::ResponseMeta;
pub use tokio_util::sync::CancellationToken;
