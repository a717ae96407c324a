//! Object management client and data models for the Firepower management API.
//!
//! Provides typed records for the `object/*` endpoints and an asynchronous
//! [`ObjectService`] that lists, fetches, creates, updates and deletes them.
//!
//! ```no_run
//! use firepower_objects::{CancellationToken, Item, ObjectListOptions, ObjectService};
//!
//! # async fn run() -> firepower_objects::Result<()> {
//! let service = ObjectService::new(
//!     "https://fmc.example.com/api/fmc_config/v1/domain/e276abec-e0f2-11e3-8169-6d9ed49b625f/",
//! )?;
//! let cancel = CancellationToken::new();
//!
//! let (hosts, meta) = service
//!     .list_hosts(&cancel, Some(&ObjectListOptions::new(true)))
//!     .await?;
//! println!("{} of {} hosts (status {})", hosts.len(), hosts.paging.count, meta.status);
//!
//! service.insert_host(&cancel, &Item::host("web01", "10.0.0.1")).await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod kind;
pub mod models;

pub use client::{ObjectService, ObjectServiceBuilder};
pub use firepower_core::{CancellationToken, Error, ResponseMeta};
pub use kind::ObjectKind;
pub use models::{
    Domain, Item, LastUser, Links, Metadata, Object, ObjectListOptions, ObjectRequest, Paging,
    ReadOnly,
};

/// Convenient result alias that reuses the shared Firepower error type.
pub type Result<T> = firepower_core::Result<T>;
