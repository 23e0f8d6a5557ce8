//! Thin REST client for the hosted backend platform (Appwrite API v1).

pub mod client;
pub mod error;
pub mod messaging;
pub mod permission;
pub mod query;
pub mod storage;

pub use client::PlatformClient;
pub use error::{PlatformError, PlatformResult};
