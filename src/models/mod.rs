//! Data models for the data API.
//!
//! This module re-exports all model types used throughout the application.

pub mod connection;
pub mod record;

pub use connection::{ConnectionDescriptor, DatabaseType};
pub use record::DataRecord;
