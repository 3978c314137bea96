//! Common types and traits for all aggregates

pub mod aggregate_root;
pub mod entity_metadata;
pub mod record_id;

// Re-exports
pub use aggregate_root::AggregateRoot;
pub use entity_metadata::EntityMetadata;
pub use record_id::{RecordId, ToRecordId};
