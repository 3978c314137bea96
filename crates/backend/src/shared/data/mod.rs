pub mod latency;
pub mod record_store;
pub mod repository;
