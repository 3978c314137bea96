pub mod aggregate;

pub use aggregate::{Lead, LeadDto, LeadListQuery, LeadPatch, LeadStatusChange};
