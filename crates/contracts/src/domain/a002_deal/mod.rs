pub mod aggregate;

pub use aggregate::{Deal, DealDto, DealListQuery, DealPatch, DealStageChange};
