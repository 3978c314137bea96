pub mod a001_lead;
pub mod a002_deal;
pub mod meta;
