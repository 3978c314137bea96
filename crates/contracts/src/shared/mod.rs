pub mod list_filter;
pub mod list_state;
pub mod number;
pub mod options;
pub mod patch;
