pub mod common;
pub mod matches;
pub mod odds;
pub mod page;
