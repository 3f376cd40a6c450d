pub mod billing;
pub mod catalog;
