pub mod reports;
pub mod tasks;
