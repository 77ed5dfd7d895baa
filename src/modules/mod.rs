//! Modules layer - infrastructure behind the feature services
//!
//! `store` is the persistence boundary for reports, tasks and signups.

pub mod store;
