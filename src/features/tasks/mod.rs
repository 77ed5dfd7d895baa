//! Student task board and signups.
//!
//! Published reports appear here as tasks with a fixed number of student
//! slots. Every signup goes through [`RegistrationService`], which holds the
//! task's row lock while it checks capacity, so a task never ends up with
//! more students than it asked for.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/tasks` | No | Open tasks with occupancy and names |
//! | POST | `/api/tasks/{id}/signups` | No | Sign a student up |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{RegistrationService, TaskBoardService};
