//! Repair reports and their lifecycle as tasks.
//!
//! A report starts as `reported`. Publishing it with a student capacity
//! turns it into an `open` task on the student board; completing it closes
//! it for new signups. Deleting a report removes its signups too.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/reports` | No | Submit a report |
//! | GET | `/api/reports` | No | All reports and tasks with occupancy |
//! | POST | `/api/reports/{id}/publish` | No | Publish as a task |
//! | POST | `/api/reports/{id}/complete` | No | Close a task |
//! | DELETE | `/api/reports/{id}` | No | Delete a report or task |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ReportService;
