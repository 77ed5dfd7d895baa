pub mod capacity;
pub mod registration_service;
mod task_board_service;

pub use registration_service::RegistrationService;
pub use task_board_service::TaskBoardService;
