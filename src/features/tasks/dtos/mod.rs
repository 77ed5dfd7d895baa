mod task_dto;

pub use task_dto::{SignupDto, SignupResponseDto, TaskBoardEntryDto};
