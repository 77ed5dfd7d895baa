mod signup;
mod task_board_entry;

pub use signup::{Signup, StudentName};
pub use task_board_entry::TaskBoardEntry;
