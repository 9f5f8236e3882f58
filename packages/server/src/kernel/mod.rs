// Background infrastructure shared by the server binaries
pub mod scheduled_tasks;

pub use scheduled_tasks::*;
