// Utils compartidos

pub mod task;
pub mod time;
