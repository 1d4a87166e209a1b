pub mod category;
pub mod task;
