pub mod exercise;
pub mod exercise_type;
pub mod session;
