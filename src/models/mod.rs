pub mod exercise;
pub mod session;

pub use exercise::{ExerciseChanges, ExerciseRecord, ExerciseType, NewExerciseRecord, PopulatedExerciseRecord};
pub use session::{NewSession, Session, SessionChanges, SessionType, MAX_COMMENT_CHARS};
