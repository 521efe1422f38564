//! Per-exercise frontend state, driven by key events and runner ticks.
//! Rendering lives in the binary's `ui` module.
pub mod jokes_app;
pub mod quiz_app;
pub mod students_app;

pub use jokes_app::JokesApp;
pub use quiz_app::{Feedback, QuizApp, QuizScreen};
pub use students_app::{Notice, StudentsApp, StudentsMode};
