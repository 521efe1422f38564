// Quiz, joke and student-record logic plus per-exercise frontend state.
// Terminal setup and rendering stay in the binary so tests can drive everything headlessly.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod jokes;
pub mod quiz;
pub mod runtime;
pub mod students;
