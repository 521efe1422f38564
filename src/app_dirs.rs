use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "skillfolio";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("skillfolio_config.json"))
    }

    /// Default student marks file when neither CLI nor config names one
    pub fn students_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_dir().join("studentMarks.txt"))
            .unwrap_or_else(|| PathBuf::from("studentMarks.txt"))
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME);
            Some(state_dir.join("skillfolio.log"))
        } else {
            Self::project().map(|pd| pd.data_local_dir().join("skillfolio.log"))
        }
    }
}
