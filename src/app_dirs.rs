use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "kegel")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }

    pub fn log_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("kegel");
            Some(state_dir.join("logs"))
        } else {
            ProjectDirs::from("", "", "kegel")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("logs"))
        }
    }
}
