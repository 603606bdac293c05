// src/settings/io.rs
//! Locating `.env.local` and `service-account.json` across the packaged and
//! development layouts.

use directories_next::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::sheets::error::{OrdersError, OrdersResult};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "BTMonitor";
const APPLICATION: &str = "BTMonitor";

pub const ENV_FILE: &str = ".env.local";
pub const CREDENTIAL_FILE: &str = "service-account.json";

/// Directories searched for configuration files. Order of the fields is the
/// lookup precedence; `user_config` is the last resort.
#[derive(Debug, Clone, Default)]
pub struct SearchRoots {
    /// Directory of the running executable.
    pub app_root: Option<PathBuf>,
    /// Platform resources directory of a packaged install.
    pub resources: Option<PathBuf>,
    /// `<manifest>/src` when running from a checkout.
    pub dev_source: Option<PathBuf>,
    /// `<manifest>` when running from a checkout.
    pub dev_parent: Option<PathBuf>,
    pub cwd: Option<PathBuf>,
    pub user_config: Option<PathBuf>,
}

impl SearchRoots {
    pub fn detect() -> Self {
        let app_root = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let resources = app_root.as_deref().map(resources_dir);
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

        Self {
            app_root,
            resources,
            dev_source: Some(manifest.join("src")),
            dev_parent: Some(manifest),
            cwd: std::env::current_dir().ok(),
            user_config: ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
                .map(|dirs| dirs.config_dir().to_path_buf()),
        }
    }

    /// Every location checked for `file_name`, highest precedence first.
    pub fn candidates(&self, file_name: &str) -> Vec<PathBuf> {
        let resources = self.resources.as_ref();
        [
            self.app_root.as_ref().map(|p| p.join(file_name)),
            resources.map(|p| p.join("app").join(file_name)),
            resources.map(|p| p.join(file_name)),
            self.dev_source.as_ref().map(|p| p.join(file_name)),
            self.dev_parent.as_ref().map(|p| p.join(file_name)),
            self.cwd.as_ref().map(|p| p.join(file_name)),
            self.user_config.as_ref().map(|p| p.join(file_name)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn find(&self, file_name: &str) -> Option<PathBuf> {
        first_existing(self.candidates(file_name))
    }

    /// The credential file is mandatory for every remote operation.
    pub fn credential_file(&self) -> OrdersResult<PathBuf> {
        self.find(CREDENTIAL_FILE).ok_or_else(|| {
            OrdersError::Configuration(format!("{} not found.", CREDENTIAL_FILE))
        })
    }
}

#[cfg(target_os = "macos")]
fn resources_dir(app_root: &Path) -> PathBuf {
    app_root.join("..").join("Resources")
}

#[cfg(not(target_os = "macos"))]
fn resources_dir(app_root: &Path) -> PathBuf {
    app_root.join("resources")
}

pub fn first_existing<I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    candidates.into_iter().find(|p| p.exists())
}

/// Load `.env.local` into the process environment. Missing or unreadable
/// files are logged and otherwise ignored.
pub fn load_env_file(roots: &SearchRoots) -> Option<PathBuf> {
    let Some(env_file) = roots.find(ENV_FILE) else {
        warn!("[ENV] {} not found. Environment variables may be missing.", ENV_FILE);
        return None;
    };
    match dotenvy::from_path(&env_file) {
        Ok(()) => {
            info!("[ENV] Loaded from: {:?}", env_file);
            Some(env_file)
        }
        Err(e) => {
            warn!("[ENV] Failed to load {:?}: {}", env_file, e);
            None
        }
    }
}
