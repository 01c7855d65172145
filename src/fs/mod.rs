//! File system operations.

use std::path::{Path, PathBuf};

use anyhow::Context;

pub mod session;

pub use session::{PersistedSession, UserProfile, UserSession, load_session, save_session};

/// Directory for mediquote client files.
pub const APP_DIR: &str = ".mediquote";

/// Holds all mediquote-related paths derived from a base directory.
///
/// This struct enables dependency injection of filesystem paths, allowing
/// tests to use isolated temporary directories instead of the actual
/// working directory. In production, the base is typically the current
/// working directory.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use mediquote::fs::AppPaths;
///
/// let paths = AppPaths::new(Path::new("/tmp/test"));
/// assert_eq!(
///     paths.session_file(),
///     Path::new("/tmp/test/.mediquote/session.json")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AppPaths {
    base: PathBuf,
}

impl AppPaths {
    /// Creates paths rooted at the given base directory.
    #[must_use]
    pub fn new(base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
        }
    }

    /// Creates paths rooted at the current working directory.
    ///
    /// # Panics
    ///
    /// Panics if the current directory cannot be determined.
    #[must_use]
    #[allow(clippy::expect_used)] // Documented panic - fundamental requirement for app startup.
    pub fn from_cwd() -> Self {
        Self {
            base: std::env::current_dir().expect("Failed to get current directory"),
        }
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns the `.mediquote` directory path.
    #[must_use]
    pub fn app_dir(&self) -> PathBuf {
        self.base.join(APP_DIR)
    }

    /// Returns the session file path (`.mediquote/session.json`).
    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.app_dir().join("session.json")
    }

    /// Returns the diagnostic log path (`.mediquote/mediquote.log`).
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.app_dir().join("mediquote.log")
    }

    /// Ensures the `.mediquote` directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_app_dir(&self) -> anyhow::Result<()> {
        let dir = self.app_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Loads the persisted session, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_session(&self) -> anyhow::Result<Option<PersistedSession>> {
        session::load_session(&self.session_file())
    }

    /// Saves the session to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save_session(&self, session: &PersistedSession) -> anyhow::Result<()> {
        self.ensure_app_dir()?;
        session::save_session(&self.session_file(), session)
    }

    /// Removes the persisted session wholesale (logout).
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear_session(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(self.session_file()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove session file"),
        }
    }
}
