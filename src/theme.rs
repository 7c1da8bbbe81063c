//! Local persisted theme preference
//!
//! A single key-value pair: the theme name is read once at startup and
//! written whenever the user toggles it. Storage is a plain file, the
//! library-crate equivalent of the browser's local storage slot.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// Display theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The stored string form of the theme
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

/// File-backed store for the theme preference
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    /// Create a store backed by the given file path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the stored theme; a missing or unreadable value is the default
    pub fn load(&self) -> Theme {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Persist a theme choice
    pub fn save(&self, theme: Theme) -> Result<(), Error> {
        fs::write(&self.path, theme.as_str())?;
        Ok(())
    }

    /// Flip the stored theme and return the new value
    pub fn toggle(&self) -> Result<Theme, Error> {
        let next = self.load().toggled();
        self.save(next)?;
        Ok(next)
    }
}
