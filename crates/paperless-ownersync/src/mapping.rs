//! Operator-supplied owner-to-tag mapping file.
//!
//! The file is a flat JSON object of `username: tag-name` pairs. It is read
//! once at startup; changing it requires a restart.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info};

/// Static username → tag-name overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerTagMapping(HashMap<String, String>);

impl OwnerTagMapping {
    /// An empty mapping (every username falls through to the prefix rule).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a mapping from explicit entries (primarily for tests).
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Load the mapping from a JSON file.
    ///
    /// Missing file: an example file is written to the same path and an
    /// empty mapping is returned, so a fresh deployment has a template to
    /// edit. Unreadable or malformed file: logged, empty mapping returned —
    /// the daemon still starts and the default prefix rule applies.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            Self::write_example(path);
            return Self::empty();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<HashMap<String, String>>(&contents) {
                Ok(entries) => {
                    info!(
                        path = %path.display(),
                        entries = entries.len(),
                        "Loaded owner-to-tag mapping"
                    );
                    Self(entries)
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Malformed mapping file, using empty mapping");
                    Self::empty()
                }
            },
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to read mapping file, using empty mapping");
                Self::empty()
            }
        }
    }

    /// Look up the explicit tag name for a username.
    #[must_use]
    pub fn get(&self, username: &str) -> Option<&str> {
        self.0.get(username).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn write_example(path: &Path) {
        let example = serde_json::json!({
            "john": "John-Folder",
            "jane": "Jane-Documents",
            "admin": "Admin-Files"
        });
        match serde_json::to_string_pretty(&example) {
            Ok(contents) => match std::fs::write(path, contents) {
                Ok(()) => info!(path = %path.display(), "Created example mapping file"),
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Could not create example mapping file");
                }
            },
            Err(e) => error!(error = %e, "Could not serialize example mapping"),
        }
    }
}
