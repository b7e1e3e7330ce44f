//! Persisted single-slot token store.
//!
//! One serialized credential at a well-known location under the user data
//! directory. The slot is overwritten wholesale on each renewal and removed
//! entirely on deliberate invalidation; there is never more than one
//! credential per process/session.

use std::fs;
use std::path::PathBuf;

use reel_core::error::{GatewayError, GatewayResult};
use reel_core::types::Credential;

const TOKEN_FILE: &str = "token.json";

/// File-backed credential slot
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a store at the default location
    /// (`<data dir>/reelgate/token.json`).
    ///
    /// Returns `None` if the platform data directory cannot be determined.
    pub fn new() -> Option<Self> {
        let path = dirs::data_dir()?.join("reelgate").join(TOKEN_FILE);
        Some(Self { path })
    }

    /// Create a store at a custom path, for tests
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the stored credential, if any.
    ///
    /// A missing or unparsable file reads as an empty slot; a corrupt slot
    /// is indistinguishable from an absent one and triggers a fresh login.
    pub fn load(&self) -> Option<Credential> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Overwrite the slot with a new credential
    pub fn save(&self, credential: &Credential) -> GatewayResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| GatewayError::io("failed to create token directory", e))?;
        }
        let json = serde_json::to_string_pretty(credential)
            .map_err(|e| GatewayError::io("failed to serialize credential", e.into()))?;
        fs::write(&self.path, json).map_err(|e| GatewayError::io("failed to write token file", e))
    }

    /// Remove the slot entirely; absent is not an error
    pub fn clear(&self) -> GatewayResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GatewayError::io("failed to remove token file", e)),
        }
    }
}
