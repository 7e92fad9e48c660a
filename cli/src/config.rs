// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

use agendo_supabase::SupabaseConfig;

/// The name of the application, used for the config directory.
pub const APP_NAME: &str = "agendo";

/// CLI configuration, read from `agendo/config.toml`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CliConfig {
    /// Supabase project URL.
    pub base_url: String,

    /// Supabase anon key.
    pub anon_key: String,

    /// Account to sign in as. The password comes from the
    /// `AGENDO_PASSWORD` environment variable or an interactive prompt.
    pub email: String,

    /// Appointments table, when the project deviates from the default.
    #[serde(default)]
    pub table: Option<String>,
}

impl CliConfig {
    /// The backend configuration derived from this file.
    pub fn supabase(&self) -> SupabaseConfig {
        SupabaseConfig {
            base_url: self.base_url.clone(),
            anon_key: self.anon_key.clone(),
            ..Default::default()
        }
    }
}

/// Loads the configuration from the given path, or the default location.
pub fn load(path: Option<&Path>) -> Result<CliConfig, Box<dyn Error>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_path()?,
    };

    tracing::debug!(path = %path.display(), "loading config");
    let text = std::fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config = toml::from_str(&text)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

fn default_path() -> Result<PathBuf, Box<dyn Error>> {
    let dir = dirs::config_dir().ok_or("Cannot locate the user config directory")?;
    Ok(dir.join(APP_NAME).join("config.toml"))
}
