// agentput — a native Rust terminal client for LangGraph chat agents
// Copyright (C) 2026  The agentput authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "agentput";
const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:2024";

/// Locally persisted client settings. Lives outside the session core: the
/// session only ever sees the resolved backend handle built from these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub assistant_id: Option<String>,
    pub configured: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { api_url: DEFAULT_API_URL.to_owned(), assistant_id: None, configured: false }
    }
}

impl Settings {
    /// Load settings from the platform config dir. A missing or undecodable
    /// file yields the defaults; first runs are not an error.
    pub async fn load() -> Self {
        let Some(path) = settings_path() else {
            return Self::default();
        };
        read_settings(&path).await.unwrap_or_default()
    }

    pub async fn save(&self) -> anyhow::Result<()> {
        let path = settings_path()
            .ok_or_else(|| anyhow::anyhow!("no config directory available on this platform"))?;
        write_settings(&path, self).await
    }
}

fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE))
}

async fn read_settings(path: &Path) -> Option<Settings> {
    let content = tokio::fs::read_to_string(path).await.ok()?;
    match serde_json::from_str::<Settings>(&content) {
        Ok(settings) => Some(settings),
        Err(err) => {
            tracing::warn!("ignoring undecodable settings file {}: {err}", path.display());
            None
        }
    }
}

async fn write_settings(path: &Path, settings: &Settings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_vec_pretty(settings)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}
