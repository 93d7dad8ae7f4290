//! Play settings for the terminal front end.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use quest_core::ContentPack;
use quest_core::content::DEFAULT_HERO_NAME;
use serde::{Deserialize, Serialize};

pub const CONFIG_FORMAT_VERSION: u32 = 1;
pub const PACING_ENV: &str = "MATHQUEST_PACING";
const FAST_PACING_DIVISOR: u32 = 4;

/// How literally the battle's beat delays are honoured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    #[default]
    Realtime,
    Fast,
    Off,
}

impl Pacing {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "realtime" | "on" | "1" => Some(Self::Realtime),
            "fast" => Some(Self::Fast),
            "off" | "none" | "0" => Some(Self::Off),
            _ => None,
        }
    }

    pub fn scale(self, delay: Duration) -> Duration {
        match self {
            Self::Realtime => delay,
            Self::Fast => delay / FAST_PACING_DIVISOR,
            Self::Off => Duration::ZERO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub format_version: u32,
    pub hero_name: String,
    pub pacing: Pacing,
    /// Per-character reveal delay for narrative lines. Zero prints whole lines.
    pub typing_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            format_version: CONFIG_FORMAT_VERSION,
            hero_name: DEFAULT_HERO_NAME.to_string(),
            pacing: Pacing::Realtime,
            typing_ms: 30,
            seed: None,
        }
    }
}

impl PlayConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read play config: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse play config TOML: {}", path.display()))?;
        Ok(config)
    }

    /// Missing file means defaults; a present but broken file is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let tmp_path = path.with_extension("toml.tmp");
        let body = toml::to_string_pretty(self).context("Failed to serialize play config")?;
        fs::write(&tmp_path, body)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to move config into place: {}", path.display()))?;
        Ok(())
    }

    /// An override that parses wins over the file; anything else is ignored.
    pub fn resolve_pacing(&self, pacing_override: Option<&str>) -> Pacing {
        pacing_override.and_then(Pacing::parse).unwrap_or(self.pacing)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_ms)
    }

    pub fn content(&self) -> ContentPack {
        let name = self.hero_name.trim();
        let name = if name.is_empty() { DEFAULT_HERO_NAME } else { name };
        ContentPack::default().with_hero_name(name)
    }
}
