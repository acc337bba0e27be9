// File: crates/trend-core/src/config.rs
// Summary: Extraction settings (chart scale, classifier rules, output shape) with TOML loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::ClassifyOptions;
use crate::error::{Result, TrendError};
use crate::table::JoinMode;

/// Chart units spanned by the reference frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Percentage points from the baseline to each outer reference line.
    pub yspan: f64,
    /// Days covered by the x-axis reference line.
    pub xspan: u32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self { yspan: 80.0, xspan: 42 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub join: JoinMode,
    /// Also render a PNG plot per drawing.
    pub plots: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub scale: ScaleConfig,
    pub classify: ClassifyOptions,
    pub output: OutputConfig,
}

impl ExtractConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| TrendError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| TrendError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.scale.yspan.is_finite() && self.scale.yspan > 0.0) {
            return Err(TrendError::Config(format!(
                "scale.yspan must be a positive number, got {}",
                self.scale.yspan
            )));
        }
        if self.scale.xspan == 0 {
            return Err(TrendError::Config("scale.xspan must be at least 1 day".into()));
        }
        Ok(())
    }
}
