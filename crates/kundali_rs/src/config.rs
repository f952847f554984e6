//! Engine configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! ayanamsha = "lahiri"
//! house_system = "sripati"
//! default_birth_time = "12:00"
//! dasha_depth = 2
//!
//! [returns]
//! tolerance_deg = 0.0001
//! max_iterations = 50
//! horizon_factor = 1.5
//!
//! [transits]
//! step_days = 1.0
//! max_samples = 20000
//!
//! [[aspects]]
//! name = "conjunction"
//! angle_deg = 0.0
//! orb_deg = 8.0
//! ```
//!
//! When `aspects` is absent the default five-aspect table is used.

use std::path::Path;

use kundali_search::{ReturnConfig, TransitConfig};
use kundali_time::ResolverConfig;
use kundali_vedic_base::dasha::DEFAULT_DASHA_DEPTH;
use kundali_vedic_base::{
    Aspect, AspectTable, AyanamshaSystem, BhavaSystem, ChartConfig, DashaTreeBuilder,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::KundaliError;

/// `[returns]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReturnsSection {
    pub tolerance_deg: f64,
    pub max_iterations: u32,
    pub horizon_factor: f64,
}

impl Default for ReturnsSection {
    fn default() -> Self {
        let d = ReturnConfig::default();
        Self {
            tolerance_deg: d.tolerance_deg,
            max_iterations: d.max_iterations,
            horizon_factor: d.horizon_factor,
        }
    }
}

/// `[transits]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitsSection {
    pub step_days: f64,
    pub max_samples: u32,
}

impl Default for TransitsSection {
    fn default() -> Self {
        let d = TransitConfig::default();
        Self {
            step_days: d.step_days,
            max_samples: d.max_samples,
        }
    }
}

/// One `[[aspects]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AspectEntry {
    pub name: String,
    pub angle_deg: f64,
    pub orb_deg: f64,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KundaliConfig {
    pub ayanamsha: AyanamshaSystem,
    pub house_system: BhavaSystem,
    /// Local time assumed when a birth time is missing.
    pub default_birth_time: String,
    pub dasha_depth: u8,
    pub returns: ReturnsSection,
    pub transits: TransitsSection,
    /// Empty means the default aspect table.
    pub aspects: Vec<AspectEntry>,
}

impl Default for KundaliConfig {
    fn default() -> Self {
        Self {
            ayanamsha: AyanamshaSystem::default(),
            house_system: BhavaSystem::default(),
            default_birth_time: "12:00".to_string(),
            dasha_depth: DEFAULT_DASHA_DEPTH,
            returns: ReturnsSection::default(),
            transits: TransitsSection::default(),
            aspects: Vec::new(),
        }
    }
}

impl KundaliConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, KundaliError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KundaliError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| KundaliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Check every section by building the engine objects it configures.
    pub fn validate(&self) -> Result<(), KundaliError> {
        self.resolver_config()
            .map_err(|e| KundaliError::Config(format!("default_birth_time: {e}")))?;
        DashaTreeBuilder::new(self.dasha_depth)
            .map_err(|e| KundaliError::Config(format!("dasha_depth: {e}")))?;
        self.return_config()
            .validate()
            .map_err(|e| KundaliError::Config(format!("returns: {e}")))?;
        self.transit_config()
            .validate()
            .map_err(|e| KundaliError::Config(format!("transits: {e}")))?;
        self.aspect_table()?;
        Ok(())
    }

    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig {
            ayanamsha: self.ayanamsha,
            house_system: self.house_system,
        }
    }

    pub fn resolver_config(&self) -> Result<ResolverConfig, KundaliError> {
        Ok(ResolverConfig::with_default_time(&self.default_birth_time)?)
    }

    pub fn return_config(&self) -> ReturnConfig {
        ReturnConfig {
            tolerance_deg: self.returns.tolerance_deg,
            max_iterations: self.returns.max_iterations,
            horizon_factor: self.returns.horizon_factor,
        }
    }

    pub fn transit_config(&self) -> TransitConfig {
        TransitConfig {
            step_days: self.transits.step_days,
            max_samples: self.transits.max_samples,
            ..TransitConfig::default()
        }
    }

    pub fn aspect_table(&self) -> Result<AspectTable, KundaliError> {
        if self.aspects.is_empty() {
            return Ok(AspectTable::default());
        }
        let aspects = self
            .aspects
            .iter()
            .map(|a| Aspect::new(a.name.clone(), a.angle_deg, a.orb_deg))
            .collect();
        AspectTable::new(aspects).map_err(|e| KundaliError::Config(format!("aspects: {e}")))
    }
}
