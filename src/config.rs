//! Page configuration.
//!
//! Every knob has the default the enhancements ship with, so an empty TOML
//! document (or `PageConfig::default()`) reproduces the stock behaviour.
//!
//! ```toml
//! [navigation]
//! header_offset = 80.0
//!
//! [reveal]
//! root_margin = "0px 0px -50px 0px"
//!
//! [counter]
//! duration_ms = 2500
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PageError, Result};
use crate::pipeline::RootMargin;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub navigation: NavigationConfig,
    pub reveal: RevealConfig,
    pub scroll_top: ScrollTopConfig,
    pub counter: CounterConfig,
    pub ripple: RippleConfig,
    pub lazy: LazyConfig,
    pub typing: TypingConfig,
    pub fonts: FontsConfig,
    pub service_worker: ServiceWorkerConfig,
    pub smooth_scroll: SmoothScrollConfig,
}

impl PageConfig {
    /// Parse a TOML document. Missing sections and keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| PageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Height of the fixed header subtracted from anchor destinations.
    pub header_offset: f32,
    /// Viewport line a section must straddle to become active.
    pub active_line: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { header_offset: 80.0, active_line: 100.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f32,
    pub root_margin: RootMargin,
    /// Initial downward offset in px.
    pub offset: f32,
    pub duration_s: f32,
    /// Extra delay per benefit card, by index.
    pub stagger_s: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: RootMargin::new(0.0, 0.0, -50.0, 0.0),
            offset: 30.0,
            duration_s: 0.6,
            stagger_s: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollTopConfig {
    /// Offset above which the control shows (strictly greater).
    pub threshold: f32,
}

impl Default for ScrollTopConfig {
    fn default() -> Self {
        Self { threshold: 300.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub threshold: f32,
    pub start_delay_ms: u64,
    pub duration_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self { threshold: 0.5, start_delay_ms: 300, duration_ms: 2500 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    pub lifetime_ms: u64,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self { lifetime_ms: 600 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LazyConfig {
    pub root_margin: RootMargin,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self { root_margin: RootMargin::new(50.0, 0.0, 50.0, 0.0) }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub speed_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self { speed_ms: 80 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    /// CSS font shorthand descriptors, all of which must load.
    pub faces: Vec<String>,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            faces: vec![
                "normal 1em XLSMARTSans-Regular".to_string(),
                "600 1em XLSMARTSans-SemiBold".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceWorkerConfig {
    pub script: String,
}

impl Default for ServiceWorkerConfig {
    fn default() -> Self {
        Self { script: "/sw.js".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    /// Fraction of the remaining distance covered per frame.
    pub speed: f32,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self { speed: 0.25 }
    }
}
