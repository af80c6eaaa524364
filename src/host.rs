//! Host capabilities.
//!
//! Everything the enhancements need from the outside world that may or may
//! not exist: the clock, the font loading API, service worker support and a
//! web vitals source. Every optional capability has a `supports_*` probe;
//! callers check it first and skip the feature silently when it is absent.

use chrono::Datelike;

use crate::error::{PageError, Result};

/// The five core web vitals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VitalMetric {
    Cls,
    Fid,
    Fcp,
    Lcp,
    Ttfb,
}

impl VitalMetric {
    pub const ALL: [VitalMetric; 5] = [
        VitalMetric::Cls,
        VitalMetric::Fid,
        VitalMetric::Fcp,
        VitalMetric::Lcp,
        VitalMetric::Ttfb,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VitalMetric::Cls => "CLS",
            VitalMetric::Fid => "FID",
            VitalMetric::Fcp => "FCP",
            VitalMetric::Lcp => "LCP",
            VitalMetric::Ttfb => "TTFB",
        }
    }
}

pub trait Host {
    /// Calendar year for the footer stamp.
    fn current_year(&self) -> i32;

    fn supports_fonts(&self) -> bool {
        false
    }

    /// Load one font face given as CSS font shorthand.
    fn load_font(&mut self, descriptor: &str) -> Result<()> {
        Err(PageError::FontLoad {
            descriptor: descriptor.to_string(),
            reason: "font loading is not supported".to_string(),
        })
    }

    fn supports_service_worker(&self) -> bool {
        false
    }

    /// Register the worker script at `script`. Returns the registration scope.
    fn register_service_worker(&mut self, script: &str) -> Result<String> {
        Err(PageError::ServiceWorker(format!("cannot register {script}: unsupported")))
    }

    fn supports_web_vitals(&self) -> bool {
        false
    }

    fn web_vital(&self, _metric: VitalMetric) -> Option<f64> {
        None
    }
}

/// Host with only a system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    fn current_year(&self) -> i32 {
        chrono::Local::now().year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_host_has_no_optional_capabilities() {
        let mut host = SystemHost;
        assert!(!host.supports_fonts());
        assert!(!host.supports_service_worker());
        assert!(!host.supports_web_vitals());
        assert!(host.load_font("normal 1em Foo").is_err());
        assert!(host.register_service_worker("/sw.js").is_err());
        assert_eq!(host.web_vital(VitalMetric::Lcp), None);
    }

    #[test]
    fn test_system_host_year() {
        assert!(SystemHost.current_year() >= 2024);
    }

    #[test]
    fn test_metric_names() {
        let names: Vec<_> = VitalMetric::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["CLS", "FID", "FCP", "LCP", "TTFB"]);
    }
}
