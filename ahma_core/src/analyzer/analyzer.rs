use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::utils::finite;
use crate::config::ahma_config::{AhmaConfig, PartialConfig};
use crate::math::{
    adaptive::adaptive_smooth,
    hma::{hma, HullLengths},
};

/// Index-aligned HMA and AHMA output; `None` marks an absent value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AhmaSeries {
    pub hma: Vec<Option<f64>>,
    pub ahma: Vec<Option<f64>>,
}

impl AhmaSeries {
    pub fn len(&self) -> usize {
        self.hma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hma.is_empty()
    }
}

/// Map every non-finite sample to missing
pub fn sanitize(prices: &[f64]) -> Vec<Option<f64>> {
    prices.iter().copied().map(finite).collect()
}

/// Runs the WMA -> HMA -> adaptive smoothing pipeline for a fixed configuration
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Analyzer {
    config: AhmaConfig,
}

impl Analyzer {
    pub fn new(config: AhmaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AhmaConfig {
        &self.config
    }

    pub fn run(&self, prices: &[f64]) -> AhmaSeries {
        let samples = sanitize(prices);
        let missing = samples.iter().filter(|v| v.is_none()).count();

        let hma = hma(&samples, self.config.hull_length);
        let ahma = adaptive_smooth(
            &hma,
            self.config.adaptive_window,
            self.config.fast_period,
            self.config.slow_period,
        );

        debug!(
            samples = samples.len(),
            missing,
            warmup = HullLengths::from_length(self.config.hull_length).warmup(),
            present = ahma.iter().filter(|v| v.is_some()).count(),
            "ahma computed"
        );

        AhmaSeries { hma, ahma }
    }
}

/// Compute HMA and AHMA for `prices`, filling unset parameters with defaults
pub fn calculate_ahma(prices: &[f64], config: Option<&PartialConfig>) -> AhmaSeries {
    let config = config.map(AhmaConfig::resolve).unwrap_or_default();
    debug!(?config, "resolved ahma config");
    Analyzer::new(config).run(prices)
}
