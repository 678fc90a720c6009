//! Configuration for Kohonen map training and sample generation.

use crate::error::{KohonenError, Result};
use serde::{Deserialize, Serialize};

/// Main configuration bundling training and sampling settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Training loop configuration.
    pub training: TrainingConfig,

    /// Sample and neuron generation configuration.
    pub sampling: SamplingConfig,
}

impl Config {
    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        self.training.validate()?;
        self.sampling.validate()
    }
}

/// How the left edge of an open chain is treated during propagation.
///
/// With `Inclusive`, the neighbor at `winner - d` is updated whenever it is a
/// valid index (`>= 0`), so index 0 can be pulled. With `Exclusive`, only
/// indices strictly greater than 0 are reached, so index 0 moves only when it
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainBoundary {
    /// `winner - d >= 0` is updated.
    #[default]
    Inclusive,
    /// `winner - d > 0` is updated.
    Exclusive,
}

/// Training loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of full passes over the sample sequence.
    /// Default: 10.
    pub passes: usize,

    /// Shuffle the sample sequence at the start of every pass.
    /// Default: true.
    pub shuffle: bool,

    /// Random seed for the shuffle.
    /// Default: None (random).
    pub seed: Option<u64>,

    /// Hand a snapshot to the visualizer every N samples within a pass.
    /// 0 disables per-sample snapshots; start and finish are always reported.
    /// Default: 10.
    pub snapshot_every: usize,

    /// Left-boundary rule for the chain topology.
    /// Default: inclusive.
    pub chain_boundary: ChainBoundary,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            passes: crate::DEFAULT_PASSES,
            shuffle: true,
            seed: None,
            snapshot_every: 10,
            chain_boundary: ChainBoundary::Inclusive,
        }
    }
}

impl TrainingConfig {
    /// Rejects a configuration that cannot drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.passes == 0 {
            return Err(KohonenError::InvalidConfiguration(
                "pass count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shape of the region training samples are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SampleDistribution {
    /// Uniform over a disk centered at the origin.
    Disk {
        /// Disk radius.
        radius: f64,
    },
    /// Uniform over the ring between two concentric circles.
    Annulus {
        /// Inner radius.
        inner: f64,
        /// Outer radius.
        outer: f64,
    },
    /// Half the samples in a disk of `radius / 2`, half in a disk of `radius`.
    ///
    /// The inner region ends up roughly five times denser than the rim.
    Mixed {
        /// Outer disk radius.
        radius: f64,
    },
}

impl Default for SampleDistribution {
    fn default() -> Self {
        SampleDistribution::Disk { radius: 2.0 }
    }
}

impl SampleDistribution {
    /// Radius of the smallest origin-centered disk covering the distribution.
    pub fn outer_radius(&self) -> f64 {
        match *self {
            SampleDistribution::Disk { radius } => radius,
            SampleDistribution::Annulus { outer, .. } => outer,
            SampleDistribution::Mixed { radius } => radius,
        }
    }

    /// Checks that the radii describe a non-empty region.
    pub fn validate(&self) -> Result<()> {
        match *self {
            SampleDistribution::Disk { radius } | SampleDistribution::Mixed { radius } => {
                if !(radius > 0.0) {
                    return Err(KohonenError::InvalidConfiguration(format!(
                        "disk radius must be positive, got {}",
                        radius
                    )));
                }
            }
            SampleDistribution::Annulus { inner, outer } => {
                if !(inner >= 0.0) || !(outer > inner) {
                    return Err(KohonenError::InvalidConfiguration(format!(
                        "annulus needs 0 <= inner < outer, got inner={} outer={}",
                        inner, outer
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Sample and neuron generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Number of training samples.
    /// Default: 200.
    pub sample_count: usize,

    /// Region samples are drawn from.
    /// Default: disk of radius 2.
    pub distribution: SampleDistribution,

    /// Number of neurons for chain and ring maps (grid maps are always 5x5).
    /// Default: 30.
    pub neuron_count: usize,

    /// Initial neuron coordinates are uniform in `[-h, h]` on both axes.
    /// Default: 0.2.
    pub init_half_range: f64,

    /// Random seed for sample and neuron generation.
    /// Default: None (random).
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_count: 200,
            distribution: SampleDistribution::default(),
            neuron_count: 30,
            init_half_range: 0.2,
            seed: None,
        }
    }
}

impl SamplingConfig {
    /// Rejects parameters the generators cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.neuron_count == 0 {
            return Err(KohonenError::InvalidConfiguration(
                "neuron count must be at least 1".to_string(),
            ));
        }
        if !(self.init_half_range >= 0.0) {
            return Err(KohonenError::InvalidConfiguration(format!(
                "initial half range must be non-negative, got {}",
                self.init_half_range
            )));
        }
        self.distribution.validate()
    }
}
