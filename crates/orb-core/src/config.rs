use std::ops::Range;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Optional renderer layers.
///
/// The flash ring is always drawn; the layers here can be switched off to get
/// the plainer rendition of the orb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSet {
    /// Expanding charge ring armed when the orb starts thinking.
    pub charge: bool,
    /// Outward burst ring armed when a prediction is revealed.
    pub result_burst: bool,
    /// Concentric pulsing rings while thinking.
    pub thinking_rings: bool,
}

impl Default for EffectSet {
    fn default() -> Self {
        Self::all()
    }
}

impl EffectSet {
    /// Every optional layer enabled.
    pub fn all() -> Self {
        Self {
            charge: true,
            result_burst: true,
            thinking_rings: true,
        }
    }

    /// No optional layers: only the flash overlay remains.
    pub fn minimal() -> Self {
        Self {
            charge: false,
            result_burst: false,
            thinking_rings: false,
        }
    }
}

/// Configuration for an orb session.
#[derive(Debug, Clone)]
pub struct OrbConfig {
    /// RNG seed for effects, delays, and the default oracle.
    pub seed: u64,
    /// Suppress pulse, flicker, lightning, charge, and burst.
    pub reduced_motion: bool,
    /// Optional renderer layers.
    pub effects: EffectSet,
    /// Range of the simulated "processing" delay in milliseconds.
    pub delay_ms: Range<u64>,
    /// Canonical page URL embedded in share links.
    pub page_url: String,
    /// Maximum characters of prediction text carried in a share link.
    pub share_text_budget: usize,
    /// Directory that receives downloaded artifacts.
    pub download_dir: PathBuf,
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            reduced_motion: false,
            effects: EffectSet::all(),
            delay_ms: 1500..3500,
            page_url: "https://the-ball-of-predictions.app/".to_string(),
            share_text_budget: 180,
            download_dir: PathBuf::from("."),
        }
    }
}

impl OrbConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Honor (or ignore) the reduced-motion preference.
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Set the optional renderer layers.
    pub fn with_effects(mut self, effects: EffectSet) -> Self {
        self.effects = effects;
        self
    }

    /// Set the delay range in milliseconds. An empty range collapses to its start.
    pub fn with_delay_ms(mut self, delay: Range<u64>) -> Self {
        self.delay_ms = delay;
        self
    }

    /// Set the canonical page URL used in share links.
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = url.into();
        self
    }

    /// Set the share text budget (at least one character).
    pub fn with_share_text_budget(mut self, budget: usize) -> Self {
        self.share_text_budget = budget.max(1);
        self
    }

    /// Set the download directory.
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = OrbConfig::default();
        assert_eq!(cfg.seed, 42);
        assert!(!cfg.reduced_motion);
        assert_eq!(cfg.effects, EffectSet::all());
        assert_eq!(cfg.delay_ms, 1500..3500);
        assert_eq!(cfg.download_dir, PathBuf::from("."));
    }

    #[test]
    fn builder_chain() {
        let cfg = OrbConfig::default()
            .with_seed(7)
            .with_reduced_motion(true)
            .with_effects(EffectSet::minimal())
            .with_delay_ms(0..1)
            .with_page_url("https://example.org/orb")
            .with_download_dir("/tmp/orb");
        assert_eq!(cfg.seed, 7);
        assert!(cfg.reduced_motion);
        assert!(!cfg.effects.charge);
        assert_eq!(cfg.delay_ms, 0..1);
        assert_eq!(cfg.page_url, "https://example.org/orb");
        assert_eq!(cfg.download_dir, PathBuf::from("/tmp/orb"));
    }

    #[test]
    fn share_budget_clamped() {
        let cfg = OrbConfig::default().with_share_text_budget(0);
        assert_eq!(cfg.share_text_budget, 1);
    }
}
