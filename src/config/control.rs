//! Control loop configuration.

use serde::Deserialize;

/// Control loop cadence parameters.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlConfig {
    /// Fixed inter-tick delay in milliseconds (valid: 10-1000).
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u32,
}

fn default_tick_ms() -> u32 {
    100
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ControlConfig::default().tick_ms, 100);
    }
}
