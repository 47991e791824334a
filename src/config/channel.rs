//! Command/notify channel configuration.

use heapless::String;
use serde::Deserialize;

/// Maximum echo tag length in bytes.
pub const MAX_TAG_LEN: usize = 16;

/// Command/notify channel parameters.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    /// Short device name carried in the advertising payload (1-8 bytes).
    /// Consumed by [`crate::channel::advertising_payload`]; glue that encodes
    /// its own payload must embed the name itself.
    #[serde(default = "default_device_name")]
    pub device_name: String<32>,

    /// Advertising interval in microseconds.
    #[serde(default = "default_adv_interval_us")]
    pub adv_interval_us: u32,

    /// Fixed tag prefixed to every echoed command payload.
    #[serde(default = "default_echo_tag")]
    pub echo_tag: String<MAX_TAG_LEN>,
}

fn default_device_name() -> String<32> {
    String::try_from("mtinet").unwrap_or_default()
}

fn default_adv_interval_us() -> u32 {
    500_000
}

fn default_echo_tag() -> String<MAX_TAG_LEN> {
    String::try_from("rig: ").unwrap_or_default()
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
            adv_interval_us: default_adv_interval_us(),
            echo_tag: default_echo_tag(),
        }
    }
}
