//! Radio stack seam.
//!
//! The peripheral-role radio (advertising, connections, GATT-style
//! characteristics) is an external collaborator. This module defines the
//! trait the channel consumes, the event type the platform glue delivers,
//! and the fixed service identity constants.

use crate::config::ChannelConfig;

/// Opaque identifier for a connected peer (connection handle).
pub type PeerId = u16;

/// Handle to a registered characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CharacteristicHandle(pub u16);

/// Handles returned by service registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServiceHandles {
    /// Write-target characteristic (command in).
    pub command: CharacteristicHandle,
    /// Notify-source characteristic (telemetry out).
    pub telemetry: CharacteristicHandle,
}

/// Maximum advertising payload length in bytes.
pub const MAX_ADV_PAYLOAD: usize = 31;

/// Advertising data type: flags.
const AD_TYPE_FLAGS: u8 = 0x01;
/// Advertising data type: complete local name.
const AD_TYPE_COMPLETE_NAME: u8 = 0x09;
/// Flags value: general discoverable, classic transport unsupported.
const AD_FLAGS_GENERAL_DISCOVERABLE: u8 = 0x06;

/// Encode a minimal advertising payload carrying the configured device name.
///
/// Layout: a flags structure followed by a complete-local-name structure.
/// Names longer than the payload allows are truncated (validation caps them
/// at 8 bytes, well inside the budget). Platform glue that needs service
/// UUIDs or vendor data in the payload can roll its own encoding instead;
/// the channel forwards whatever bytes it is started with.
pub fn advertising_payload(config: &ChannelConfig) -> heapless::Vec<u8, MAX_ADV_PAYLOAD> {
    let name = config.device_name.as_bytes();
    let name = &name[..name.len().min(MAX_ADV_PAYLOAD - 5)];

    let mut payload = heapless::Vec::new();
    // Both structures fit by construction; pushes cannot fail.
    let _ = payload.extend_from_slice(&[2, AD_TYPE_FLAGS, AD_FLAGS_GENERAL_DISCOVERABLE]);
    let _ = payload.push(name.len() as u8 + 1);
    let _ = payload.push(AD_TYPE_COMPLETE_NAME);
    let _ = payload.extend_from_slice(name);
    payload
}

/// Characteristic property: read.
pub const PROP_READ: u16 = 0x0002;
/// Characteristic property: write without response.
pub const PROP_WRITE_NO_RESPONSE: u16 = 0x0004;
/// Characteristic property: write.
pub const PROP_WRITE: u16 = 0x0008;
/// Characteristic property: notify.
pub const PROP_NOTIFY: u16 = 0x0010;

/// 128-bit UUID of the rig service.
pub const SERVICE_UUID: [u8; 16] = [
    0x6E, 0x40, 0x00, 0x01, 0xB5, 0xA3, 0xF3, 0x93, 0xE0, 0xA9, 0xE5, 0x0E, 0x24, 0xDC, 0xCA,
    0x9E,
];

/// 128-bit UUID of the command (write) characteristic.
pub const COMMAND_CHAR_UUID: [u8; 16] = [
    0x6E, 0x40, 0x00, 0x02, 0xB5, 0xA3, 0xF3, 0x93, 0xE0, 0xA9, 0xE5, 0x0E, 0x24, 0xDC, 0xCA,
    0x9E,
];

/// 128-bit UUID of the telemetry (notify) characteristic.
pub const TELEMETRY_CHAR_UUID: [u8; 16] = [
    0x6E, 0x40, 0x00, 0x03, 0xB5, 0xA3, 0xF3, 0x93, 0xE0, 0xA9, 0xE5, 0x0E, 0x24, 0xDC, 0xCA,
    0x9E,
];

/// Specification of the single service the channel registers: one
/// write-capable command characteristic and one notify-capable telemetry
/// characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSpec {
    /// Service UUID.
    pub service_uuid: [u8; 16],
    /// Command characteristic UUID.
    pub command_uuid: [u8; 16],
    /// Command characteristic properties.
    pub command_properties: u16,
    /// Telemetry characteristic UUID.
    pub telemetry_uuid: [u8; 16],
    /// Telemetry characteristic properties.
    pub telemetry_properties: u16,
}

impl Default for ServiceSpec {
    fn default() -> Self {
        Self {
            service_uuid: SERVICE_UUID,
            command_uuid: COMMAND_CHAR_UUID,
            command_properties: PROP_WRITE | PROP_WRITE_NO_RESPONSE,
            telemetry_uuid: TELEMETRY_CHAR_UUID,
            telemetry_properties: PROP_READ | PROP_NOTIFY,
        }
    }
}

/// Events delivered by the radio stack.
///
/// The platform glue translates its native callback/interrupt events into
/// this type and feeds them to [`crate::channel::CommandChannel::on_event`].
/// Handling is non-blocking by contract: only small channel state is
/// mutated, never a pulse train or other long work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioEvent<'a> {
    /// A central connected.
    Connected(PeerId),
    /// A peer disconnected.
    Disconnected(PeerId),
    /// An inbound write landed on a characteristic.
    Write {
        /// The characteristic that was written.
        characteristic: CharacteristicHandle,
        /// The written payload.
        data: &'a [u8],
    },
}

/// Generic peripheral-role radio stack.
///
/// Implementations own advertising-payload byte encoding and every
/// transport detail; the channel only sequences calls. Errors are opaque to
/// the channel: activation and registration failures are fatal, everything
/// else is absorbed.
pub trait RadioStack {
    /// Radio-specific error type.
    type Error: core::fmt::Debug;

    /// Activate or deactivate the peripheral role.
    fn activate(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Register the service and return characteristic handles.
    fn register_service(&mut self, spec: &ServiceSpec) -> Result<ServiceHandles, Self::Error>;

    /// Begin (or restart) advertising with the given payload.
    fn advertise(&mut self, interval_us: u32, payload: &[u8]) -> Result<(), Self::Error>;

    /// Push data to one peer on a notify-capable characteristic.
    fn notify(
        &mut self,
        peer: PeerId,
        characteristic: CharacteristicHandle,
        data: &[u8],
    ) -> Result<(), Self::Error>;
}
