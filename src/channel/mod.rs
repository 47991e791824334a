//! Command/notify channel for rig-control.
//!
//! A connection-oriented, multi-peer publish/notify channel layered over a
//! generic peripheral radio role. The radio stack itself (including
//! advertising-payload byte encoding) sits behind the [`RadioStack`] trait,
//! so the channel's lifecycle logic is host-testable.

mod peripheral;
mod radio;

pub use peripheral::{CommandBytes, CommandChannel, MAX_COMMAND_LEN, MAX_PEERS};
pub use radio::{
    advertising_payload, CharacteristicHandle, PeerId, RadioEvent, RadioStack, ServiceHandles,
    ServiceSpec, COMMAND_CHAR_UUID, MAX_ADV_PAYLOAD, PROP_NOTIFY, PROP_READ, PROP_WRITE,
    PROP_WRITE_NO_RESPONSE, SERVICE_UUID, TELEMETRY_CHAR_UUID,
};
