//! The command/notify channel.
//!
//! Owns the live connection set and the advertising lifecycle. Channel-level
//! states are `advertising` and `serving-connections`; per-peer state is
//! `connected` until the disconnect event removes it. Transient failures
//! never propagate to the control loop - the channel degrades by not
//! notifying and by re-advertising after a disconnect.

use heapless::Vec;

use crate::config::ChannelConfig;
use crate::error::{ChannelError, Result};

use super::radio::{
    PeerId, RadioEvent, RadioStack, ServiceHandles, ServiceSpec, MAX_ADV_PAYLOAD,
};

/// Maximum simultaneously connected peers.
pub const MAX_PEERS: usize = 4;

/// Maximum inbound command payload length in bytes. Longer writes are
/// treated as garbled and dropped.
pub const MAX_COMMAND_LEN: usize = 64;

/// An inbound command payload drained from the channel.
pub type CommandBytes = Vec<u8, MAX_COMMAND_LEN>;

/// Connection-oriented command/notify channel over a [`RadioStack`].
///
/// Inbound writes on the command characteristic land in a single pending
/// slot (latest wins) that the control loop drains on its next tick via
/// [`Self::take_command`] - the event path never does long work.
pub struct CommandChannel<R: RadioStack> {
    radio: R,
    handles: ServiceHandles,

    /// Live peers, consistent with the radio's connect/disconnect events.
    connections: Vec<PeerId, MAX_PEERS>,

    /// Latest undrained command payload.
    pending: Option<CommandBytes>,

    /// Advertising payload, pre-encoded by the platform glue.
    payload: Vec<u8, MAX_ADV_PAYLOAD>,
    interval_us: u32,

    /// Last commanded advertising state. The stack may stop advertising on
    /// its own while a peer is connected; this flag tracks only what the
    /// channel last asked for.
    advertising: bool,
}

impl<R: RadioStack> CommandChannel<R> {
    /// Activate the radio, register the rig service, and start advertising.
    ///
    /// `payload` is the pre-encoded advertising payload;
    /// [`super::advertising_payload`] builds the standard one from the
    /// configured device name.
    ///
    /// # Errors
    ///
    /// Activation, registration, a payload over 31 bytes, and a failed
    /// initial advertise are all fatal.
    pub fn start(mut radio: R, config: &ChannelConfig, payload: &[u8]) -> Result<Self> {
        radio.activate(true).map_err(|_| ChannelError::Activation)?;

        let handles = radio
            .register_service(&ServiceSpec::default())
            .map_err(|_| ChannelError::ServiceRegistration)?;

        let payload =
            Vec::from_slice(payload).map_err(|_| ChannelError::Advertising)?;

        let mut channel = Self {
            radio,
            handles,
            connections: Vec::new(),
            pending: None,
            payload,
            interval_us: config.adv_interval_us,
            advertising: false,
        };

        channel
            .radio
            .advertise(channel.interval_us, &channel.payload)
            .map_err(|_| ChannelError::Advertising)?;
        channel.advertising = true;

        Ok(channel)
    }

    /// Handle a radio event.
    ///
    /// - connect: add the peer to the live set (idempotent; advertising is
    ///   not assumed to have stopped)
    /// - disconnect: remove the peer, then unconditionally re-advertise so
    ///   the device stays discoverable
    /// - write: buffer the payload if it targets the command characteristic;
    ///   unknown characteristics and oversize payloads are dropped silently
    ///
    /// Never fails: transient radio errors are absorbed here.
    pub fn on_event(&mut self, event: RadioEvent<'_>) {
        match event {
            RadioEvent::Connected(peer) => {
                if !self.connections.contains(&peer) && self.connections.push(peer).is_err() {
                    // The radio stack's own connection limit should keep the
                    // table from filling; a dropped peer here means the two
                    // disagree and notifications will skip it.
                    #[cfg(feature = "defmt")]
                    defmt::warn!("channel: connection table full, dropped peer {}", peer);
                }
                #[cfg(feature = "defmt")]
                defmt::debug!("channel: peer {} connected", peer);
            }
            RadioEvent::Disconnected(peer) => {
                self.connections.retain(|p| *p != peer);
                #[cfg(feature = "defmt")]
                defmt::debug!("channel: peer {} disconnected, re-advertising", peer);
                self.advertise();
            }
            RadioEvent::Write {
                characteristic,
                data,
            } => {
                if characteristic == self.handles.command {
                    if let Ok(bytes) = Vec::from_slice(data) {
                        self.pending = Some(bytes);
                    }
                }
            }
        }
    }

    /// Drain the pending inbound command, if any.
    #[inline]
    pub fn take_command(&mut self) -> Option<CommandBytes> {
        self.pending.take()
    }

    /// Push `data` to every connected peer on the telemetry characteristic.
    ///
    /// An empty live set is a no-op. Per-peer failures are absorbed - there
    /// is no buffering or at-least-once delivery. Returns the number of
    /// peers notified.
    pub fn notify(&mut self, data: &[u8]) -> usize {
        let mut sent = 0;
        for peer in self.connections.iter() {
            if self
                .radio
                .notify(*peer, self.handles.telemetry, data)
                .is_ok()
            {
                sent += 1;
            }
        }
        sent
    }

    /// True iff at least one peer is connected.
    #[inline]
    pub fn is_connected(&self) -> bool {
        !self.connections.is_empty()
    }

    /// Number of connected peers.
    #[inline]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Last commanded advertising state.
    #[inline]
    pub fn is_advertising(&self) -> bool {
        self.advertising
    }

    /// Registered characteristic handles.
    #[inline]
    pub fn handles(&self) -> ServiceHandles {
        self.handles
    }

    /// Access the underlying radio stack.
    #[inline]
    pub fn radio(&self) -> &R {
        &self.radio
    }

    fn advertise(&mut self) {
        // A failed re-advertise is absorbed; the flag stays false until the
        // next disconnect attempt succeeds.
        self.advertising = self
            .radio
            .advertise(self.interval_us, &self.payload)
            .is_ok();
    }
}
