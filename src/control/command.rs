//! Inbound command dispatch.
//!
//! The command payload format is opaque to this crate: every received
//! payload is echoed back to all connected peers with a fixed tag, and a
//! [`CommandParser`] seam lets the integrator map bytes onto rig commands.
//! The default parser maps nothing, which leaves the channel a pure echo
//! path.

use crate::stepper::MoveRequest;
use crate::throttle::DriveDirection;

/// A command decoded from an inbound payload.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RigCommand {
    /// Run one stepper move.
    Move(MoveRequest),
    /// Override the switch-derived drive direction for subsequent ticks.
    Drive(DriveDirection),
}

/// Maps opaque inbound payload bytes onto [`RigCommand`]s.
///
/// Returning `None` means the payload carried no command; it is still
/// echoed, never an error.
pub trait CommandParser {
    /// Parse one payload.
    fn parse(&mut self, payload: &[u8]) -> Option<RigCommand>;
}

/// Default parser: payloads are echo-only, nothing is dispatched.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoOnly;

impl CommandParser for EchoOnly {
    fn parse(&mut self, _payload: &[u8]) -> Option<RigCommand> {
        None
    }
}
