//! The fixed-cadence control loop.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use heapless::String;

use crate::channel::{CommandChannel, RadioStack, MAX_COMMAND_LEN};
use crate::config::{SystemConfig, MAX_TAG_LEN};
use crate::error::{DriveError, Result};
use crate::throttle::{DriveDirection, ThrottleMapper};

use super::command::{CommandParser, RigCommand};
use super::hal::{DriveActuator, StepperActuator, ThrottleAdc};

/// Top-level orchestrator.
///
/// One tick: sample throttle and switch, apply the mapped drive command as
/// one atomic update, drain and dispatch the pending channel command, then
/// sleep the fixed inter-tick delay. Channel events arrive asynchronously
/// via [`Self::channel_mut`]; the loop never blocks waiting for them, but it
/// may block for a full stepper pulse train while dispatching a move.
pub struct ControlLoop<ADC, SW, DRV, STP, R, D, P>
where
    ADC: ThrottleAdc,
    SW: InputPin,
    DRV: DriveActuator,
    STP: StepperActuator,
    R: RadioStack,
    D: DelayNs,
    P: CommandParser,
{
    adc: ADC,
    switch: SW,
    mapper: ThrottleMapper,
    drive: DRV,
    stepper: STP,
    channel: CommandChannel<R>,
    delay: D,
    parser: P,

    tick_ms: u32,
    echo_tag: String<MAX_TAG_LEN>,

    /// Remote direction override; when set it replaces the switch reading.
    direction_override: Option<DriveDirection>,
}

impl<ADC, SW, DRV, STP, R, D, P> ControlLoop<ADC, SW, DRV, STP, R, D, P>
where
    ADC: ThrottleAdc,
    SW: InputPin,
    DRV: DriveActuator,
    STP: StepperActuator,
    R: RadioStack,
    D: DelayNs,
    P: CommandParser,
{
    /// Assemble a control loop from configuration and wired components.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: &SystemConfig,
        adc: ADC,
        switch: SW,
        drive: DRV,
        stepper: STP,
        channel: CommandChannel<R>,
        delay: D,
        parser: P,
    ) -> Self {
        Self {
            adc,
            switch,
            mapper: ThrottleMapper::new(config.throttle.clone()),
            drive,
            stepper,
            channel,
            delay,
            parser,
            tick_ms: config.control.tick_ms,
            echo_tag: config.channel.echo_tag.clone(),
            direction_override: None,
        }
    }

    /// The channel, for injecting radio events from the platform glue.
    #[inline]
    pub fn channel_mut(&mut self) -> &mut CommandChannel<R> {
        &mut self.channel
    }

    /// The channel, read-only.
    #[inline]
    pub fn channel(&self) -> &CommandChannel<R> {
        &self.channel
    }

    /// The stepper actuator.
    #[inline]
    pub fn stepper(&self) -> &STP {
        &self.stepper
    }

    /// Clear a remote direction override; the switch takes over again.
    pub fn clear_direction_override(&mut self) {
        self.direction_override = None;
    }

    /// Run one control cycle.
    ///
    /// # Errors
    ///
    /// Only fatal HAL failures (pins, PWM) escape; everything the channel
    /// can absorb has already been absorbed.
    pub fn tick(&mut self) -> Result<()> {
        // Sensors -> mapper -> atomic drive update. A switch pin failure is
        // a drive-path hardware fault.
        let sample = self.adc.read();
        let switch_forward = self.switch.is_high().map_err(|_| DriveError::Pin)?;
        let mut cmd = self.mapper.map(sample, switch_forward);
        if let Some(direction) = self.direction_override {
            cmd.direction = direction;
        }
        self.drive.apply(cmd)?;

        // Channel events -> command dispatch. Every payload is echoed with
        // the fixed tag; the parser decides whether it also carries a
        // command.
        if let Some(payload) = self.channel.take_command() {
            self.echo(&payload);
            match self.parser.parse(&payload) {
                Some(RigCommand::Move(request)) => {
                    // Blocking pulse train; uninterruptible by design.
                    let _outcome = self.stepper.execute(request)?;
                }
                Some(RigCommand::Drive(direction)) => {
                    self.direction_override = Some(direction);
                }
                None => {}
            }
        }

        self.delay.delay_ms(self.tick_ms);
        Ok(())
    }

    /// Run ticks forever; returns only on a fatal HAL error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.tick()?;
        }
    }

    fn echo(&mut self, payload: &[u8]) {
        let mut frame: heapless::Vec<u8, { MAX_TAG_LEN + MAX_COMMAND_LEN }> = heapless::Vec::new();
        // Both bounds hold by construction; pushes cannot fail.
        let _ = frame.extend_from_slice(self.echo_tag.as_bytes());
        let _ = frame.extend_from_slice(payload);
        self.channel.notify(&frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{
        CharacteristicHandle, PeerId, RadioEvent, ServiceHandles, ServiceSpec,
    };
    use crate::config::Degrees;
    use crate::stepper::{MoveOutcome, MoveRequest, StepDirection};
    use crate::throttle::DriveCommand;

    const COMMAND: CharacteristicHandle = CharacteristicHandle(3);
    const TELEMETRY: CharacteristicHandle = CharacteristicHandle(5);

    struct FixedAdc(u16);

    impl ThrottleAdc for FixedAdc {
        fn read(&mut self) -> u16 {
            self.0
        }
    }

    #[derive(Default)]
    struct FixedSwitch(bool);

    impl embedded_hal::digital::ErrorType for FixedSwitch {
        type Error = core::convert::Infallible;
    }

    impl InputPin for FixedSwitch {
        fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    #[derive(Default)]
    struct RecordingDrive {
        applied: std::vec::Vec<DriveCommand>,
    }

    impl DriveActuator for RecordingDrive {
        fn apply(&mut self, cmd: DriveCommand) -> Result<()> {
            self.applied.push(cmd);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingStepper {
        position: i32,
        moves: std::vec::Vec<MoveRequest>,
    }

    impl StepperActuator for RecordingStepper {
        fn execute(&mut self, request: MoveRequest) -> Result<MoveOutcome> {
            self.moves.push(request);
            match request.direction {
                StepDirection::Left => self.position -= 1,
                StepDirection::Right => self.position += 1,
            }
            Ok(MoveOutcome {
                position: self.position,
                pulses_emitted: 100,
                at_limit: false,
            })
        }

        fn position(&self) -> i32 {
            self.position
        }
    }

    #[derive(Default)]
    struct MockRadio {
        notified: std::vec::Vec<(PeerId, std::vec::Vec<u8>)>,
    }

    impl RadioStack for MockRadio {
        type Error = ();

        fn activate(&mut self, _on: bool) -> core::result::Result<(), ()> {
            Ok(())
        }

        fn register_service(
            &mut self,
            _spec: &ServiceSpec,
        ) -> core::result::Result<ServiceHandles, ()> {
            Ok(ServiceHandles {
                command: COMMAND,
                telemetry: TELEMETRY,
            })
        }

        fn advertise(&mut self, _interval_us: u32, _payload: &[u8]) -> core::result::Result<(), ()> {
            Ok(())
        }

        fn notify(
            &mut self,
            peer: PeerId,
            _characteristic: CharacteristicHandle,
            data: &[u8],
        ) -> core::result::Result<(), ()> {
            self.notified.push((peer, data.to_vec()));
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Single-letter test protocol.
    struct LetterParser;

    impl CommandParser for LetterParser {
        fn parse(&mut self, payload: &[u8]) -> Option<RigCommand> {
            match payload {
                b"L" => Some(RigCommand::Move(MoveRequest::new(
                    StepDirection::Left,
                    Degrees(30.0),
                ))),
                b"R" => Some(RigCommand::Move(MoveRequest::new(
                    StepDirection::Right,
                    Degrees(30.0),
                ))),
                b"F" => Some(RigCommand::Drive(DriveDirection::Forward)),
                _ => None,
            }
        }
    }

    type TestLoop = ControlLoop<
        FixedAdc,
        FixedSwitch,
        RecordingDrive,
        RecordingStepper,
        MockRadio,
        NoDelay,
        LetterParser,
    >;

    fn control_loop(sample: u16, forward: bool) -> TestLoop {
        let config = SystemConfig::default();
        let channel =
            CommandChannel::start(MockRadio::default(), &config.channel, b"adv").unwrap();
        ControlLoop::new(
            &config,
            FixedAdc(sample),
            FixedSwitch(forward),
            RecordingDrive::default(),
            RecordingStepper::default(),
            channel,
            NoDelay,
            LetterParser,
        )
    }

    #[test]
    fn test_tick_applies_mapped_drive() {
        let mut rig = control_loop(10_000, true);
        rig.tick().unwrap();

        assert_eq!(rig.drive.applied.len(), 1);
        let cmd = rig.drive.applied[0];
        assert_eq!(cmd.magnitude, 0);
        assert_eq!(cmd.direction, DriveDirection::Forward);
    }

    #[test]
    fn test_tick_dispatches_move_command() {
        let mut rig = control_loop(10_000, true);
        rig.channel_mut().on_event(RadioEvent::Connected(1));
        rig.channel_mut().on_event(RadioEvent::Write {
            characteristic: COMMAND,
            data: b"L",
        });

        rig.tick().unwrap();

        assert_eq!(rig.stepper.moves.len(), 1);
        assert_eq!(rig.stepper.moves[0].direction, StepDirection::Left);
        assert_eq!(rig.stepper().position(), -1);
    }

    #[test]
    fn test_tick_echoes_with_tag() {
        let mut rig = control_loop(10_000, true);
        rig.channel_mut().on_event(RadioEvent::Connected(1));
        rig.channel_mut().on_event(RadioEvent::Write {
            characteristic: COMMAND,
            data: b"hello",
        });

        rig.tick().unwrap();

        let notified = &rig.channel().radio().notified;
        assert_eq!(notified.len(), 1);
        assert_eq!(notified[0].1.as_slice(), b"rig: hello");
    }

    #[test]
    fn test_unparsed_payload_is_echo_only() {
        let mut rig = control_loop(10_000, true);
        rig.channel_mut().on_event(RadioEvent::Connected(1));
        rig.channel_mut().on_event(RadioEvent::Write {
            characteristic: COMMAND,
            data: b"garbage",
        });

        rig.tick().unwrap();

        assert!(rig.stepper.moves.is_empty());
        assert_eq!(rig.channel().radio().notified.len(), 1);
    }

    #[test]
    fn test_direction_override_persists() {
        let mut rig = control_loop(30_000, false);
        rig.channel_mut().on_event(RadioEvent::Write {
            characteristic: COMMAND,
            data: b"F",
        });

        rig.tick().unwrap();
        // Override applies from the next tick onward.
        rig.tick().unwrap();
        assert_eq!(rig.drive.applied[1].direction, DriveDirection::Forward);

        rig.clear_direction_override();
        rig.tick().unwrap();
        assert_eq!(rig.drive.applied[2].direction, DriveDirection::Backward);
    }

    #[test]
    fn test_command_without_peers_still_dispatches() {
        // The echo is a no-op with an empty live set, but dispatch happens.
        let mut rig = control_loop(10_000, true);
        rig.channel_mut().on_event(RadioEvent::Write {
            characteristic: COMMAND,
            data: b"R",
        });

        rig.tick().unwrap();

        assert_eq!(rig.stepper.moves.len(), 1);
        assert!(rig.channel().radio().notified.is_empty());
    }
}
