//! Countdown engine
//!
//! Owns the relay and the shared timer. The remaining minutes live in
//! [`SharedState`] because the overflow interrupt decrements them.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::config::{CHIRP_COMPENSATION_TICKS, MINUTE_RELOAD};
use crate::drivers::{Buzzer, Relay, SharedTimer, TimerHw, TimerMode};
use crate::error::Error;
use crate::shared::SharedState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineState {
    /// Nothing counting, relay off
    Idle,
    /// Timer counting, relay on
    Running,
    /// Timer stopped at `phase`, relay off
    Paused { phase: u16 },
}

pub struct Countdown<'a, T, R> {
    shared: &'a SharedState,
    timer: SharedTimer<T>,
    relay: Relay<R>,
    state: EngineState,
}

impl<'a, T, R> Countdown<'a, T, R>
where
    T: TimerHw,
    R: OutputPin,
{
    pub fn new(shared: &'a SharedState, timer: SharedTimer<T>, relay: Relay<R>) -> Self {
        Self {
            shared,
            timer,
            relay,
            state: EngineState::Idle,
        }
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[inline]
    pub fn minutes(&self) -> u8 {
        self.shared.minutes()
    }

    #[inline]
    pub fn relay_energized(&self) -> bool {
        self.relay.is_energized()
    }

    #[inline]
    pub fn timer_mode(&self) -> TimerMode {
        self.timer.mode()
    }

    #[inline]
    pub fn phase(&self) -> u16 {
        self.timer.phase()
    }

    /// Count from `phase` with the relay on. Refuses a zero-length cycle.
    fn run_from(&mut self, phase: u16) -> Result<bool, R::Error> {
        if self.shared.minutes() == 0 {
            return Ok(false);
        }
        self.timer.start_countdown(phase);
        self.relay.energize()?;
        self.state = EngineState::Running;
        Ok(true)
    }

    /// Stop the timer and the motor without touching the remaining time
    fn halt(&mut self) -> Result<(), R::Error> {
        self.timer.stop();
        self.relay.release()
    }

    /// START: resume a paused cycle, otherwise begin a fresh first minute
    pub fn start(&mut self) -> Result<(), R::Error> {
        let phase = match self.state {
            EngineState::Paused { phase } => phase,
            _ => MINUTE_RELOAD,
        };
        if self.run_from(phase)? {
            debug!("start at phase {=u16}", phase);
        } else {
            // START clears a pause even when there is nothing left to run
            self.state = EngineState::Idle;
        }
        Ok(())
    }

    /// STOP: abandon the cycle from any state
    pub fn stop(&mut self) -> Result<(), R::Error> {
        self.shared.clear_minutes();
        self.shared.take_cycle_complete();
        self.state = EngineState::Idle;
        self.halt()
    }

    /// PAUSE: freeze a running cycle. Returns whether anything was paused.
    pub fn pause(&mut self) -> Result<bool, R::Error> {
        if self.state != EngineState::Running {
            return Ok(false);
        }
        let phase = match self.timer.suspend() {
            Some(phase) => phase,
            None => return Ok(false),
        };
        self.halt()?;
        self.state = EngineState::Paused { phase };
        debug!("paused at phase {=u16}", phase);
        Ok(true)
    }

    /// Add time in any state. Returns the new total.
    pub fn add_minutes(&mut self, minutes: u8) -> u8 {
        self.shared.add_minutes(minutes)
    }

    /// Natural end of the cycle, after the overflow handler reported completion
    pub fn complete(&mut self) -> Result<(), R::Error> {
        self.state = EngineState::Idle;
        self.halt()
    }

    /// Acknowledge a button. A running countdown is suspended for the chirp
    /// and resumed afterwards, shifted by the chirp's fixed duration.
    pub fn chirp<G, D>(&mut self, buzzer: &mut Buzzer<G, D>) -> Result<(), Error<R::Error, G::Error>>
    where
        G: OutputPin,
        D: DelayMs<u16>,
    {
        let resume = match self.state {
            EngineState::Running => self.timer.suspend(),
            _ => None,
        };
        self.shared.set_chirping(resume.is_some());
        let played = buzzer.chirp(&mut self.timer);
        let resumed = match resume {
            Some(phase) => self
                .run_from(phase.wrapping_add(CHIRP_COMPENSATION_TICKS))
                .map(|_| ()),
            None => Ok(()),
        };
        self.shared.set_chirping(false);
        match played {
            Err(err) => Err(Error::Buzzer(err)),
            Ok(()) => resumed.map_err(Error::Relay),
        }
    }

    /// Play the end-of-cycle alarm on this engine's timer
    pub fn alarm<G, D>(&mut self, buzzer: &mut Buzzer<G, D>) -> Result<(), G::Error>
    where
        G: OutputPin,
        D: DelayMs<u16>,
    {
        buzzer.alarm(&mut self.timer)
    }
}
