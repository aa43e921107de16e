//! Buzzer sounds
//!
//! The tone itself comes from the shared timer in fast-PWM mode. What the
//! listener hears is shaped by gating the buzzer pin's output driver: driven
//! for [`Step::Tone`], tri-stated for [`Step::Silence`]. Playback busy-waits;
//! nothing else runs until a sound has finished.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::config::{ALARM_PHRASE, ALARM_REPEATS, CHIRP, TONE_COMPARE, TONE_TOP};
use crate::drivers::timer::{SharedTimer, TimerHw};

/// One element of a sound pattern, durations in milliseconds
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Tone(u16),
    Silence(u16),
}

impl Step {
    pub const fn duration_ms(self) -> u16 {
        match self {
            Step::Tone(ms) | Step::Silence(ms) => ms,
        }
    }
}

/// Total blocking time of `pattern` played `repeats` times
pub fn pattern_duration_ms(pattern: &[Step], repeats: u8) -> u32 {
    let once: u32 = pattern.iter().map(|step| step.duration_ms() as u32).sum();
    once * repeats as u32
}

pub struct Buzzer<G, D> {
    gate: G,
    delay: D,
}

impl<G, D> Buzzer<G, D>
where
    G: OutputPin,
    D: DelayMs<u16>,
{
    /// `gate` drives the buzzer pin when high and tri-states it when low
    pub fn new(mut gate: G, delay: D) -> Result<Self, G::Error> {
        gate.set_low()?;
        Ok(Self { gate, delay })
    }

    /// Play `pattern` `repeats` times in one tone session, then hand the
    /// timer back stopped.
    pub fn play<T: TimerHw>(
        &mut self,
        timer: &mut SharedTimer<T>,
        pattern: &[Step],
        repeats: u8,
    ) -> Result<(), G::Error> {
        timer.start_tone(TONE_TOP, TONE_COMPARE);
        let played = self.play_steps(pattern, repeats);
        // Leave the pin tri-stated even if a step failed
        let released = self.gate.set_low();
        timer.stop();
        played.and(released)
    }

    fn play_steps(&mut self, pattern: &[Step], repeats: u8) -> Result<(), G::Error> {
        for _ in 0..repeats {
            for step in pattern {
                match *step {
                    Step::Tone(ms) => {
                        self.gate.set_high()?;
                        self.delay.delay_ms(ms);
                    }
                    Step::Silence(ms) => {
                        self.gate.set_low()?;
                        self.delay.delay_ms(ms);
                    }
                }
            }
        }
        Ok(())
    }

    /// Short double beep acknowledging a button
    pub fn chirp<T: TimerHw>(&mut self, timer: &mut SharedTimer<T>) -> Result<(), G::Error> {
        self.play(timer, &CHIRP, 1)
    }

    /// Long sound marking the end of a cycle
    pub fn alarm<T: TimerHw>(&mut self, timer: &mut SharedTimer<T>) -> Result<(), G::Error> {
        debug!("alarm");
        self.play(timer, &ALARM_PHRASE, ALARM_REPEATS)
    }
}
