//! Owner of the one 16-bit timer shared by the countdown and the buzzer
//!
//! The countdown uses the timer as a free-running counter whose overflow
//! interrupt marks one elapsed minute. The buzzer uses the same timer as a
//! fast-PWM tone generator. Only one of the two can hold it at a time, so
//! every mode change goes through [`SharedTimer`], which tears the previous
//! mode down first.
//!
//! The counter is 16 bits wide but the bus is 8, and the overflow interrupt
//! writes it too. Counter access therefore takes a [`CriticalSection`] token.

use critical_section::CriticalSection;

/// Register-level operations on the timer hardware
pub trait TimerHw {
    /// Current counter value
    fn count(&self, cs: CriticalSection<'_>) -> u16;

    /// Load the counter
    fn set_count(&mut self, count: u16, cs: CriticalSection<'_>);

    /// Normal mode, countdown prescaler, overflow interrupt enabled
    fn start_counting(&mut self);

    /// Stop the clock and mask the overflow interrupt
    fn stop_counting(&mut self);

    /// Fast PWM with `top` as period and `compare` as duty, overflow interrupt masked
    fn start_tone(&mut self, top: u16, compare: u16);

    /// Stop the clock and clear every PWM register
    fn stop_tone(&mut self);
}

/// What the timer is being used for right now
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerMode {
    Stopped,
    Countdown,
    Tone,
}

pub struct SharedTimer<T> {
    hw: T,
    mode: TimerMode,
}

impl<T: TimerHw> SharedTimer<T> {
    pub fn new(mut hw: T) -> Self {
        hw.stop_tone();
        Self {
            hw,
            mode: TimerMode::Stopped,
        }
    }

    #[inline]
    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Counter value, the phase within the current minute
    #[inline]
    pub fn phase(&self) -> u16 {
        critical_section::with(|cs| self.hw.count(cs))
    }

    /// Count from `phase` towards overflow
    pub fn start_countdown(&mut self, phase: u16) {
        if self.mode == TimerMode::Tone {
            self.hw.stop_tone();
        }
        let hw = &mut self.hw;
        critical_section::with(|cs| {
            hw.set_count(phase, cs);
            hw.start_counting();
        });
        self.mode = TimerMode::Countdown;
    }

    /// Stop counting and return the phase it stopped at
    pub fn suspend(&mut self) -> Option<u16> {
        if self.mode != TimerMode::Countdown {
            return None;
        }
        // No overflow may land between the read and the stop
        let hw = &mut self.hw;
        let phase = critical_section::with(|cs| {
            let phase = hw.count(cs);
            hw.stop_counting();
            phase
        });
        self.mode = TimerMode::Stopped;
        Some(phase)
    }

    pub fn start_tone(&mut self, top: u16, compare: u16) {
        if self.mode == TimerMode::Countdown {
            self.hw.stop_counting();
        }
        self.hw.start_tone(top, compare);
        self.mode = TimerMode::Tone;
    }

    /// Release the timer from whatever it was doing
    pub fn stop(&mut self) {
        match self.mode {
            TimerMode::Countdown => self.hw.stop_counting(),
            TimerMode::Tone => self.hw.stop_tone(),
            TimerMode::Stopped => {}
        }
        self.mode = TimerMode::Stopped;
    }

    pub fn free(self) -> T {
        self.hw
    }
}
