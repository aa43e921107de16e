//! Main dispatch loop
//!
//! One pass reads the latest ADC sample, decodes it, runs the handler for
//! that button, then checks whether the overflow interrupt finished the
//! cycle. There is no event queue: whatever the ADC saw last is what runs.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::countdown::Countdown;
use crate::drivers::{Buzzer, ButtonEvent, Keypad, TimerHw};
use crate::error::Error;
use crate::shared::SharedState;

pub struct Application<'a, T, R, G, D> {
    shared: &'a SharedState,
    keypad: Keypad,
    countdown: Countdown<'a, T, R>,
    buzzer: Buzzer<G, D>,
}

impl<'a, T, R, G, D> Application<'a, T, R, G, D>
where
    T: TimerHw,
    R: OutputPin,
    G: OutputPin,
    D: DelayMs<u16>,
{
    pub fn new(
        shared: &'a SharedState,
        keypad: Keypad,
        countdown: Countdown<'a, T, R>,
        buzzer: Buzzer<G, D>,
    ) -> Self {
        Self {
            shared,
            keypad,
            countdown,
            buzzer,
        }
    }

    /// One iteration of the main loop. Returns the event that was handled.
    pub fn poll(&mut self) -> Result<ButtonEvent, Error<R::Error, G::Error>> {
        let event = self.keypad.decode(self.shared.latest_sample());
        self.dispatch(event)?;
        self.check_complete()?;
        Ok(event)
    }

    pub fn dispatch(&mut self, event: ButtonEvent) -> Result<(), Error<R::Error, G::Error>> {
        match event {
            ButtonEvent::Start => {
                self.countdown.start().map_err(Error::<_, G::Error>::Relay)?;
                self.countdown.chirp(&mut self.buzzer)
            }
            ButtonEvent::Stop => {
                info!("stop");
                self.countdown.stop().map_err(Error::<_, G::Error>::Relay)?;
                self.alarm()
            }
            ButtonEvent::Pause => {
                if self.countdown.pause().map_err(Error::<_, G::Error>::Relay)? {
                    self.countdown.chirp(&mut self.buzzer)?;
                }
                Ok(())
            }
            ButtonEvent::AddOneMinute | ButtonEvent::AddFiveMinutes | ButtonEvent::AddTenMinutes => {
                self.countdown.add_minutes(event.minutes());
                debug!("{=u8} minutes", self.countdown.minutes());
                self.countdown.chirp(&mut self.buzzer)
            }
            ButtonEvent::None => Ok(()),
        }
    }

    /// Finish a cycle the overflow interrupt ran down to zero
    fn check_complete(&mut self) -> Result<(), Error<R::Error, G::Error>> {
        if self.shared.minutes() != 0 || !self.shared.take_cycle_complete() {
            return Ok(());
        }
        info!("cycle complete");
        self.countdown.complete().map_err(Error::<_, G::Error>::Relay)?;
        self.alarm()
    }

    fn alarm(&mut self) -> Result<(), Error<R::Error, G::Error>> {
        self.countdown.alarm(&mut self.buzzer).map_err(Error::Buzzer)
    }

    pub fn countdown(&self) -> &Countdown<'a, T, R> {
        &self.countdown
    }
}
