//! Motor relay output (active high)

use embedded_hal::digital::v2::OutputPin;

pub struct Relay<P> {
    pin: P,
    energized: bool,
}

impl<P: OutputPin> Relay<P> {
    /// Take the relay pin and drive it low
    pub fn new(mut pin: P) -> Result<Self, P::Error> {
        pin.set_low()?;
        Ok(Self {
            pin,
            energized: false,
        })
    }

    /// Switch the motor on. No pin write if it is already on.
    pub fn energize(&mut self) -> Result<(), P::Error> {
        if !self.energized {
            self.pin.set_high()?;
            self.energized = true;
        }
        Ok(())
    }

    /// Switch the motor off. No pin write if it is already off.
    pub fn release(&mut self) -> Result<(), P::Error> {
        if self.energized {
            self.pin.set_low()?;
            self.energized = false;
        }
        Ok(())
    }

    #[inline]
    pub fn is_energized(&self) -> bool {
        self.energized
    }

    pub fn free(self) -> P {
        self.pin
    }
}
