use avr_device::attiny84::PORTA;
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::OutputPin;

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

/// Pin `P` of PORTA
#[derive(Debug)]
pub struct Pin<const P: u8, MODE> {
    _mode: PhantomData<MODE>,
}

impl<const P: u8> Pin<P, Input> {
    /// Pins come out of reset as inputs
    pub fn new() -> Self {
        Pin { _mode: PhantomData }
    }
}

impl<const P: u8> Default for Pin<P, Input> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const P: u8, MODE: PinMode> Pin<P, MODE> {
    pub fn into_output(self) -> Pin<P, Output> {
        unsafe {
            (*PORTA::ptr()).ddra.modify(|r, w| w.bits(r.bits() | (1 << P)));
        }
        Pin { _mode: PhantomData }
    }

    pub fn into_input(self) -> Pin<P, Input> {
        // Clear DDRx bit and disable pull-up
        unsafe {
            (*PORTA::ptr()).ddra.modify(|r, w| w.bits(r.bits() & !(1 << P)));
            (*PORTA::ptr()).porta.modify(|r, w| w.bits(r.bits() & !(1 << P)));
        }
        Pin { _mode: PhantomData }
    }
}

impl<const P: u8> OutputPin for Pin<P, Output> {
    type Error = Infallible;

    #[inline]
    fn set_high(&mut self) -> Result<(), Infallible> {
        unsafe {
            (*PORTA::ptr()).porta.modify(|r, w| w.bits(r.bits() | (1 << P)));
        }
        Ok(())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Infallible> {
        unsafe {
            (*PORTA::ptr()).porta.modify(|r, w| w.bits(r.bits() & !(1 << P)));
        }
        Ok(())
    }
}

/// Output driver switch for a pin carrying a timer waveform.
///
/// High connects the pin (DDR set), low tri-states it. PORT stays low so the
/// released pin floats instead of enabling the pull-up.
pub struct DriveGate<const P: u8> {
    _pin: Pin<P, Input>,
}

impl<const P: u8> DriveGate<P> {
    pub fn new(pin: Pin<P, Input>) -> Self {
        Self {
            _pin: pin.into_input(),
        }
    }
}

impl<const P: u8> OutputPin for DriveGate<P> {
    type Error = Infallible;

    #[inline]
    fn set_high(&mut self) -> Result<(), Infallible> {
        unsafe {
            (*PORTA::ptr()).ddra.modify(|r, w| w.bits(r.bits() | (1 << P)));
        }
        Ok(())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Infallible> {
        unsafe {
            (*PORTA::ptr()).ddra.modify(|r, w| w.bits(r.bits() & !(1 << P)));
        }
        Ok(())
    }
}

// Spin timer board pins, as they come out of reset
pub mod board {
    use super::*;

    /// Button ladder, ADC0
    pub type KEYPAD = Pin<0, Input>;
    /// Motor relay driver
    pub type RELAY = Pin<2, Input>;
    /// Buzzer on OC1B
    pub type BUZZER = Pin<5, Input>;
}
