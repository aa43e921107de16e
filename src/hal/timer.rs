use avr_device::attiny84::{TC0, TC1};
use critical_section::CriticalSection;
use embedded_hal::blocking::delay::DelayMs;

use crate::config::CPU_FREQ_HZ;
use crate::drivers::TimerHw;

#[derive(Clone, Copy)]
pub enum Prescaler {
    Stop = 0,
    Direct = 1,
    Div8 = 2,
    Div64 = 3,
    Div256 = 4,
    Div1024 = 5,
}

// TCCR1A
const COM1B1: u8 = 1 << 5;
const WGM11: u8 = 1 << 1;
// TCCR1B
const WGM13: u8 = 1 << 4;
const WGM12: u8 = 1 << 3;
// TIMSK1 / TIFR1
const TOV1: u8 = 1 << 0;

/// Timer/Counter1, the countdown timebase and tone generator
pub struct Timer1 {
    _private: (),
}

impl Timer1 {
    pub fn new() -> Self {
        unsafe {
            let p = TC1::ptr();
            (*p).timsk1.write(|w| w.bits(0));
            (*p).tccr1b.write(|w| w.bits(0));
            (*p).tccr1a.write(|w| w.bits(0));
        }
        Self { _private: () }
    }

    /// Load the counter from the overflow interrupt.
    ///
    /// TCNT1 goes through the shared TEMP byte, hence the token.
    #[inline]
    pub fn reload(count: u16, _cs: CriticalSection<'_>) {
        unsafe {
            (*TC1::ptr()).tcnt1.write(|w| w.bits(count));
        }
    }
}

impl Default for Timer1 {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerHw for Timer1 {
    fn count(&self, _cs: CriticalSection<'_>) -> u16 {
        unsafe { (*TC1::ptr()).tcnt1.read().bits() }
    }

    fn set_count(&mut self, count: u16, cs: CriticalSection<'_>) {
        Self::reload(count, cs);
    }

    fn start_counting(&mut self) {
        unsafe {
            let p = TC1::ptr();
            // Normal mode
            (*p).tccr1a.write(|w| w.bits(0));
            (*p).tccr1b.write(|w| w.bits(Prescaler::Div1024 as u8));
            // Drop an overflow left pending by tone mode
            (*p).tifr1.write(|w| w.bits(TOV1));
            (*p).timsk1.write(|w| w.bits(TOV1));
        }
    }

    fn stop_counting(&mut self) {
        unsafe {
            let p = TC1::ptr();
            (*p).tccr1b.write(|w| w.bits(Prescaler::Stop as u8));
            (*p).timsk1.write(|w| w.bits(0));
        }
    }

    fn start_tone(&mut self, top: u16, compare: u16) {
        unsafe {
            let p = TC1::ptr();
            (*p).timsk1.write(|w| w.bits(0));
            // Fast PWM, ICR1 top, clear OC1B on match
            (*p).tccr1a.write(|w| w.bits(COM1B1 | WGM11));
            (*p).icr1.write(|w| w.bits(top));
            (*p).ocr1b.write(|w| w.bits(compare));
            (*p).tccr1b.write(|w| w.bits(WGM13 | WGM12 | Prescaler::Direct as u8));
        }
    }

    fn stop_tone(&mut self) {
        unsafe {
            let p = TC1::ptr();
            (*p).tccr1b.write(|w| w.bits(0));
            (*p).icr1.write(|w| w.bits(0));
            (*p).ocr1b.write(|w| w.bits(0));
            (*p).timsk1.write(|w| w.bits(0));
            (*p).tccr1a.write(|w| w.bits(0));
        }
    }
}

/// Timer0 ticks per millisecond at clk/8
const DELAY_TICKS_PER_MS: u8 = (CPU_FREQ_HZ / 8 / 1000) as u8;

/// Busy-wait delay on Timer0, which nothing else uses
pub struct Delay {
    _private: (),
}

impl Delay {
    pub fn new() -> Self {
        unsafe {
            let p = TC0::ptr();
            // Normal mode, no interrupts
            (*p).tccr0a.write(|w| w.bits(0));
            (*p).timsk0.write(|w| w.bits(0));
        }
        Self { _private: () }
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        unsafe {
            let p = TC0::ptr();
            (*p).tcnt0.write(|w| w.bits(0));
            (*p).tccr0b.write(|w| w.bits(Prescaler::Div8 as u8));

            for _ in 0..ms {
                while (*p).tcnt0.read().bits() < DELAY_TICKS_PER_MS {}
                (*p).tcnt0.write(|w| w.bits(0));
            }

            (*p).tccr0b.write(|w| w.bits(Prescaler::Stop as u8));
        }
    }
}
