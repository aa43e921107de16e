//! State shared between the interrupt handlers and the main loop

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use critical_section::Mutex;

/// What the overflow handler has to do after a minute elapsed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MinuteTick {
    /// Nothing was counting
    Idle,
    /// Minute taken, counter left free-running (a chirp holds the timer)
    Continue,
    /// Minute taken, reload the counter for the next full minute
    Reload,
    /// Last minute taken, cycle complete
    Complete,
}

pub struct SharedState {
    latest_sample: AtomicU8,
    minutes: Mutex<Cell<u8>>,
    cycle_complete: AtomicBool,
    chirping: AtomicBool,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            latest_sample: AtomicU8::new(0),
            minutes: Mutex::new(Cell::new(0)),
            cycle_complete: AtomicBool::new(false),
            chirping: AtomicBool::new(false),
        }
    }

    /// Called from the ADC conversion-complete interrupt
    #[inline]
    pub fn store_sample(&self, sample: u8) {
        self.latest_sample.store(sample, Ordering::Relaxed);
    }

    #[inline]
    pub fn latest_sample(&self) -> u8 {
        self.latest_sample.load(Ordering::Relaxed)
    }

    pub fn minutes(&self) -> u8 {
        critical_section::with(|cs| self.minutes.borrow(cs).get())
    }

    /// Add to the remaining time, saturating at 255. Returns the new total.
    pub fn add_minutes(&self, minutes: u8) -> u8 {
        critical_section::with(|cs| {
            let cell = self.minutes.borrow(cs);
            let total = cell.get().saturating_add(minutes);
            cell.set(total);
            total
        })
    }

    pub fn clear_minutes(&self) {
        critical_section::with(|cs| self.minutes.borrow(cs).set(0));
    }

    /// Account for one elapsed minute. Called from the timer overflow interrupt.
    pub fn minute_elapsed(&self) -> MinuteTick {
        let tick = critical_section::with(|cs| {
            let cell = self.minutes.borrow(cs);
            match cell.get() {
                0 => MinuteTick::Idle,
                1 => {
                    cell.set(0);
                    MinuteTick::Complete
                }
                n => {
                    cell.set(n - 1);
                    if self.chirping.load(Ordering::Relaxed) {
                        MinuteTick::Continue
                    } else {
                        MinuteTick::Reload
                    }
                }
            }
        });
        if tick == MinuteTick::Complete {
            self.cycle_complete.store(true, Ordering::Release);
        }
        tick
    }

    #[inline]
    pub fn is_cycle_complete(&self) -> bool {
        self.cycle_complete.load(Ordering::Acquire)
    }

    /// Clear the completion flag, returning whether it was set
    pub fn take_cycle_complete(&self) -> bool {
        critical_section::with(|_| {
            let complete = self.cycle_complete.load(Ordering::Acquire);
            self.cycle_complete.store(false, Ordering::Release);
            complete
        })
    }

    #[inline]
    pub fn set_chirping(&self, chirping: bool) {
        self.chirping.store(chirping, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_chirping(&self) -> bool {
        self.chirping.load(Ordering::Relaxed)
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
