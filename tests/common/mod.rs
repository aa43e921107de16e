//! Shared test infrastructure for the spin timer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use critical_section::CriticalSection;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal_mock::delay::MockNoop;
use embedded_hal_mock::pin::{Mock as PinMock, State as PinState, Transaction as PinTransaction};

use spin_timer_firmware::config::{BANDS, MINUTE_RELOAD};
use spin_timer_firmware::drivers::{Buzzer, Keypad, Relay, SharedTimer, TimerHw};
use spin_timer_firmware::{Application, Countdown, MinuteTick, SharedState};

// ============================================================================
// Fake Timer
// ============================================================================

/// Register state of the fake timer
#[derive(Debug, Default)]
pub struct TimerRegs {
    pub count: u16,
    pub counting: bool,
    pub tone: Option<(u16, u16)>,
    pub tone_sessions: u32,
    /// Every value written to the counter, in order
    pub loads: Vec<u16>,
    /// Probe the critical section on every counter access
    pub check_masking: bool,
    /// Counter accesses made while another context could still get in
    pub unmasked_accesses: u32,
    pub masked_accesses: u32,
}

/// Timer that records what it was told to do. Clones share registers, so a
/// test keeps one handle while the firmware owns another.
#[derive(Clone, Default)]
pub struct FakeTimer(Rc<RefCell<TimerRegs>>);

impl FakeTimer {
    pub fn regs(&self) -> Ref<'_, TimerRegs> {
        self.0.borrow()
    }

    /// Let `ticks` pass. Only moves the counter while counting.
    pub fn advance(&self, ticks: u16) {
        let mut regs = self.0.borrow_mut();
        if regs.counting {
            regs.count = regs.count.wrapping_add(ticks);
        }
    }

    pub fn is_counting(&self) -> bool {
        self.regs().counting
    }

    pub fn count(&self) -> u16 {
        self.regs().count
    }

    /// Record whether every counter access holds the critical section
    pub fn check_masking(&self) {
        self.0.borrow_mut().check_masking = true;
    }

    fn note_access(&self) {
        let mut regs = self.0.borrow_mut();
        if !regs.check_masking {
            return;
        }
        if interrupts_masked() {
            regs.masked_accesses += 1;
        } else {
            regs.unmasked_accesses += 1;
        }
    }
}

/// True while this thread holds the critical section: another thread trying
/// to enter it, standing in for the overflow interrupt, stays locked out.
pub fn interrupts_masked() -> bool {
    let (entered, wait) = mpsc::channel();
    thread::spawn(move || {
        critical_section::with(|_| entered.send(()).ok());
    });
    wait.recv_timeout(Duration::from_millis(50)).is_err()
}

impl TimerHw for FakeTimer {
    fn count(&self, _cs: CriticalSection<'_>) -> u16 {
        self.note_access();
        self.0.borrow().count
    }

    fn set_count(&mut self, count: u16, _cs: CriticalSection<'_>) {
        self.note_access();
        let mut regs = self.0.borrow_mut();
        regs.count = count;
        regs.loads.push(count);
    }

    fn start_counting(&mut self) {
        let mut regs = self.0.borrow_mut();
        assert!(regs.tone.is_none(), "countdown started while PWM is configured");
        regs.counting = true;
    }

    fn stop_counting(&mut self) {
        self.0.borrow_mut().counting = false;
    }

    fn start_tone(&mut self, top: u16, compare: u16) {
        let mut regs = self.0.borrow_mut();
        assert!(!regs.counting, "tone started while counting");
        regs.tone = Some((top, compare));
        regs.tone_sessions += 1;
        // PWM mode runs the counter at full clock speed
        regs.count = 0;
    }

    fn stop_tone(&mut self) {
        let mut regs = self.0.borrow_mut();
        regs.counting = false;
        regs.tone = None;
    }
}

/// Run the overflow interrupt the way the firmware's handler does
pub fn overflow(shared: &SharedState, timer: &FakeTimer) -> Option<MinuteTick> {
    if !timer.is_counting() {
        return None;
    }
    let tick = shared.minute_elapsed();
    if tick == MinuteTick::Reload {
        timer.0.borrow_mut().count = MINUTE_RELOAD;
    }
    Some(tick)
}

// ============================================================================
// Recording Delay
// ============================================================================

/// Delay that records every requested wait instead of blocking
#[derive(Clone, Default)]
pub struct RecordingDelay(Rc<RefCell<Vec<u16>>>);

impl RecordingDelay {
    pub fn waits(&self) -> Vec<u16> {
        self.0.borrow().clone()
    }
}

impl DelayMs<u16> for RecordingDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.0.borrow_mut().push(ms);
    }
}

// ============================================================================
// Pin expectations
// ============================================================================

#[derive(Clone, Copy, Debug)]
pub enum Sound {
    Chirp,
    Alarm,
}

fn set(high: bool) -> PinTransaction {
    PinTransaction::set(if high { PinState::High } else { PinState::Low })
}

/// Relay pin writes: the low from construction, then each change
pub fn relay_writes(changes: &[bool]) -> Vec<PinTransaction> {
    std::iter::once(false)
        .chain(changes.iter().copied())
        .map(set)
        .collect()
}

/// Buzzer gate writes: the low from construction, then each sound in order
pub fn gate_writes(sounds: &[Sound]) -> Vec<PinTransaction> {
    let mut writes = vec![set(false)];
    for sound in sounds {
        match sound {
            Sound::Chirp => writes.extend([set(true), set(false)]),
            Sound::Alarm => {
                for _ in 0..3 {
                    for _ in 0..4 {
                        writes.extend([set(true), set(false)]);
                    }
                    writes.push(set(false));
                }
            }
        }
        // Released at the end of every sound
        writes.push(set(false));
    }
    writes
}

// ============================================================================
// Application rig
// ============================================================================

pub type TestApp<'a> = Application<'a, FakeTimer, PinMock, PinMock, MockNoop>;

pub fn keypad() -> Keypad {
    Keypad::new(&BANDS).unwrap()
}

pub fn build_app<'a>(
    shared: &'a SharedState,
    timer: &FakeTimer,
    relay: &PinMock,
    gate: &PinMock,
) -> TestApp<'a> {
    let relay = Relay::new(relay.clone()).unwrap();
    let buzzer = Buzzer::new(gate.clone(), MockNoop::new()).unwrap();
    let countdown = Countdown::new(shared, SharedTimer::new(timer.clone()), relay);
    Application::new(shared, keypad(), countdown, buzzer)
}

/// A sample inside the band of each button
pub mod samples {
    pub const START: u8 = 56;
    pub const PAUSE: u8 = 79;
    pub const STOP: u8 = 93;
    pub const ADD_ONE: u8 = 103;
    pub const ADD_FIVE: u8 = 113;
    pub const ADD_TEN: u8 = 135;
    pub const RELEASED: u8 = 255;
}
