//! Configuration constants for the spin-cycle timer firmware

use crate::drivers::buzzer::Step;
use crate::drivers::keypad::{Band, ButtonEvent};

/// CPU frequency in Hz (calibrated internal oscillator)
pub const CPU_FREQ_HZ: u32 = 980_000;

/// Timer1 prescaler while counting down
pub const COUNTDOWN_PRESCALER: u32 = 1024;

/// Timer1 wraps after this many ticks
pub const TIMER_PERIOD: u32 = 1 << 16;

/// Timer1 ticks in one minute (~1.044 ms per tick)
pub const TICKS_PER_MINUTE: u32 = (CPU_FREQ_HZ * 60) / COUNTDOWN_PRESCALER;

/// Timer1 ticks in one second. Not used by the countdown.
pub const TICKS_PER_SECOND: u32 = CPU_FREQ_HZ / COUNTDOWN_PRESCALER;

/// Counter value that overflows after one minute
pub const MINUTE_RELOAD: u16 = (TIMER_PERIOD - TICKS_PER_MINUTE) as u16;

/// Counter value that overflows after one second
pub const SECOND_RELOAD: u16 = (TIMER_PERIOD - TICKS_PER_SECOND) as u16;

/// Buzzer tone frequency in Hz
pub const TONE_FREQ_HZ: u32 = 2_000;

/// ICR1 top for the tone, fast PWM without prescaler
pub const TONE_TOP: u16 = (CPU_FREQ_HZ / TONE_FREQ_HZ - 1) as u16;

/// OCR1B compare for a 50% duty cycle
pub const TONE_COMPARE: u16 = TONE_TOP / 2;

/// Chirp tone length in milliseconds
pub const CHIRP_TONE_MS: u16 = 170;

/// Chirp trailing silence in milliseconds
pub const CHIRP_SILENCE_MS: u16 = 170;

/// Ticks added to the saved phase after a chirp interrupted the countdown.
/// Treats one tick as one millisecond of the chirp.
pub const CHIRP_COMPENSATION_TICKS: u16 = CHIRP_TONE_MS + CHIRP_SILENCE_MS;

/// Alarm burst tone length in milliseconds
pub const ALARM_TONE_MS: u16 = 250;

/// Alarm gap after each burst in milliseconds
pub const ALARM_GAP_MS: u16 = 150;

/// Alarm pause after each group of bursts in milliseconds
pub const ALARM_PAUSE_MS: u16 = 250;

/// Number of times the alarm phrase is played
pub const ALARM_REPEATS: u8 = 3;

/// Button press feedback
pub const CHIRP: [Step; 2] = [Step::Tone(CHIRP_TONE_MS), Step::Silence(CHIRP_SILENCE_MS)];

/// One alarm phrase: four bursts and a pause
pub const ALARM_PHRASE: [Step; 9] = [
    Step::Tone(ALARM_TONE_MS),
    Step::Silence(ALARM_GAP_MS),
    Step::Tone(ALARM_TONE_MS),
    Step::Silence(ALARM_GAP_MS),
    Step::Tone(ALARM_TONE_MS),
    Step::Silence(ALARM_GAP_MS),
    Step::Tone(ALARM_TONE_MS),
    Step::Silence(ALARM_GAP_MS),
    Step::Silence(ALARM_PAUSE_MS),
];

/// Keypad bands over the 8-bit ADC sample.
///
/// Divider: R1 = 1.8k to 5V, R2 per button to ground, ~19.5 mV per step.
pub const BANDS: [Band; 6] = [
    Band::new(ButtonEvent::Start, 51, 61),           // 220R, ~1.13V
    Band::new(ButtonEvent::Pause, 74, 84),           // 470R, ~1.56V
    Band::new(ButtonEvent::Stop, 89, 98),            // 680R, ~1.83V
    Band::new(ButtonEvent::AddOneMinute, 99, 107),   // 820R, ~2.00V
    Band::new(ButtonEvent::AddFiveMinutes, 108, 118), // 1k, ~2.19V
    Band::new(ButtonEvent::AddTenMinutes, 130, 140), // 1k5, ~2.61V
];

/// Watchdog timeout period in milliseconds
pub const WDT_TIMEOUT_MS: u16 = 8000;
