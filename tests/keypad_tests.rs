//! Integration tests for the keypad decoder and its calibration table

mod common;
use common::*;

use spin_timer_firmware::config::BANDS;
use spin_timer_firmware::drivers::keypad::{validate, Band, ButtonEvent, CalibrationError, Keypad};

#[test]
fn every_sample_decodes_to_at_most_one_band() {
    let keypad = keypad();

    for sample in 0..=u8::MAX {
        let matching: Vec<&Band> = BANDS.iter().filter(|band| band.contains(sample)).collect();
        assert!(matching.len() <= 1, "sample {sample} is in {} bands", matching.len());

        let expected = matching.first().map_or(ButtonEvent::None, |band| band.event);
        assert_eq!(keypad.decode(sample), expected, "sample {sample}");
    }
}

#[test]
fn table_has_one_band_per_button() {
    let events = [
        ButtonEvent::Start,
        ButtonEvent::Stop,
        ButtonEvent::Pause,
        ButtonEvent::AddOneMinute,
        ButtonEvent::AddFiveMinutes,
        ButtonEvent::AddTenMinutes,
    ];
    for event in events {
        let count = BANDS.iter().filter(|band| band.event == event).count();
        assert_eq!(count, 1, "{event:?}");
    }
    assert_eq!(validate(&BANDS), Ok(()));
}

#[test]
fn decodes_band_edges() {
    let keypad = keypad();

    assert_eq!(keypad.decode(50), ButtonEvent::None);
    assert_eq!(keypad.decode(51), ButtonEvent::Start);
    assert_eq!(keypad.decode(61), ButtonEvent::Start);
    assert_eq!(keypad.decode(62), ButtonEvent::None);

    // Stop and 1 minute touch without sharing a sample
    assert_eq!(keypad.decode(98), ButtonEvent::Stop);
    assert_eq!(keypad.decode(99), ButtonEvent::AddOneMinute);
    assert_eq!(keypad.decode(107), ButtonEvent::AddOneMinute);
    assert_eq!(keypad.decode(108), ButtonEvent::AddFiveMinutes);

    assert_eq!(keypad.decode(140), ButtonEvent::AddTenMinutes);
    assert_eq!(keypad.decode(141), ButtonEvent::None);
}

#[test]
fn idle_ladder_decodes_to_none() {
    let keypad = keypad();
    assert_eq!(keypad.decode(0), ButtonEvent::None);
    assert_eq!(keypad.decode(samples::RELEASED), ButtonEvent::None);
}

#[test]
fn representative_samples_hit_their_buttons() {
    let keypad = keypad();
    assert_eq!(keypad.decode(samples::START), ButtonEvent::Start);
    assert_eq!(keypad.decode(samples::PAUSE), ButtonEvent::Pause);
    assert_eq!(keypad.decode(samples::STOP), ButtonEvent::Stop);
    assert_eq!(keypad.decode(samples::ADD_ONE), ButtonEvent::AddOneMinute);
    assert_eq!(keypad.decode(samples::ADD_FIVE), ButtonEvent::AddFiveMinutes);
    assert_eq!(keypad.decode(samples::ADD_TEN), ButtonEvent::AddTenMinutes);
}

#[test]
fn overlapping_recalibration_is_rejected() {
    static SHIFTED: [Band; 3] = [
        Band::new(ButtonEvent::Start, 51, 61),
        Band::new(ButtonEvent::Pause, 74, 84),
        Band::new(ButtonEvent::Stop, 60, 70),
    ];
    assert_eq!(Keypad::new(&SHIFTED).err(), Some(CalibrationError::Overlap(0, 2)));
}

#[test]
fn added_minutes_per_button() {
    assert_eq!(ButtonEvent::AddOneMinute.minutes(), 1);
    assert_eq!(ButtonEvent::AddFiveMinutes.minutes(), 5);
    assert_eq!(ButtonEvent::AddTenMinutes.minutes(), 10);
    assert_eq!(ButtonEvent::Start.minutes(), 0);
    assert_eq!(ButtonEvent::None.minutes(), 0);
}
