//! Spin-cycle timer firmware for a washing machine
//!
//! Six buttons on one ADC pin set a countdown in minutes. While it runs, a
//! relay keeps the motor on. A buzzer on the same 16-bit timer chirps for
//! each button and sounds an alarm when the cycle ends or is stopped.
//!
//! Everything outside the `hal` module is hardware independent and tested on
//! the host.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

pub mod application;
pub mod config;
pub mod countdown;
pub mod drivers;
pub mod error;
pub mod shared;

#[cfg(target_arch = "avr")]
pub mod hal;

pub use application::Application;
pub use countdown::{Countdown, EngineState};
pub use error::Error;
pub use shared::{MinuteTick, SharedState};
