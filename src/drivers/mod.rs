pub mod buzzer;
pub mod keypad;
pub mod relay;
pub mod timer;

pub use buzzer::{Buzzer, Step};
pub use keypad::{Band, ButtonEvent, CalibrationError, Keypad};
pub use relay::Relay;
pub use timer::{SharedTimer, TimerHw, TimerMode};
