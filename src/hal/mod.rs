pub mod adc;
pub mod gpio;
pub mod timer;
pub mod watchdog;

// Re-export commonly used types
pub use adc::{Adc, AdcChannel, AdcPrescaler};
pub use gpio::board;
pub use gpio::{DriveGate, Input, Output, Pin};
pub use timer::{Delay, Prescaler, Timer1};
pub use watchdog::{Watchdog, WatchdogTimeout};
