#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod firmware {
    use panic_halt as _;

    use spin_timer_firmware::config::{BANDS, MINUTE_RELOAD};
    use spin_timer_firmware::drivers::{Buzzer, Keypad, Relay, SharedTimer};
    use spin_timer_firmware::hal::{
        board, Adc, AdcChannel, AdcPrescaler, Delay, DriveGate, Timer1, Watchdog, WatchdogTimeout,
    };
    use spin_timer_firmware::{Application, Countdown, MinuteTick, SharedState};

    // Global state for interrupt handling
    static SHARED: SharedState = SharedState::new();

    // A bad calibration table fails the build here
    const KEYPAD: Keypad = match Keypad::new(&BANDS) {
        Ok(keypad) => keypad,
        Err(_) => panic!("keypad bands overlap or are malformed"),
    };

    #[avr_device::entry]
    fn main() -> ! {
        let mut watchdog = Watchdog::new();
        watchdog.start(WatchdogTimeout::Ms8000);

        let _keypad_pin = board::KEYPAD::new();
        let mut adc = Adc::new(AdcChannel::Adc0);

        // Both pins are infallible
        let relay = match Relay::new(board::RELAY::new().into_output()) {
            Ok(relay) => relay,
            Err(never) => match never {},
        };
        let buzzer = match Buzzer::new(DriveGate::new(board::BUZZER::new()), Delay::new()) {
            Ok(buzzer) => buzzer,
            Err(never) => match never {},
        };

        let countdown = Countdown::new(&SHARED, SharedTimer::new(Timer1::new()), relay);
        let mut app = Application::new(&SHARED, KEYPAD, countdown, buzzer);

        adc.start_free_running(AdcPrescaler::Div128);

        // Enable interrupts globally
        unsafe { avr_device::interrupt::enable() };

        loop {
            watchdog.feed();
            app.poll().ok();
        }
    }

    #[avr_device::interrupt(attiny84)]
    #[allow(non_snake_case)]
    fn ADC() {
        SHARED.store_sample(Adc::read_sample());
    }

    #[avr_device::interrupt(attiny84)]
    #[allow(non_snake_case)]
    fn TIM1_OVF() {
        if SHARED.minute_elapsed() == MinuteTick::Reload {
            critical_section::with(|cs| Timer1::reload(MINUTE_RELOAD, cs));
        }
    }
}

// The firmware only runs on the target; this keeps host builds of the
// binary (pulled in by `cargo test`) linking.
#[cfg(not(target_arch = "avr"))]
fn main() {}
