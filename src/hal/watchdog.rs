use avr_device::attiny84::WDT;

// WDP3 lives apart from WDP2..0 in WDTCSR
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum WatchdogTimeout {
    Ms16 = 0x00,
    Ms32 = 0x01,
    Ms64 = 0x02,
    Ms125 = 0x03,
    Ms250 = 0x04,
    Ms500 = 0x05,
    Ms1000 = 0x06,
    Ms2000 = 0x07,
    Ms4000 = 0x20,
    Ms8000 = 0x21,
}

const WDCE: u8 = 1 << 4;
const WDE: u8 = 1 << 3;

pub struct Watchdog {
    _private: (),
}

impl Watchdog {
    #[inline]
    pub fn new() -> Self {
        Self { _private: () }
    }

    #[inline]
    pub fn start(&mut self, timeout: WatchdogTimeout) {
        avr_device::interrupt::free(|_cs| unsafe {
            let p = WDT::ptr();
            // Enable change bit and system reset mode
            (*p).wdtcsr.write(|w| w.bits(WDCE | WDE));
            // Set timeout and enable watchdog
            (*p).wdtcsr.write(|w| w.bits(WDE | timeout as u8));
        });
    }

    #[inline]
    pub fn feed(&mut self) {
        avr_device::asm::wdr();
    }
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}
