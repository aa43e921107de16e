use avr_device::attiny84::ADC;

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum AdcChannel {
    Adc0 = 0,
    Adc1 = 1,
    Adc2 = 2,
    Adc3 = 3,
    Adc4 = 4,
    Adc5 = 5,
    Adc6 = 6,
    Adc7 = 7,
}

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum AdcPrescaler {
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

const ADEN: u8 = 1 << 7;
const ADSC: u8 = 1 << 6;
const ADATE: u8 = 1 << 5;
const ADIF: u8 = 1 << 4;
const ADIE: u8 = 1 << 3;
const ADLAR: u8 = 1 << 4;

/// Free-running ADC delivering 8-bit samples through the `ADC` interrupt
pub struct Adc {
    _private: (),
}

impl Adc {
    /// VCC reference, result left adjusted so the high byte is the sample
    pub fn new(channel: AdcChannel) -> Self {
        unsafe {
            let p = ADC::ptr();
            (*p).admux.write(|w| w.bits(channel as u8));
            (*p).adcsrb.write(|w| w.bits(ADLAR));
            // No digital input buffer on the analog pin
            (*p).didr0.write(|w| w.bits(1 << channel as u8));
        }
        Self { _private: () }
    }

    /// Start continuous conversions with the interrupt enabled
    pub fn start_free_running(&mut self, prescaler: AdcPrescaler) {
        unsafe {
            let p = ADC::ptr();
            (*p).adcsra
                .write(|w| w.bits(ADEN | ADSC | ADATE | ADIF | ADIE | prescaler as u8));
        }
    }

    /// Latest conversion. Call from the `ADC` interrupt.
    #[inline]
    pub fn read_sample() -> u8 {
        unsafe {
            let p = ADC::ptr();
            ((*p).adc.read().bits() >> 8) as u8
        }
    }
}
