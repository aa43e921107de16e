//! Resistor-ladder keypad decoder
//!
//! All six buttons share one ADC pin. Each button pulls the divider to its own
//! voltage, so every button owns a band of sample values. A sample outside
//! every band means no button is pressed.

/// Decoded keypad input
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Start,
    Stop,
    Pause,
    AddOneMinute,
    AddFiveMinutes,
    AddTenMinutes,
    None,
}

impl ButtonEvent {
    /// Minutes added by this button, zero for the non-time buttons
    pub const fn minutes(self) -> u8 {
        match self {
            ButtonEvent::AddOneMinute => 1,
            ButtonEvent::AddFiveMinutes => 5,
            ButtonEvent::AddTenMinutes => 10,
            _ => 0,
        }
    }
}

/// Inclusive range of samples mapped to one button
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Band {
    pub event: ButtonEvent,
    pub lower: u8,
    pub upper: u8,
}

impl Band {
    pub const fn new(event: ButtonEvent, lower: u8, upper: u8) -> Self {
        Self { event, lower, upper }
    }

    #[inline]
    pub const fn contains(&self, sample: u8) -> bool {
        sample >= self.lower && sample <= self.upper
    }

    const fn overlaps(&self, other: &Band) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Band at this index has `lower > upper`
    Inverted(usize),
    /// Bands at these indices share at least one sample
    Overlap(usize, usize),
    /// Band at this index maps to `ButtonEvent::None`
    Unmapped(usize),
}

/// Check that a calibration table is usable
pub const fn validate(bands: &[Band]) -> Result<(), CalibrationError> {
    let mut i = 0;
    while i < bands.len() {
        if bands[i].lower > bands[i].upper {
            return Err(CalibrationError::Inverted(i));
        }
        if matches!(bands[i].event, ButtonEvent::None) {
            return Err(CalibrationError::Unmapped(i));
        }
        let mut j = i + 1;
        while j < bands.len() {
            if bands[i].overlaps(&bands[j]) {
                return Err(CalibrationError::Overlap(i, j));
            }
            j += 1;
        }
        i += 1;
    }
    Ok(())
}

pub struct Keypad {
    bands: &'static [Band],
}

impl Keypad {
    /// Build a decoder over a validated table.
    ///
    /// `const`, so a bad table in a `const` item fails the build.
    pub const fn new(bands: &'static [Band]) -> Result<Self, CalibrationError> {
        match validate(bands) {
            Ok(()) => Ok(Self { bands }),
            Err(err) => Err(err),
        }
    }

    pub fn decode(&self, sample: u8) -> ButtonEvent {
        self.bands
            .iter()
            .find(|band| band.contains(sample))
            .map_or(ButtonEvent::None, |band| band.event)
    }

    pub fn bands(&self) -> &'static [Band] {
        self.bands
    }
}
