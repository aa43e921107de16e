//! Output pin failures surfaced by the engine and the dispatch loop

/// `R` is the relay pin's error, `B` the buzzer gate's.
/// Both are `Infallible` on the AVR target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<R, B> {
    Relay(R),
    Buzzer(B),
}
