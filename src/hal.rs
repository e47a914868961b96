//! Hardware collaborator for pin setup and interrupt routing.

use embedded_hal::digital::InputPin;

/// Which input transitions trigger an interrupt.
///
/// [`ButtonTracker`](crate::ButtonTracker) always binds [`Edge::Any`]. The
/// single-edge variants let one `ButtonHal` implementation also serve
/// drivers that arm a single direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// High to low.
    Falling,
    /// Low to high.
    Rising,
    /// Any level change.
    Any,
}

/// Trait for abstracting the pin and interrupt hardware behind a tracker.
///
/// Implement this for your HAL to let a [`ButtonTracker`](crate::ButtonTracker)
/// configure its button pins and arm their interrupts. The interrupt vector(s)
/// serving the bound pins must call
/// [`ButtonTracker::on_interrupt`](crate::ButtonTracker::on_interrupt); the
/// tracker rescans every button on each call, so the handler does not need
/// to know which pin fired.
pub trait ButtonHal {
    /// Identifies a physical pin, e.g. a GPIO number.
    type PinId: Copy;

    /// A configured input pin. Buttons are wired active-low, so a pressed
    /// button reads low.
    type Input: InputPin;

    /// Error reported when a pin cannot be configured or bound.
    type Error;

    /// Configures `pin` as a digital input with its pull-up enabled.
    fn configure_pin(&mut self, pin: Self::PinId) -> Result<Self::Input, Self::Error>;

    /// Arms an interrupt on `pin` for the given edge.
    fn bind_interrupt(
        &mut self,
        pin: Self::PinId,
        input: &mut Self::Input,
        edge: Edge,
    ) -> Result<(), Self::Error>;

    /// Disarms the interrupt on `pin`. Must not fail.
    fn unbind_interrupt(&mut self, pin: Self::PinId, input: &mut Self::Input);
}
