//! Identifiers and error types.

/// An identifier for a button managed by a tracker.
///
/// Button ids are dense: the button started from the `i`-th pin in the list
/// passed to [`ButtonTracker::start`](crate::ButtonTracker::start) has id `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonId(pub usize);

impl From<usize> for ButtonId {
    fn from(id: usize) -> Self {
        ButtonId(id)
    }
}

impl From<ButtonId> for usize {
    fn from(id: ButtonId) -> Self {
        id.0
    }
}

/// Errors that can occur while starting a tracker.
///
/// `E` is the error type of the [`ButtonHal`](crate::ButtonHal) collaborator.
/// Whatever the variant, a failed start leaves the tracker inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartError<E> {
    /// No pins were provided.
    EmptyPinList,

    /// More pins were provided than the tracker can hold.
    CapacityExceeded { requested: usize, capacity: usize },

    /// The pin at `index` could not be configured as a pulled-up input.
    ConfigurePin { index: usize, error: E },

    /// The interrupt for the pin at `index` could not be bound.
    BindInterrupt { index: usize, error: E },
}

impl<E> core::fmt::Display for StartError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StartError::EmptyPinList => {
                write!(f, "at least one button pin is required")
            }
            StartError::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "{} button pins requested but tracker capacity is {}",
                    requested, capacity
                )
            }
            StartError::ConfigurePin { index, .. } => {
                write!(f, "failed to configure button pin at index {}", index)
            }
            StartError::BindInterrupt { index, .. } => {
                write!(f, "failed to bind interrupt for button pin at index {}", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for StartError<E> {}

/// Errors returned by button queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonError {
    /// The button id is outside `0..count` of an active tracker.
    InvalidButtonId { id: ButtonId, count: usize },
}

impl core::fmt::Display for ButtonError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ButtonError::InvalidButtonId { id, count } => {
                write!(
                    f,
                    "button ID {} is out of range for {} managed buttons",
                    id.0, count
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ButtonError {}
