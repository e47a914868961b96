//! Interrupt-driven debounced button tracker.
//!
//! Provides [`ButtonTracker`], which owns the state table for a fixed set of
//! buttons, arms their interrupts through a [`ButtonHal`], and answers
//! foreground queries about pressed state and pending changes.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use heapless::Vec;

use crate::config::TrackerConfig;
use crate::hal::{ButtonHal, Edge};
use crate::record::ButtonRecord;
use crate::time::{TimeInstant, TimeSource};
use crate::types::{ButtonError, ButtonId, StartError};

/// One managed button: its pin, the configured input and its debounce state.
struct Slot<H: ButtonHal, I> {
    pin: H::PinId,
    input: H::Input,
    record: ButtonRecord<I>,
}

/// Tracks the debounced state of a set of interrupt-driven buttons.
///
/// All methods take `&self`, so a tracker can be placed in a `static` and
/// shared between the foreground and the interrupt handler that calls
/// [`on_interrupt`](Self::on_interrupt). The state table is guarded by a
/// critical section; every query, including read-and-clear of a change flag,
/// is indivisible with respect to the interrupt handler.
///
/// Trackers are independent of each other. Firmware usually needs one, but
/// nothing prevents creating several.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `H` - Pin and interrupt hardware implementation type
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `N` - Maximum number of buttons
pub struct ButtonTracker<'t, H: ButtonHal, I: TimeInstant, T: TimeSource<I>, const N: usize> {
    table: Mutex<RefCell<Option<Vec<Slot<H, I>, N>>>>,
    // Set by an interrupt that found no table, i.e. one raised while `start`
    // was binding pins.
    missed_edge: Mutex<Cell<bool>>,
    time_source: &'t T,
    config: TrackerConfig<I::Duration>,
}

impl<'t, H: ButtonHal, I: TimeInstant, T: TimeSource<I>, const N: usize>
    ButtonTracker<'t, H, I, T, N>
{
    /// Creates an inactive tracker with the default configuration.
    pub fn new(time_source: &'t T) -> Self {
        Self::with_config(time_source, TrackerConfig::new())
    }

    /// Creates an inactive tracker with an explicit configuration.
    ///
    /// This is a `const fn` so that a tracker can be declared as a `static`.
    pub const fn with_config(time_source: &'t T, config: TrackerConfig<I::Duration>) -> Self {
        Self {
            table: Mutex::new(RefCell::new(None)),
            missed_edge: Mutex::new(Cell::new(false)),
            time_source,
            config,
        }
    }

    /// Returns the configuration the tracker was created with.
    pub fn config(&self) -> &TrackerConfig<I::Duration> {
        &self.config
    }

    /// Starts tracking the buttons wired to `pins`.
    ///
    /// The position of each pin in `pins` becomes its [`ButtonId`]. A tracker
    /// that is already active is stopped first. Each pin is configured as a
    /// pulled-up input, then the tracker waits for the configured settle time
    /// before binding the interrupts, so the pull-ups do not produce a
    /// spurious first edge.
    ///
    /// All buttons start released with no pending change. A button that is
    /// already held down when `start` runs reads as released until its next
    /// edge. An edge raised while the interrupts are being bound triggers a
    /// full resample once the table is in place.
    ///
    /// # Errors
    /// * `EmptyPinList` - `pins` is empty
    /// * `CapacityExceeded` - `pins` holds more than `N` pins
    /// * `ConfigurePin` - the HAL refused to configure a pin
    /// * `BindInterrupt` - the HAL refused to bind an interrupt; interrupts
    ///   already bound by this call are unbound again
    ///
    /// On error the tracker is left inactive.
    pub fn start<P, D>(
        &self,
        hal: &mut H,
        pins: P,
        delay: &mut D,
    ) -> Result<(), StartError<H::Error>>
    where
        P: IntoIterator<Item = H::PinId>,
        D: DelayNs,
    {
        self.stop(hal);

        let mut requested: Vec<H::PinId, N> = Vec::new();
        let mut pins = pins.into_iter();
        while let Some(pin) = pins.next() {
            if requested.push(pin).is_err() {
                let requested = N + 1 + pins.count();
                warn!("{} button pins exceed capacity of {}", requested, N);
                return Err(StartError::CapacityExceeded {
                    requested,
                    capacity: N,
                });
            }
        }

        if requested.is_empty() {
            warn!("button tracker started without pins");
            return Err(StartError::EmptyPinList);
        }

        let mut table: Vec<Slot<H, I>, N> = Vec::new();
        for (index, pin) in requested.iter().copied().enumerate() {
            let input = hal.configure_pin(pin).map_err(|error| {
                warn!("failed to configure button pin at index {}", index);
                StartError::ConfigurePin { index, error }
            })?;
            // Same capacity as `requested`, cannot overflow.
            let _ = table.push(Slot {
                pin,
                input,
                record: ButtonRecord::new(),
            });
        }

        delay.delay_ms(self.config.settle_time_ms);

        critical_section::with(|cs| self.missed_edge.borrow(cs).set(false));

        for index in 0..table.len() {
            let slot = &mut table[index];
            if let Err(error) = hal.bind_interrupt(slot.pin, &mut slot.input, Edge::Any) {
                warn!("failed to bind interrupt for button pin at index {}", index);
                for bound in table[..index].iter_mut() {
                    hal.unbind_interrupt(bound.pin, &mut bound.input);
                }
                return Err(StartError::BindInterrupt { index, error });
            }
        }

        let count = table.len();
        let missed = critical_section::with(|cs| {
            *self.table.borrow(cs).borrow_mut() = Some(table);
            self.missed_edge.borrow(cs).replace(false)
        });

        // An edge raised between arming a pin and publishing the table
        // found the tracker inactive; resample so it is not lost.
        if missed {
            debug!("edge raised while binding, resampling buttons");
            self.on_interrupt();
        }

        debug!("button tracker started with {} buttons", count);
        Ok(())
    }

    /// Stops tracking, unbinds every interrupt and releases the pins.
    ///
    /// Does nothing if the tracker is not active. The table is detached
    /// before the interrupts are unbound, so an interrupt that is still
    /// pending finds an inactive tracker.
    pub fn stop(&self, hal: &mut H) {
        let Some(mut table) = critical_section::with(|cs| self.table.borrow(cs).take()) else {
            return;
        };

        for slot in table.iter_mut() {
            hal.unbind_interrupt(slot.pin, &mut slot.input);
        }

        debug!("button tracker stopped, {} buttons released", table.len());
    }

    /// Samples every managed button and applies the debounce.
    ///
    /// Call this from the interrupt handler of every bound pin. The whole
    /// table is rescanned, whichever pin fired. Calling it from a periodic
    /// timer as well is harmless and settles a button whose last bounce left
    /// the input at the opposite level of the accepted state.
    ///
    /// Returns the number of transitions accepted in this pass, or 0 if the
    /// tracker is inactive.
    pub fn on_interrupt(&self) -> usize {
        critical_section::with(|cs| {
            let mut table = self.table.borrow(cs).borrow_mut();
            let Some(table) = table.as_mut() else {
                self.missed_edge.borrow(cs).set(true);
                return 0;
            };

            let now = self.time_source.now();
            let window = self.config.debounce_window;
            let mut accepted = 0;

            for (index, slot) in table.iter_mut().enumerate() {
                // Active-low: the pull-up holds a released button high.
                let pressed = match slot.input.is_low() {
                    Ok(low) => low,
                    Err(_) => {
                        warn!("failed to read button {}", index);
                        continue;
                    }
                };

                if slot.record.observe(pressed, now, window) {
                    trace!("button {} pressed: {}", index, pressed);
                    accepted += 1;
                }
            }

            accepted
        })
    }

    /// Returns true if the button is down, clearing its change flag when
    /// `clear` is set.
    ///
    /// Returns `Ok(false)` if the tracker is inactive.
    pub fn is_down(&self, id: ButtonId, clear: bool) -> Result<bool, ButtonError> {
        self.query(id, |record| {
            let pressed = record.is_pressed();
            if clear {
                record.clear_change();
            }
            pressed
        })
    }

    /// Returns true if the button is up, clearing its change flag when
    /// `clear` is set.
    ///
    /// Returns `Ok(false)` if the tracker is inactive.
    pub fn is_up(&self, id: ButtonId, clear: bool) -> Result<bool, ButtonError> {
        self.query(id, |record| {
            let released = !record.is_pressed();
            if clear {
                record.clear_change();
            }
            released
        })
    }

    /// Returns true if the button was pressed and the press has not been
    /// consumed yet.
    pub fn was_clicked(&self, id: ButtonId, clear: bool) -> Result<bool, ButtonError> {
        self.query(id, |record| record.take_change(clear) && record.is_pressed())
    }

    /// Returns true if the button was released and the release has not been
    /// consumed yet.
    pub fn was_released(&self, id: ButtonId, clear: bool) -> Result<bool, ButtonError> {
        self.query(id, |record| record.take_change(clear) && !record.is_pressed())
    }

    /// Returns true if the button changed state since its change flag was
    /// last cleared, clearing it when `clear` is set.
    pub fn has_changed(&self, id: ButtonId, clear: bool) -> Result<bool, ButtonError> {
        self.query(id, |record| record.take_change(clear))
    }

    /// Clears the change flag of every button.
    ///
    /// Useful when entering or leaving an interactive context, so presses
    /// made in between do not trigger an unexpected action.
    pub fn clear_all_changes(&self) {
        critical_section::with(|cs| {
            if let Some(table) = self.table.borrow(cs).borrow_mut().as_mut() {
                for slot in table.iter_mut() {
                    slot.record.clear_change();
                }
            }
        });
    }

    /// Returns the number of managed buttons, or 0 if inactive.
    pub fn count(&self) -> usize {
        critical_section::with(|cs| {
            self.table
                .borrow(cs)
                .borrow()
                .as_ref()
                .map_or(0, |table| table.len())
        })
    }

    /// Returns true if the tracker has been started and not stopped.
    pub fn is_active(&self) -> bool {
        critical_section::with(|cs| self.table.borrow(cs).borrow().is_some())
    }

    /// Returns the pin a button was started with.
    pub fn pin(&self, id: ButtonId) -> Option<H::PinId> {
        critical_section::with(|cs| {
            self.table
                .borrow(cs)
                .borrow()
                .as_ref()
                .and_then(|table| table.get(id.0))
                .map(|slot| slot.pin)
        })
    }

    /// Runs `f` on a button record inside a critical section.
    ///
    /// Inactive trackers answer `false` for every id.
    fn query<F>(&self, id: ButtonId, f: F) -> Result<bool, ButtonError>
    where
        F: FnOnce(&mut ButtonRecord<I>) -> bool,
    {
        critical_section::with(|cs| {
            let mut table = self.table.borrow(cs).borrow_mut();
            let Some(table) = table.as_mut() else {
                return Ok(false);
            };

            let count = table.len();
            table
                .get_mut(id.0)
                .map(|slot| f(&mut slot.record))
                .ok_or(ButtonError::InvalidButtonId { id, count })
        })
    }
}
