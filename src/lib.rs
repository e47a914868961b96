#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ButtonTracker`**: Owns the debounced state of a fixed set of buttons and answers queries
//! - **`ButtonHal`**: Trait to implement for your pin configuration and interrupt hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`TrackerConfig`**: Debounce window and pull-up settle time
//! - **`ButtonId`**: Index of a button in the pin list passed to `start`
//! - **`ButtonRecord`**: Per-button state and the quiet-period debounce step
//!
//! Buttons are wired active-low: the pull-up holds a released button high and
//! a pressed button pulls the pin low.

#[macro_use]
mod fmt;

pub mod config;
pub mod hal;
pub mod record;
pub mod time;
pub mod tracker;
pub mod types;

pub use config::{DEFAULT_DEBOUNCE_MS, DEFAULT_SETTLE_MS, TrackerConfig};
pub use hal::{ButtonHal, Edge};
pub use record::ButtonRecord;
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use tracker::ButtonTracker;
pub use types::{ButtonError, ButtonId, StartError};
