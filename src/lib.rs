//! TeaKey v1.4 macropad overlay
//!
//! Board configuration, keymap and the user features of the TeaKey macropad:
//! a stopwatch on one key, layer cycling on another and a status screen on
//! the 128x64 OLED. Matrix scanning, USB and the display driver belong to the
//! host firmware, which drives this crate through [`overlay::UserHooks`].
#![no_std]

// Use std when running tests, see: https://stackoverflow.com/a/28186509
// Make sure to use different target when testing, e.g.
//   cargo test --target x86_64-unknown-linux-gnu
#[cfg(test)]
#[macro_use]
extern crate std;

#[macro_use]
mod macros;

pub mod config;
pub mod display;
pub mod keyboard;
pub mod layers;
pub mod overlay;
pub mod stopwatch;

/// Build metadata generated by `built`
pub mod build_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
