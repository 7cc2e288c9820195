//! Logging that works with or without `defmt`
//!
//! Firmware builds enable the `defmt` feature and get its macros. Unit tests on
//! the host print to stderr, and builds without a logger drop the messages.
//! Messages must stick to the `{}` placeholder so both syntaxes accept them.

#![allow(unused_macros)]

#[cfg(all(not(test), feature = "defmt"))]
#[macro_use]
mod with_defmt {
    macro_rules! debug {
        ($($arg:expr),* $(,)?) => {
            defmt::debug!($($arg),*)
        };
    }

    macro_rules! info {
        ($($arg:expr),* $(,)?) => {
            defmt::info!($($arg),*)
        };
    }

    macro_rules! warn {
        ($($arg:expr),* $(,)?) => {
            defmt::warn!($($arg),*)
        };
    }
}


#[allow(unused)]
#[cfg(all(not(test), not(feature = "defmt")))]
#[macro_use]
mod silent {
    macro_rules! debug {
        ($($arg:expr),* $(,)?) => {{ let _ = ($(&$arg),*); }};
    }

    macro_rules! info {
        ($($arg:expr),* $(,)?) => {{ let _ = ($(&$arg),*); }};
    }

    macro_rules! warn {
        ($($arg:expr),* $(,)?) => {{ let _ = ($(&$arg),*); }};
    }
}
