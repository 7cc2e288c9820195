//! Layout and functions of keys on the macropad

use keyberon::{
    action::{self, k},
    key_code::KeyCode::{self, *},
    layout::{self, layout},
};

use crate::config::{ENCODER_DIRECTION_FLIP, MATRIX_COLS, MATRIX_ROWS, NUM_ENCODERS};

/// Keys handled by the overlay instead of the layout engine
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CustomAction {
    /// Tap to start/pause the stopwatch, hold to reset it
    Timer,
    /// Advance to the next layer
    LayerCycle,
}

pub const N_LAYERS: usize = 5;

pub type Layers = layout::Layers<MATRIX_COLS, MATRIX_ROWS, N_LAYERS, CustomAction>;
pub type Layout = layout::Layout<MATRIX_COLS, MATRIX_ROWS, N_LAYERS, CustomAction>;
type Action = action::Action<CustomAction>;

const TIMER: Action = Action::Custom(CustomAction::Timer);
const CYCLE: Action = Action::Custom(CustomAction::LayerCycle);
const PLAY: Action = k(MediaPlayPause);

/// Matrix position of the stopwatch key
pub const TIMER_KEY: (u8, u8) = (2, 0);
/// Matrix position of the media key
pub const PLAY_KEY: (u8, u8) = (2, 1);
/// Matrix position of the layer cycling key
pub const CYCLE_KEY: (u8, u8) = (2, 2);

// All layers are the same for now, they differ only by the index on the display
pub static LAYERS: Layers = layout! {
    {
        [ 1         2        3         ]
        [ 4         5        6         ]
        [ {TIMER}   {PLAY}   {CYCLE}   ]
    }
    {
        [ 1         2        3         ]
        [ 4         5        6         ]
        [ {TIMER}   {PLAY}   {CYCLE}   ]
    }
    {
        [ 1         2        3         ]
        [ 4         5        6         ]
        [ {TIMER}   {PLAY}   {CYCLE}   ]
    }
    {
        [ 1         2        3         ]
        [ 4         5        6         ]
        [ {TIMER}   {PLAY}   {CYCLE}   ]
    }
    {
        [ 1         2        3         ]
        [ 4         5        6         ]
        [ {TIMER}   {PLAY}   {CYCLE}   ]
    }
};

/// Get keyboard layout
pub fn layout() -> Layout {
    Layout::new(&LAYERS)
}

/// Key sent for (counter-clockwise, clockwise) rotation of each encoder
pub type EncoderMap = [[(KeyCode, KeyCode); NUM_ENCODERS]; N_LAYERS];

pub static ENCODERS: EncoderMap = [[(A, B), (W, L)]; N_LAYERS];

/// Key to tap for one detent of encoder `index` on the given layer
pub fn encoder_key(layer: usize, index: usize, clockwise: bool) -> Option<KeyCode> {
    let (ccw, cw) = *ENCODERS.get(layer)?.get(index)?;
    Some(if clockwise != ENCODER_DIRECTION_FLIP { cw } else { ccw })
}
