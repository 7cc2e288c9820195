//! Board configuration
//!
//! Everything here is selected at build time. Optional flags are cargo
//! features: `encoder-direction-flip` and `row2col`.

use static_assertions as sa;

/// GPIO used for I2C1 data line (GP10)
pub const I2C1_SDA_PIN: u8 = 10;
/// GPIO used for I2C1 clock line (GP7)
pub const I2C1_SCL_PIN: u8 = 7;

/// Orientation of the display panel
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// Direction in which the matrix diodes conduct
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiodeDirection {
    Col2Row,
    Row2Col,
}

/// OLED panel parameters handed to the display on initialization
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PanelConfig {
    pub width: u16,
    pub height: u16,
    /// 7-bit I2C address of the controller
    pub address: u8,
    pub rotation: Rotation,
    pub brightness: u8,
    /// Idle time in milliseconds after which the panel starts scrolling
    pub scroll_timeout: Option<u32>,
}

/// SH1106 128x64 on I2C1, mounted upside down
pub const PANEL: PanelConfig = PanelConfig {
    width: 128,
    height: 64,
    address: 0x3C,
    rotation: Rotation::Deg180,
    brightness: 255,
    scroll_timeout: None,
};

pub const DIODE_DIRECTION: DiodeDirection = if cfg!(feature = "row2col") {
    DiodeDirection::Row2Col
} else {
    DiodeDirection::Col2Row
};

/// Swap clockwise and counter-clockwise for all encoders
pub const ENCODER_DIRECTION_FLIP: bool = cfg!(feature = "encoder-direction-flip");

pub const MATRIX_ROWS: usize = 3;
pub const MATRIX_COLS: usize = 3;
pub const NUM_ENCODERS: usize = 2;

sa::const_assert!(PANEL.width as usize * PANEL.height as usize <= 128 * 64);
