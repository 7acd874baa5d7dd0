//! Capability interfaces for the board peripherals the game runs against.
//!
//! The core never touches hardware directly : every external collaborator of the
//! original two-board build (LCD pixel writes, the watchdog, microsecond delays,
//! the paddle sensors, the speed switches, the seven-segment displays and the
//! run gate) is injected through one of these traits, so the whole game can also
//! run against the simulated implementations in [`crate::sim`].

/// A packed RGB565 pixel value. Only identity matters to the game; the named
/// constants are the full palette it draws with.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Colour(pub u16);

impl Colour {
    pub const WHITE: Colour = Colour(0xFFFF);
    pub const BLACK: Colour = Colour(0x0000);
    pub const RED: Colour = Colour(0xF800);
    pub const GREEN: Colour = Colour(0x07E0);
    pub const YELLOW: Colour = Colour(0xFFE0);
    /// The grey the court is filled with, and what in-court erases paint over.
    pub const BACKGROUND: Colour = Colour(0x39E7);
}

/// A rejected pixel write.
///
/// Drawing operations abort on the first failure and propagate it; nothing is
/// retried, since under the erase/redraw protocol a retry is indistinguishable
/// from compounding visual corruption.
#[derive(thiserror::Error, Debug, Clone, Copy, Eq, PartialEq)]
#[error("pixel write rejected at ({x}, {y})")]
pub struct RenderError {
    pub x: u32,
    pub y: u32,
}

/// Destination for single pixel writes. `(0, 0)` is the display's top-left
/// corner; writing outside the panel is a caller bug the sink reports as a
/// [`RenderError`].
pub trait PixelSink {
    fn set_pixel(&mut self, colour: Colour, x: u32, y: u32) -> Result<(), RenderError>;
}

/// The host watchdog. Every long-running loop must reset it at least once per
/// bounded window or the board reboots.
pub trait Watchdog {
    fn reset(&mut self);
}

/// Blocking microsecond delay, used to pace the ball animation and to hold the
/// bounce and post-point pauses.
pub trait DelayTimer {
    fn sleep_us(&mut self, micros: u32);
}

/// 12-bit position sample steering paddle 1 (the camera-tracked paddle of the
/// original build).
pub trait PositionSensor {
    fn sample(&mut self) -> u16;
}

/// 2-bit directional code steering paddle 2 : 1 moves a pixel toward max x,
/// 2 a pixel toward min x, anything else holds.
pub trait DiscreteInput {
    fn read(&mut self) -> u8;
}

/// 10-bit sample subtracted (scaled) from the base step delay to set the
/// ball's speed.
pub trait SpeedControl {
    fn sample(&mut self) -> u16;
}

/// The external seven-segment encoder. Positions are 1..=6; value 16 is the
/// conventional blank code.
pub trait SevenSegment {
    fn display_digit(&mut self, position: u8, value: u8);
}

/// Polled run/pause gate. Reading not-running means the tick loop must hold.
pub trait RunGate {
    fn is_running(&mut self) -> bool;
}
