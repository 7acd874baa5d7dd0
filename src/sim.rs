//! Simulated peripherals, standing in for the two-board hardware.
//!
//! The match loop is generic over the [`crate::hal`] traits; these
//! implementations back the desktop binary and the test suites with
//! deterministic, inspectable state.

use std::time::Duration;

use crate::hal::{
    Colour, DelayTimer, DiscreteInput, PixelSink, PositionSensor, RenderError, RunGate,
    SevenSegment, SpeedControl, Watchdog,
};

/// In-memory pixel grid with the panel's reject-out-of-range behaviour.
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Colour>,
}

impl Framebuffer {
    /// A framebuffer with the portrait LT24 panel's dimensions.
    pub fn lt24() -> Framebuffer {
        Framebuffer::new(240, 320)
    }

    pub fn new(width: u32, height: u32) -> Framebuffer {
        Framebuffer {
            width,
            height,
            pixels: vec![Colour::BLACK; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read back a pixel. Panics outside the panel, unlike the write path,
    /// since reads only happen from inspection code that knows the bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Colour {
        assert!(x < self.width && y < self.height, "read at ({x}, {y})");
        self.pixels[(y * self.width + x) as usize]
    }
}

impl PixelSink for Framebuffer {
    fn set_pixel(&mut self, colour: Colour, x: u32, y: u32) -> Result<(), RenderError> {
        if x >= self.width || y >= self.height {
            return Err(RenderError { x, y });
        }
        self.pixels[(y * self.width + x) as usize] = colour;
        Ok(())
    }
}

/// Watchdog that only tallies its resets.
#[derive(Default)]
pub struct CountingWatchdog {
    pub resets: u64,
}

impl Watchdog for CountingWatchdog {
    fn reset(&mut self) {
        self.resets += 1;
    }
}

/// Timer that really sleeps, for watching a match play out at hardware pace.
pub struct SleepTimer;

impl DelayTimer for SleepTimer {
    fn sleep_us(&mut self, micros: u32) {
        std::thread::sleep(Duration::from_micros(u64::from(micros)));
    }
}

/// Timer that returns immediately and tallies the requested time instead.
#[derive(Default)]
pub struct InstantTimer {
    pub slept_us: u64,
}

impl DelayTimer for InstantTimer {
    fn sleep_us(&mut self, micros: u32) {
        self.slept_us += u64::from(micros);
    }
}

/// Position sensor sweeping a triangle wave over the full 12-bit range, so
/// paddle 1 patrols the court on its own.
pub struct SweepPosition {
    value: u16,
    rising: bool,
    step: u16,
}

impl SweepPosition {
    pub fn new(step: u16) -> SweepPosition {
        SweepPosition {
            value: 0x0800,
            rising: true,
            step,
        }
    }
}

impl PositionSensor for SweepPosition {
    fn sample(&mut self) -> u16 {
        if self.rising {
            self.value = self.value.saturating_add(self.step);
            if self.value >= 0x0FFF {
                self.value = 0x0FFF;
                self.rising = false;
            }
        } else {
            self.value = self.value.saturating_sub(self.step);
            if self.value == 0 {
                self.rising = true;
            }
        }
        self.value
    }
}

/// Directional input that never presses either button.
pub struct HoldButtons;

impl DiscreteInput for HoldButtons {
    fn read(&mut self) -> u8 {
        0
    }
}

/// Speed control pinned to one sample value.
pub struct FixedSpeed(pub u16);

impl SpeedControl for FixedSpeed {
    fn sample(&mut self) -> u16 {
        self.0
    }
}

/// Seven-segment readout that records the last value per position.
#[derive(Default)]
pub struct LoggingSevenSegment {
    pub digits: [u8; 6],
}

impl SevenSegment for LoggingSevenSegment {
    fn display_digit(&mut self, position: u8, value: u8) {
        if let Some(slot) = self
            .digits
            .get_mut(usize::from(position).wrapping_sub(1))
        {
            *slot = value;
            log::debug!("digit {position} <- {value}");
        }
    }
}

/// Run gate that reads not-running for a fixed number of polls, then running
/// forever.
pub struct PressGate {
    polls_until_pressed: u32,
}

impl PressGate {
    pub fn new(polls_until_pressed: u32) -> PressGate {
        PressGate { polls_until_pressed }
    }
}

impl RunGate for PressGate {
    fn is_running(&mut self) -> bool {
        if self.polls_until_pressed == 0 {
            true
        } else {
            self.polls_until_pressed -= 1;
            false
        }
    }
}
