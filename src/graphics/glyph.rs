//! The fixed glyph set used by the start splash and the victory banner.

use crate::hal::{Colour, PixelSink, RenderError};

use super::{draw_line, Point};

/// One of the hand-authored letter shapes, each a small set of line segments
/// traced inside a caller-supplied bounding box.
///
/// The numeric ids are those of the original display protocol;
/// [`Glyph::from_id`] returns [`None`] for ids outside it, which callers treat
/// as a no-op.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Glyph {
    S,
    T,
    A,
    R,
    O,
    P,
    W,
    I,
    N,
    E,
    One,
    Two,
}

impl Glyph {
    /// Map a raw glyph id to its shape, if the id is known.
    pub fn from_id(id: u8) -> Option<Glyph> {
        match id {
            1 => Some(Glyph::S),
            2 => Some(Glyph::T),
            3 => Some(Glyph::A),
            4 => Some(Glyph::R),
            5 => Some(Glyph::O),
            6 => Some(Glyph::P),
            7 => Some(Glyph::W),
            8 => Some(Glyph::I),
            9 => Some(Glyph::N),
            10 => Some(Glyph::E),
            11 => Some(Glyph::One),
            12 => Some(Glyph::Two),
            _ => None,
        }
    }
}

/// Trace `glyph` inside the bounding box with top-left `p1` and bottom-right
/// `p2`. The segment sets are hand-authored for the portrait-mounted panel and
/// kept exactly as the original drew them.
pub fn draw_glyph<S: PixelSink>(
    sink: &mut S,
    p1: Point,
    p2: Point,
    glyph: Glyph,
    colour: Colour,
) -> Result<(), RenderError> {
    let (x1, y1, x2, y2) = (p1.x, p1.y, p2.x, p2.y);
    let mid_x = (x1 + x2) / 2;
    let mid_y = (y1 + y2) / 2;
    let seg =
        |sink: &mut S, ax, ay, bx, by| draw_line(sink, Point::new(ax, ay), Point::new(bx, by), colour);
    match glyph {
        Glyph::S => {
            seg(sink, x1, y1, x1, y2)?;
            seg(sink, x1, y2, mid_x, y2)?;
            seg(sink, mid_x, y1, mid_x, y2)?;
            seg(sink, mid_x, y1, x2, y1)?;
            seg(sink, x2, y1, x2, y2)?;
        }
        Glyph::T => {
            seg(sink, x1, y1, x1, y2)?;
            seg(sink, x1, mid_y, x2, mid_y)?;
        }
        Glyph::A => {
            seg(sink, x1, y1, x2, y1)?;
            seg(sink, mid_x, y1, mid_x, y2)?;
            seg(sink, x1, y2, x2, y2)?;
            seg(sink, x1, y1, x1, y2)?;
        }
        Glyph::R => {
            seg(sink, x1, y2, x2, y2)?;
            seg(sink, x1, y1, mid_x, y1)?;
            seg(sink, mid_x, y1, mid_x, y2)?;
            seg(sink, x1, y1, x1, y2)?;
            seg(sink, mid_x, y2, x2, y1)?;
        }
        Glyph::O => {
            seg(sink, x1, y1, x2, y1)?;
            seg(sink, x2, y1, x2, y2)?;
            seg(sink, x2, y2, x1, y2)?;
            seg(sink, x1, y2, x1, y1)?;
        }
        Glyph::P => {
            seg(sink, x1, y2, x2, y2)?;
            seg(sink, x1, y1, mid_x, y1)?;
            seg(sink, mid_x, y1, mid_x, y2)?;
            seg(sink, x1, y1, x1, y2)?;
        }
        Glyph::W => {
            seg(sink, x1, y1, x2, y1)?;
            seg(sink, x1, y2, x2, y2)?;
            seg(sink, x2, y2, mid_x, mid_y)?;
            seg(sink, x2, y1, mid_x, mid_y)?;
        }
        Glyph::I => {
            seg(sink, x1, y1, x1, y2)?;
            seg(sink, x1, mid_y, x2, mid_y)?;
            seg(sink, x2, y1, x2, y2)?;
        }
        Glyph::N => {
            seg(sink, x1, y1, x2, y1)?;
            seg(sink, x1, y2, x2, y2)?;
            seg(sink, x1, y2, x2, y1)?;
        }
        Glyph::E => {
            seg(sink, mid_x, y1, mid_x, y2)?;
            seg(sink, x1, y2, x2, y2)?;
            seg(sink, x1, y1, x1, y2)?;
            seg(sink, x2, y1, x2, y2)?;
        }
        Glyph::One => {
            seg(sink, x1, y1, x2, y1)?;
        }
        Glyph::Two => {
            seg(sink, x1, y1, x1, y2)?;
            seg(sink, x1, y1, mid_x, y1)?;
            seg(sink, mid_x, y1, mid_x, y2)?;
            seg(sink, mid_x, y2, x2, y2)?;
            seg(sink, x2, y1, x2, y2)?;
        }
    }
    Ok(())
}
