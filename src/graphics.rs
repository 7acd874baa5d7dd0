//! Rasterization primitives for the LCD.
//!
//! Everything here decomposes into [`PixelSink`] writes and fails fast : the
//! first rejected pixel aborts the rest of the operation and propagates its
//! [`RenderError`] to the caller.

use crate::hal::{Colour, PixelSink, RenderError};

pub use glyph::{draw_glyph, Glyph};

mod glyph;

/// A display coordinate. `(0, 0)` is the top-left corner of the panel.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Point {
        Point { x, y }
    }
}

/// Draw a straight line between `p1` and `p2`.
///
/// Horizontal and vertical lines are plotted as direct pixel runs. Everything
/// else uses integer-only Bresenham : steep lines (|Δy| > |Δx|) run in a
/// swapped coordinate space that is un-swapped per plotted pixel, and the walk
/// always goes from the lower to the higher x, so both endpoint orders plot
/// the same pixel set and every column between the endpoints gets exactly one
/// pixel.
pub fn draw_line<S: PixelSink>(
    sink: &mut S,
    p1: Point,
    p2: Point,
    colour: Colour,
) -> Result<(), RenderError> {
    if p1.y == p2.y {
        for x in p1.x.min(p2.x)..=p1.x.max(p2.x) {
            sink.set_pixel(colour, x, p1.y)?;
        }
        return Ok(());
    }
    if p1.x == p2.x {
        for y in p1.y.min(p2.y)..=p1.y.max(p2.y) {
            sink.set_pixel(colour, p1.x, y)?;
        }
        return Ok(());
    }

    let steep = p2.y.abs_diff(p1.y) > p2.x.abs_diff(p1.x);
    let (mut x1, mut y1) = (i64::from(p1.x), i64::from(p1.y));
    let (mut x2, mut y2) = (i64::from(p2.x), i64::from(p2.y));
    if steep {
        std::mem::swap(&mut x1, &mut y1);
        std::mem::swap(&mut x2, &mut y2);
    }
    if x1 > x2 {
        std::mem::swap(&mut x1, &mut x2);
        std::mem::swap(&mut y1, &mut y2);
    }

    let delta_x = x2 - x1;
    let delta_y = (y2 - y1).abs();
    let step_y: i64 = if y1 < y2 { 1 } else { -1 };
    let mut error = -(delta_x / 2);
    let mut y = y1;
    for x in x1..=x2 {
        if steep {
            sink.set_pixel(colour, y as u32, x as u32)?;
        } else {
            sink.set_pixel(colour, x as u32, y as u32)?;
        }
        error += delta_y;
        if error >= 0 {
            y += step_y;
            error -= delta_x;
        }
    }
    Ok(())
}

/// Draw a rectangle with top-left corner `p1` and bottom-right corner `p2`.
///
/// The outline is four [`draw_line`] calls in `colour`. With a fill colour,
/// every interior pixel (exclusive of the 1-pixel outline) is plotted too,
/// iterating from the far corner inward; a degenerate box simply has an empty
/// interior.
pub fn draw_box<S: PixelSink>(
    sink: &mut S,
    p1: Point,
    p2: Point,
    colour: Colour,
    fill: Option<Colour>,
) -> Result<(), RenderError> {
    draw_line(sink, p1, Point::new(p2.x, p1.y), colour)?;
    draw_line(sink, p1, Point::new(p1.x, p2.y), colour)?;
    draw_line(sink, Point::new(p2.x, p1.y), p2, colour)?;
    draw_line(sink, Point::new(p1.x, p2.y), p2, colour)?;
    if let Some(fill) = fill {
        for x in (p1.x + 1..p2.x).rev() {
            for y in (p1.y + 1..p2.y).rev() {
                sink.set_pixel(fill, x, y)?;
            }
        }
    }
    Ok(())
}

/// Draw a circle of radius `r` around `centre` with the midpoint algorithm,
/// plotting all eight octant reflections per step.
///
/// With a fill colour, each boundary point is preceded by a straight fill line
/// from the circle's vertical axis out to that point. This produces filled
/// wedges rather than a scanline fill and leaves an uneven seam pattern; the
/// visual is preserved from the original build and callers must accept it.
pub fn draw_circle<S: PixelSink>(
    sink: &mut S,
    centre: Point,
    r: u32,
    colour: Colour,
    fill: Option<Colour>,
) -> Result<(), RenderError> {
    let (cx, cy) = (i64::from(centre.x), i64::from(centre.y));
    let mut x = i64::from(r) - 1;
    let mut y: i64 = 0;
    let mut delta_x: i64 = 1;
    let mut delta_y: i64 = 1;
    let mut error = delta_x - (i64::from(r) << 1);

    while x >= y {
        circle_point(sink, cx, cx + x, cy + y, colour, fill)?;
        circle_point(sink, cx, cx + y, cy + x, colour, fill)?;
        circle_point(sink, cx, cx - y, cy + x, colour, fill)?;
        circle_point(sink, cx, cx - x, cy + y, colour, fill)?;
        circle_point(sink, cx, cx - x, cy - y, colour, fill)?;
        circle_point(sink, cx, cx - y, cy - x, colour, fill)?;
        circle_point(sink, cx, cx + y, cy - x, colour, fill)?;
        circle_point(sink, cx, cx + x, cy - y, colour, fill)?;

        if error <= 0 {
            y += 1;
            error += delta_y;
            delta_y += 2;
        }
        if error > 0 {
            x -= 1;
            delta_x += 2;
            error += delta_x - (i64::from(r) << 1);
        }
    }
    Ok(())
}

/// One boundary point of the circle, preceded in filled mode by its wedge fill
/// line from the vertical axis.
fn circle_point<S: PixelSink>(
    sink: &mut S,
    cx: i64,
    bx: i64,
    by: i64,
    colour: Colour,
    fill: Option<Colour>,
) -> Result<(), RenderError> {
    if let Some(fill) = fill {
        draw_line(
            sink,
            Point::new(cx as u32, by as u32),
            Point::new(bx as u32, by as u32),
            fill,
        )?;
    }
    sink.set_pixel(colour, bx as u32, by as u32)
}

/// Draw a triangle over the vertices `v1`, `v2`, `v3`.
///
/// With a fill colour, every pixel of the vertices' bounding box passing
/// [`point_in_triangle`] is filled before the outline goes on top. Callers are
/// responsible for a consistent vertex winding; an inconsistent winding fills
/// nothing or inverts the fill and is not validated.
pub fn draw_triangle<S: PixelSink>(
    sink: &mut S,
    v1: Point,
    v2: Point,
    v3: Point,
    colour: Colour,
    fill: Option<Colour>,
) -> Result<(), RenderError> {
    if let Some(fill) = fill {
        let min_x = v1.x.min(v2.x).min(v3.x);
        let max_x = v1.x.max(v2.x).max(v3.x);
        let min_y = v1.y.min(v2.y).min(v3.y);
        let max_y = v1.y.max(v2.y).max(v3.y);
        for x in (min_x..=max_x).rev() {
            for y in (min_y..=max_y).rev() {
                if point_in_triangle(Point::new(x, y), v1, v2, v3) {
                    sink.set_pixel(fill, x, y)?;
                }
            }
        }
    }
    draw_line(sink, v1, v2, colour)?;
    draw_line(sink, v1, v3, colour)?;
    draw_line(sink, v2, v3, colour)
}

/// Sign-consistent half-plane membership test : `p` is inside iff the cross
/// product against each of the three edges is non-negative for the winding
/// the vertices were given in.
pub fn point_in_triangle(p: Point, v1: Point, v2: Point, v3: Point) -> bool {
    let edge = |a: Point, b: Point| {
        (i64::from(b.y) - i64::from(a.y)) * (i64::from(p.x) - i64::from(a.x))
            + (i64::from(a.x) - i64::from(b.x)) * (i64::from(p.y) - i64::from(a.y))
    };
    edge(v1, v2) >= 0 && edge(v2, v3) >= 0 && edge(v3, v1) >= 0
}

/// Draw a dashed line : segments of length 5 every 10 pixels between the two
/// x bounds, exclusive. The court net uses this, and the ball redraws it after
/// every erase since its square may have punched through the dashes.
pub fn draw_dash<S: PixelSink>(
    sink: &mut S,
    p1: Point,
    p2: Point,
    colour: Colour,
) -> Result<(), RenderError> {
    let mut x = p1.x + 1;
    while x + 5 < p2.x {
        draw_line(sink, Point::new(x, p1.y), Point::new(x + 5, p2.y), colour)?;
        x += 10;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Framebuffer;

    fn plotted(fb: &Framebuffer) -> Vec<(u32, u32)> {
        let mut pixels = Vec::new();
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.pixel(x, y) != Colour::BLACK {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    #[test]
    fn line_is_symmetric_in_its_endpoints() {
        let cases = [
            (Point::new(3, 4), Point::new(17, 9)),
            (Point::new(5, 20), Point::new(9, 3)),
            (Point::new(0, 0), Point::new(12, 12)),
            (Point::new(7, 7), Point::new(7, 19)),
            (Point::new(2, 11), Point::new(30, 11)),
        ];
        for (a, b) in cases {
            let mut forward = Framebuffer::new(40, 40);
            let mut backward = Framebuffer::new(40, 40);
            draw_line(&mut forward, a, b, Colour::WHITE).unwrap();
            draw_line(&mut backward, b, a, Colour::WHITE).unwrap();
            assert_eq!(plotted(&forward), plotted(&backward), "{a:?} -> {b:?}");
        }
    }

    #[test]
    fn line_plots_one_pixel_per_column() {
        let mut fb = Framebuffer::new(40, 40);
        draw_line(&mut fb, Point::new(2, 5), Point::new(21, 13), Colour::WHITE).unwrap();
        for x in 2..=21 {
            let in_column = (0..40).filter(|&y| fb.pixel(x, y) == Colour::WHITE).count();
            assert_eq!(in_column, 1, "column {x}");
        }
    }

    #[test]
    fn box_fill_containment() {
        let mut fb = Framebuffer::new(40, 40);
        let (p1, p2) = (Point::new(5, 5), Point::new(15, 12));
        draw_box(&mut fb, p1, p2, Colour::WHITE, Some(Colour::RED)).unwrap();
        for x in p1.x..=p2.x {
            for y in p1.y..=p2.y {
                let on_border = x == p1.x || x == p2.x || y == p1.y || y == p2.y;
                let expected = if on_border { Colour::WHITE } else { Colour::RED };
                assert_eq!(fb.pixel(x, y), expected, "({x}, {y})");
            }
        }
        assert_eq!(fb.pixel(4, 4), Colour::BLACK);
        assert_eq!(fb.pixel(16, 13), Colour::BLACK);
    }

    #[test]
    fn degenerate_box_terminates_with_empty_interior() {
        let mut fb = Framebuffer::new(40, 40);
        draw_box(
            &mut fb,
            Point::new(8, 8),
            Point::new(8, 8),
            Colour::WHITE,
            Some(Colour::RED),
        )
        .unwrap();
        assert_eq!(plotted(&fb), vec![(8, 8)]);
    }

    #[test]
    fn circle_octant_symmetry() {
        let mut fb = Framebuffer::new(240, 320);
        draw_circle(&mut fb, Point::new(100, 100), 10, Colour::WHITE, None).unwrap();
        let pixels = plotted(&fb);
        assert!(!pixels.is_empty());
        for &(x, y) in &pixels {
            let (dx, dy) = (x as i64 - 100, y as i64 - 100);
            for (rx, ry) in [
                (dx, dy),
                (dy, dx),
                (-dy, dx),
                (-dx, dy),
                (-dx, -dy),
                (-dy, -dx),
                (dy, -dx),
                (dx, -dy),
            ] {
                let reflected = ((100 + rx) as u32, (100 + ry) as u32);
                assert!(pixels.contains(&reflected), "missing reflection of ({x}, {y})");
            }
        }
    }

    #[test]
    fn filled_circle_covers_its_boundary_rows() {
        let mut fb = Framebuffer::new(240, 320);
        draw_circle(
            &mut fb,
            Point::new(100, 100),
            10,
            Colour::WHITE,
            Some(Colour::RED),
        )
        .unwrap();
        // Wedge fill lines run from the vertical axis outward.
        assert_eq!(fb.pixel(100, 100), Colour::RED);
        assert_eq!(fb.pixel(104, 100), Colour::RED);
        assert_eq!(fb.pixel(109, 100), Colour::WHITE);
    }

    #[test]
    fn triangle_membership() {
        let v1 = Point::new(0, 0);
        let v2 = Point::new(0, 10);
        let v3 = Point::new(10, 0);
        assert!(point_in_triangle(Point::new(3, 3), v1, v2, v3));
        assert!(!point_in_triangle(Point::new(9, 9), v1, v2, v3));
    }

    #[test]
    fn triangle_fill_respects_membership() {
        let mut fb = Framebuffer::new(40, 40);
        let v1 = Point::new(0, 0);
        let v2 = Point::new(0, 10);
        let v3 = Point::new(10, 0);
        draw_triangle(&mut fb, v1, v2, v3, Colour::WHITE, Some(Colour::RED)).unwrap();
        assert_eq!(fb.pixel(3, 3), Colour::RED);
        assert_eq!(fb.pixel(9, 9), Colour::BLACK);
        // Outline goes on top of the fill.
        assert_eq!(fb.pixel(0, 0), Colour::WHITE);
    }

    #[test]
    fn dashes_alternate_with_gaps() {
        let mut fb = Framebuffer::new(240, 320);
        draw_dash(
            &mut fb,
            Point::new(11, 160),
            Point::new(229, 160),
            Colour::WHITE,
        )
        .unwrap();
        assert_eq!(fb.pixel(12, 160), Colour::WHITE);
        assert_eq!(fb.pixel(17, 160), Colour::WHITE);
        assert_eq!(fb.pixel(18, 160), Colour::BLACK);
        assert_eq!(fb.pixel(21, 160), Colour::BLACK);
        assert_eq!(fb.pixel(22, 160), Colour::WHITE);
    }

    #[test]
    fn render_failure_aborts_immediately() {
        // A sink too small for the requested line fails on the first pixel
        // past its edge and nothing after it is plotted.
        let mut fb = Framebuffer::new(10, 10);
        let result = draw_line(&mut fb, Point::new(5, 5), Point::new(15, 5), Colour::WHITE);
        assert_eq!(result, Err(RenderError { x: 10, y: 5 }));
    }
}
