//! Paddle controllers : fixed-row rectangles moved horizontally with an
//! erase-then-redraw double buffer.

use crate::game::court::{
    PADDLE_1_Y, PADDLE_2_Y, PADDLE_LENGTH, PADDLE_MAX_X, PADDLE_MIN_X, PADDLE_START_X, PADDLE_WIDTH,
};
use crate::game::score::Player;
use crate::graphics::{self, Point};
use crate::hal::{Colour, PixelSink, RenderError};

/// One paddle's rectangle, identified by its top-left corner.
///
/// The previous corner trails the current one by exactly one frame and exists
/// only to erase the prior drawing; after every successful draw the two are
/// equal again.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Paddle {
    x: u32,
    y: u32,
    prev_x: u32,
    prev_y: u32,
}

impl Paddle {
    /// Create the paddle for `player` at its serve position. Nothing is drawn
    /// until [`Paddle::draw_initial`].
    pub fn new(player: Player) -> Paddle {
        let y = match player {
            Player::One => PADDLE_1_Y,
            Player::Two => PADDLE_2_Y,
        };
        Paddle {
            x: PADDLE_START_X,
            y,
            prev_x: PADDLE_START_X,
            prev_y: y,
        }
    }

    /// Left edge of the paddle span.
    pub fn left(&self) -> u32 {
        self.x
    }

    /// Right edge of the paddle span.
    pub fn right(&self) -> u32 {
        self.x + PADDLE_LENGTH
    }

    /// Whether a ball column hits this paddle. Strict on both edges : a ball
    /// exactly on an edge column is a miss.
    pub fn covers(&self, x: u32) -> bool {
        x > self.left() && x < self.right()
    }

    /// Draw the paddle at its current position without erasing anything.
    pub fn draw_initial<S: PixelSink>(&mut self, display: &mut S) -> Result<(), RenderError> {
        self.draw_rectangle(display, self.x, self.y, Colour::WHITE)?;
        self.prev_x = self.x;
        self.prev_y = self.y;
        Ok(())
    }

    /// Move the paddle to a raw horizontal position : clamp it to the court,
    /// erase the previous rectangle, draw the new one, and only once both
    /// draws succeeded record the new corner as the previous frame.
    pub fn move_to<S: PixelSink>(&mut self, display: &mut S, x: u32) -> Result<(), RenderError> {
        self.x = x.clamp(PADDLE_MIN_X, PADDLE_MAX_X - PADDLE_LENGTH);
        self.draw_rectangle(display, self.prev_x, self.prev_y, Colour::BLACK)?;
        self.draw_rectangle(display, self.x, self.y, Colour::WHITE)?;
        self.prev_x = self.x;
        self.prev_y = self.y;
        Ok(())
    }

    /// Erase the paddle at its last drawn rectangle, used when the match ends.
    pub fn erase<S: PixelSink>(&self, display: &mut S) -> Result<(), RenderError> {
        self.draw_rectangle(display, self.prev_x, self.prev_y, Colour::BLACK)
    }

    fn draw_rectangle<S: PixelSink>(
        &self,
        display: &mut S,
        x: u32,
        y: u32,
        colour: Colour,
    ) -> Result<(), RenderError> {
        graphics::draw_box(
            display,
            Point::new(x, y),
            Point::new(x + PADDLE_LENGTH, y + PADDLE_WIDTH),
            colour,
            Some(colour),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Framebuffer;

    #[test]
    fn clamps_to_the_left_travel_limit() {
        let mut fb = Framebuffer::lt24();
        let mut paddle = Paddle::new(Player::One);
        paddle.move_to(&mut fb, 0).unwrap();
        assert_eq!(paddle.left(), PADDLE_MIN_X);
    }

    #[test]
    fn clamps_to_the_right_travel_limit() {
        let mut fb = Framebuffer::lt24();
        let mut paddle = Paddle::new(Player::Two);
        paddle.move_to(&mut fb, PADDLE_MAX_X + 50).unwrap();
        assert_eq!(paddle.left(), PADDLE_MAX_X - PADDLE_LENGTH);
    }

    #[test]
    fn redraw_erases_the_previous_rectangle() {
        let mut fb = Framebuffer::lt24();
        let mut paddle = Paddle::new(Player::One);
        paddle.draw_initial(&mut fb).unwrap();
        assert_eq!(fb.pixel(PADDLE_START_X, PADDLE_1_Y), Colour::WHITE);

        paddle.move_to(&mut fb, 150).unwrap();
        assert_eq!(fb.pixel(PADDLE_START_X, PADDLE_1_Y), Colour::BLACK);
        assert_eq!(fb.pixel(150, PADDLE_1_Y), Colour::WHITE);
        assert_eq!(fb.pixel(150 + PADDLE_LENGTH, PADDLE_1_Y + PADDLE_WIDTH), Colour::WHITE);
    }

    #[test]
    fn span_test_is_strict_on_both_edges() {
        let paddle = Paddle::new(Player::One);
        assert!(!paddle.covers(paddle.left()));
        assert!(!paddle.covers(paddle.right()));
        assert!(paddle.covers(paddle.left() + 1));
        assert!(paddle.covers(paddle.right() - 1));
    }
}
