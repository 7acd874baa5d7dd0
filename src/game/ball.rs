//! The ball simulator : a quadrant state machine stepped once per tick.

use rand::distributions::{Distribution, Standard, Uniform};
use rand::Rng;

use crate::game::court::{
    BALL_EDGE, BALL_MAX_X, BALL_MAX_Y, BALL_MIN_X, BALL_MIN_Y, BOUNCE_PAUSE_US, COURT_CENTRE_X,
    COURT_CENTRE_Y, COURT_MAX_X, COURT_MIN, NET_Y, SERVE_ANGLE_MAX, SERVE_ANGLE_MIN,
};
use crate::game::paddle::Paddle;
use crate::game::score::Player;
use crate::graphics::{self, Point};
use crate::hal::{Colour, DelayTimer, PixelSink, RenderError};

/// Directional regime of the ball's travel. Each quadrant fixes the sign of
/// the per-step x and y motion and which goal line is being approached; the
/// numbering in the variant docs is the original build's.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Quadrant {
    /// Quadrant 1 : x decreasing, y decreasing, toward the top goal line.
    UpLeft,
    /// Quadrant 2 : x increasing, y decreasing, toward the top goal line.
    UpRight,
    /// Quadrant 3 : x increasing, y increasing, toward the bottom goal line.
    DownRight,
    /// Quadrant 4 : x decreasing, y increasing, toward the bottom goal line.
    DownLeft,
}

impl Distribution<Quadrant> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Quadrant {
        match rng.gen_range(0..4) {
            0 => Quadrant::UpLeft,
            1 => Quadrant::UpRight,
            2 => Quadrant::DownRight,
            _ => Quadrant::DownLeft,
        }
    }
}

/// What a single step of the ball produced.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum BallEvent {
    /// Still in flight, possibly after a wall or paddle bounce.
    InFlight,
    /// The ball crossed a goal line outside the defending paddle's span; the
    /// named player takes the point.
    Goal(Player),
}

/// The single ball. The position is the square's top-left corner and stays
/// within the court bounding box while in flight; on a goal the next serve
/// puts it back at the court centre.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Ball {
    x: u32,
    y: u32,
    quadrant: Quadrant,
    angle_deg: u32,
}

impl Ball {
    /// The ball as the match opens : court centre, heading up-left at the
    /// steepest serve angle.
    pub fn new() -> Ball {
        Ball {
            x: COURT_CENTRE_X,
            y: COURT_CENTRE_Y,
            quadrant: Quadrant::UpLeft,
            angle_deg: 60,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    /// Reset to the court centre with a fresh uniform quadrant and serve
    /// angle.
    pub fn serve<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.x = COURT_CENTRE_X;
        self.y = COURT_CENTRE_Y;
        self.quadrant = rng.gen();
        self.angle_deg = Uniform::new(SERVE_ANGLE_MIN, SERVE_ANGLE_MAX).sample(rng);
        log::info!(
            "serve : quadrant {:?}, angle {} degrees",
            self.quadrant,
            self.angle_deg
        );
    }

    /// Draw the ball's square at its current position.
    pub fn draw<S: PixelSink>(&self, display: &mut S) -> Result<(), RenderError> {
        self.draw_square(display, Colour::WHITE)
    }

    /// Advance the ball by one tick.
    ///
    /// While inside the interior bounds of the active quadrant the ball takes
    /// one step (Δx = 1, Δy from the heading's cotangent, with the quadrant's
    /// signs), is rendered, held for `step_delay_us`, erased, and the net
    /// dashes it may have overwritten are redrawn. A boundary then either
    /// reflects the quadrant (wall, or goal line covered by the paddle, after
    /// a short pause) or ends the rally with a [`BallEvent::Goal`].
    ///
    /// A render failure aborts the step immediately : continuing would
    /// desynchronize the erase/draw double buffer.
    pub fn advance<S, T>(
        &mut self,
        display: &mut S,
        timer: &mut T,
        paddle_1: &Paddle,
        paddle_2: &Paddle,
        step_delay_us: u32,
    ) -> Result<BallEvent, RenderError>
    where
        S: PixelSink,
        T: DelayTimer,
    {
        match self.quadrant {
            Quadrant::UpLeft => {
                if self.x > BALL_MIN_X && self.y > BALL_MIN_Y {
                    self.x -= 1;
                    self.y = self.y.saturating_sub(self.step_dy());
                    self.render_step(display, timer, step_delay_us)?;
                }
                if self.x <= BALL_MIN_X {
                    self.bounce(timer, Quadrant::UpRight);
                } else if self.y <= BALL_MIN_Y {
                    if paddle_1.covers(self.x) {
                        self.bounce(timer, Quadrant::DownLeft);
                    } else {
                        return Ok(BallEvent::Goal(Player::Two));
                    }
                }
            }
            Quadrant::UpRight => {
                if self.x < BALL_MAX_X && self.y > BALL_MIN_Y {
                    self.x += 1;
                    self.y = self.y.saturating_sub(self.step_dy());
                    self.render_step(display, timer, step_delay_us)?;
                }
                if self.x >= BALL_MAX_X {
                    self.bounce(timer, Quadrant::UpLeft);
                } else if self.y <= BALL_MIN_Y {
                    if paddle_1.covers(self.x) {
                        self.bounce(timer, Quadrant::DownRight);
                    } else {
                        return Ok(BallEvent::Goal(Player::Two));
                    }
                }
            }
            Quadrant::DownRight => {
                if self.x < BALL_MAX_X && self.y < BALL_MAX_Y {
                    self.x += 1;
                    self.y += self.step_dy();
                    self.render_step(display, timer, step_delay_us)?;
                }
                if self.x >= BALL_MAX_X {
                    self.bounce(timer, Quadrant::DownLeft);
                } else if self.y >= BALL_MAX_Y {
                    if paddle_2.covers(self.x) {
                        self.bounce(timer, Quadrant::UpRight);
                    } else {
                        return Ok(BallEvent::Goal(Player::One));
                    }
                }
            }
            Quadrant::DownLeft => {
                if self.x > BALL_MIN_X && self.y < BALL_MAX_Y {
                    self.x -= 1;
                    self.y += self.step_dy();
                    self.render_step(display, timer, step_delay_us)?;
                }
                if self.x <= BALL_MIN_X {
                    self.bounce(timer, Quadrant::DownRight);
                } else if self.y >= BALL_MAX_Y {
                    if paddle_2.covers(self.x) {
                        self.bounce(timer, Quadrant::UpLeft);
                    } else {
                        return Ok(BallEvent::Goal(Player::One));
                    }
                }
            }
        }
        Ok(BallEvent::InFlight)
    }

    /// Vertical step : the rounded absolute cotangent of the heading angle.
    fn step_dy(&self) -> u32 {
        let radians = f64::from(self.angle_deg).to_radians();
        (1.0 / radians.tan()).abs().round() as u32
    }

    fn bounce<T: DelayTimer>(&mut self, timer: &mut T, next: Quadrant) {
        timer.sleep_us(BOUNCE_PAUSE_US);
        log::debug!("bounce into {next:?} at ({}, {})", self.x, self.y);
        self.quadrant = next;
    }

    fn render_step<S, T>(
        &self,
        display: &mut S,
        timer: &mut T,
        step_delay_us: u32,
    ) -> Result<(), RenderError>
    where
        S: PixelSink,
        T: DelayTimer,
    {
        self.draw_square(display, Colour::WHITE)?;
        timer.sleep_us(step_delay_us);
        self.draw_square(display, Colour::BACKGROUND)?;
        graphics::draw_dash(
            display,
            Point::new(COURT_MIN + 1, NET_Y),
            Point::new(COURT_MAX_X - 1, NET_Y),
            Colour::WHITE,
        )
    }

    fn draw_square<S: PixelSink>(&self, display: &mut S, colour: Colour) -> Result<(), RenderError> {
        graphics::draw_box(
            display,
            Point::new(self.x, self.y),
            Point::new(self.x + BALL_EDGE, self.y + BALL_EDGE),
            colour,
            Some(colour),
        )
    }
}

#[cfg(test)]
impl Ball {
    pub(crate) fn with_state(x: u32, y: u32, quadrant: Quadrant, angle_deg: u32) -> Ball {
        Ball {
            x,
            y,
            quadrant,
            angle_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Framebuffer, InstantTimer};

    fn paddles() -> (Paddle, Paddle) {
        (Paddle::new(Player::One), Paddle::new(Player::Two))
    }

    #[test]
    fn step_dy_follows_the_cotangent() {
        assert_eq!(Ball::with_state(0, 0, Quadrant::UpLeft, 45).step_dy(), 1);
        assert_eq!(Ball::with_state(0, 0, Quadrant::UpLeft, 20).step_dy(), 3);
        assert_eq!(Ball::with_state(0, 0, Quadrant::UpLeft, 60).step_dy(), 1);
    }

    #[test]
    fn left_wall_reflects_into_the_adjacent_quadrant() {
        let mut fb = Framebuffer::lt24();
        let mut timer = InstantTimer::default();
        let (p1, p2) = paddles();
        let mut ball = Ball::with_state(BALL_MIN_X, 100, Quadrant::UpLeft, 45);
        let event = ball
            .advance(&mut fb, &mut timer, &p1, &p2, 0)
            .unwrap();
        assert_eq!(event, BallEvent::InFlight);
        assert_eq!(ball.quadrant(), Quadrant::UpRight);
        assert_eq!(timer.slept_us, u64::from(BOUNCE_PAUSE_US));
    }

    #[test]
    fn right_wall_reflects_while_heading_down() {
        let mut fb = Framebuffer::lt24();
        let mut timer = InstantTimer::default();
        let (p1, p2) = paddles();
        let mut ball = Ball::with_state(BALL_MAX_X, 200, Quadrant::DownRight, 45);
        let event = ball
            .advance(&mut fb, &mut timer, &p1, &p2, 0)
            .unwrap();
        assert_eq!(event, BallEvent::InFlight);
        assert_eq!(ball.quadrant(), Quadrant::DownLeft);
    }

    #[test]
    fn covered_goal_line_sends_the_ball_back() {
        let mut fb = Framebuffer::lt24();
        let mut timer = InstantTimer::default();
        let (p1, p2) = paddles();
        // x = 110 is strictly within the serve-position span (99, 139).
        let mut ball = Ball::with_state(110, BALL_MIN_Y, Quadrant::UpLeft, 45);
        let event = ball
            .advance(&mut fb, &mut timer, &p1, &p2, 0)
            .unwrap();
        assert_eq!(event, BallEvent::InFlight);
        assert_eq!(ball.quadrant(), Quadrant::DownLeft);
    }

    #[test]
    fn missed_goal_line_scores_for_the_opponent() {
        let mut fb = Framebuffer::lt24();
        let mut timer = InstantTimer::default();
        let (p1, p2) = paddles();
        let mut ball = Ball::with_state(50, BALL_MIN_Y, Quadrant::UpLeft, 45);
        let event = ball
            .advance(&mut fb, &mut timer, &p1, &p2, 0)
            .unwrap();
        assert_eq!(event, BallEvent::Goal(Player::Two));

        let mut ball = Ball::with_state(50, BALL_MAX_Y, Quadrant::DownLeft, 45);
        let event = ball
            .advance(&mut fb, &mut timer, &p1, &p2, 0)
            .unwrap();
        assert_eq!(event, BallEvent::Goal(Player::One));
    }

    #[test]
    fn ball_exactly_on_a_paddle_edge_misses() {
        let mut fb = Framebuffer::lt24();
        let mut timer = InstantTimer::default();
        let (p1, p2) = paddles();
        let mut ball = Ball::with_state(p1.left(), BALL_MIN_Y, Quadrant::UpLeft, 45);
        let event = ball
            .advance(&mut fb, &mut timer, &p1, &p2, 0)
            .unwrap();
        assert_eq!(event, BallEvent::Goal(Player::Two));
    }

    #[test]
    fn in_flight_step_erases_and_redraws_the_net() {
        let mut fb = Framebuffer::lt24();
        let mut timer = InstantTimer::default();
        let (p1, p2) = paddles();
        let mut ball = Ball::with_state(120, 161, Quadrant::UpLeft, 45);
        ball.advance(&mut fb, &mut timer, &p1, &p2, 700).unwrap();
        assert_eq!(ball.position(), Point::new(119, 160));
        // The square was erased back to the court background...
        assert_eq!(fb.pixel(119, 161), Colour::BACKGROUND);
        // ...and the net dash under it was repainted.
        assert_eq!(fb.pixel(122, 160), Colour::WHITE);
        assert_eq!(timer.slept_us, 700);
    }

    #[test]
    fn serve_resets_to_centre_with_a_bounded_angle() {
        let mut rng = rand::thread_rng();
        let mut ball = Ball::new();
        for _ in 0..50 {
            ball.serve(&mut rng);
            assert_eq!(ball.position(), Point::new(COURT_CENTRE_X, COURT_CENTRE_Y));
            assert!((SERVE_ANGLE_MIN..SERVE_ANGLE_MAX).contains(&ball.angle_deg));
        }
    }
}
