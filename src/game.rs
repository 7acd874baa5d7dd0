//! Implementation of the logic of the Pong match.
//!
//! This mod aggregates the whole playing state into [`GameState`] and exposes
//! [`GameState::tick`] as the single stepping operation; the sub-mods hold the
//! ball simulator, the paddle controllers and the score keeping.

use rand::Rng;

pub use ball::{Ball, BallEvent, Quadrant};
pub use paddle::Paddle;
pub use score::{draw_victory_banner, Player, RallyOutcome, ScoreBoard};

use crate::game::court::{BASE_STEP_DELAY_US, COURT_MAX_X, COURT_MAX_Y, COURT_MIN, NET_Y};
use crate::graphics::{self, Point};
use crate::hal::{
    Colour, DelayTimer, DiscreteInput, PixelSink, PositionSensor, RenderError, RunGate,
    SevenSegment, SpeedControl, Watchdog,
};

mod ball;
pub mod court;
mod paddle;
mod score;

/// The injected board peripherals, bundled so the tick loop takes one
/// argument.
pub struct Peripherals<D, T, W, P, B, V, H> {
    pub display: D,
    pub timer: T,
    pub watchdog: W,
    pub position: P,
    pub buttons: B,
    pub speed: V,
    pub seven_seg: H,
}

/// What a tick of the match produced.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum TickOutcome {
    /// The match continues; tick again.
    Running,
    /// The named player has won. The court is cleared of paddles and further
    /// ticks change nothing; the caller owns the victory screen.
    MatchOver(Player),
}

/// The whole playing state of one match.
pub struct GameState {
    ball: Ball,
    paddle_1: Paddle,
    paddle_2: Paddle,
    scores: ScoreBoard,
    over: Option<Player>,
}

impl GameState {
    /// A fresh match : ball at the centre, paddles at their serve position,
    /// love all. Nothing is drawn until [`GameState::draw_court`].
    pub fn new() -> GameState {
        GameState {
            ball: Ball::new(),
            paddle_1: Paddle::new(Player::One),
            paddle_2: Paddle::new(Player::Two),
            scores: ScoreBoard::new(),
            over: None,
        }
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Paint the initial court : the grey-filled white court box, the goal
    /// lines over its top and bottom borders, the net, the ball and both
    /// paddles, and push the opening scores to the readout.
    pub fn draw_court<S, W, H>(
        &mut self,
        display: &mut S,
        watchdog: &mut W,
        seven_seg: &mut H,
    ) -> Result<(), RenderError>
    where
        S: PixelSink,
        W: Watchdog,
        H: SevenSegment,
    {
        graphics::draw_box(
            display,
            Point::new(COURT_MIN, COURT_MIN),
            Point::new(COURT_MAX_X, COURT_MAX_Y),
            Colour::WHITE,
            Some(Colour::BACKGROUND),
        )?;
        watchdog.reset();
        // The goal lines replace the top and bottom borders of the box, so
        // the ball erases cleanly when it reaches them.
        graphics::draw_line(
            display,
            Point::new(COURT_MIN, COURT_MIN),
            Point::new(COURT_MAX_X, COURT_MIN),
            Colour::BACKGROUND,
        )?;
        graphics::draw_line(
            display,
            Point::new(COURT_MIN, COURT_MAX_Y),
            Point::new(COURT_MAX_X, COURT_MAX_Y),
            Colour::BACKGROUND,
        )?;
        graphics::draw_dash(
            display,
            Point::new(COURT_MIN + 1, NET_Y),
            Point::new(COURT_MAX_X - 1, NET_Y),
            Colour::WHITE,
        )?;
        watchdog.reset();
        self.ball.draw(display)?;
        self.paddle_1.draw_initial(display)?;
        self.paddle_2.draw_initial(display)?;
        self.scores.refresh_digits(seven_seg);
        watchdog.reset();
        Ok(())
    }

    /// Run one tick of the match : step the ball at the pace the speed control
    /// dictates, resolve a finished rally, then track both paddle inputs.
    /// After the match is decided every further call returns the same
    /// [`TickOutcome::MatchOver`] untouched.
    pub fn tick<D, T, W, P, B, V, H, R>(
        &mut self,
        io: &mut Peripherals<D, T, W, P, B, V, H>,
        rng: &mut R,
    ) -> Result<TickOutcome, RenderError>
    where
        D: PixelSink,
        T: DelayTimer,
        W: Watchdog,
        P: PositionSensor,
        B: DiscreteInput,
        V: SpeedControl,
        H: SevenSegment,
        R: Rng + ?Sized,
    {
        if let Some(winner) = self.over {
            return Ok(TickOutcome::MatchOver(winner));
        }

        let delay_us = step_delay_us(io.speed.sample());
        let event = self.ball.advance(
            &mut io.display,
            &mut io.timer,
            &self.paddle_1,
            &self.paddle_2,
            delay_us,
        )?;
        io.watchdog.reset();

        if let BallEvent::Goal(scorer) = event {
            match self.scores.point_scored(
                scorer,
                &mut io.display,
                &mut io.timer,
                &mut io.seven_seg,
            )? {
                RallyOutcome::NextRally => {
                    io.watchdog.reset();
                    self.ball.serve(rng);
                }
                RallyOutcome::MatchOver(winner) => {
                    self.paddle_1.erase(&mut io.display)?;
                    self.paddle_2.erase(&mut io.display)?;
                    self.over = Some(winner);
                    return Ok(TickOutcome::MatchOver(winner));
                }
            }
        }

        let target = u32::from(io.position.sample() & 0x0FFF) * 5 / 4;
        self.paddle_1.move_to(&mut io.display, target)?;
        io.watchdog.reset();

        let target = match io.buttons.read() & 0x3 {
            1 => self.paddle_2.left() + 1,
            2 => self.paddle_2.left().saturating_sub(1),
            _ => self.paddle_2.left(),
        };
        self.paddle_2.move_to(&mut io.display, target)?;
        io.watchdog.reset();

        Ok(TickOutcome::Running)
    }
}

/// Per-step animation delay for a raw 10-bit speed sample : the base delay
/// minus 3.5 microseconds per count, faster the higher the sample.
pub fn step_delay_us(sample: u16) -> u32 {
    (BASE_STEP_DELAY_US as f32 - f32::from(sample & 0x03FF) * 3.5) as u32
}

/// Poll the run gate until it reads running, resetting the watchdog after
/// every miss. Gives up after `poll_budget` polls so a stuck gate line cannot
/// wedge the caller; returns whether the gate opened.
pub fn await_run_signal<G, W>(gate: &mut G, watchdog: &mut W, poll_budget: u32) -> bool
where
    G: RunGate,
    W: Watchdog,
{
    for _ in 0..poll_budget {
        if gate.is_running() {
            return true;
        }
        watchdog.reset();
    }
    false
}
