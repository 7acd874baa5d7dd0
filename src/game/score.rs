//! Score keeping : per-point bookkeeping, the seven-segment readout, the
//! coloured point markers, and the victory banner.

use std::ops::Not;

use crate::game::court::{COURT_MAX_X, COURT_MAX_Y, COURT_MIN, DIGIT_BLANK, POINT_PAUSE_US, WINNING_SCORE};
use crate::graphics::{self, Glyph, Point};
use crate::hal::{Colour, DelayTimer, PixelSink, RenderError, SevenSegment, Watchdog};

/// The two competitors. Player one guards the top goal line, player two the
/// bottom one.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Player {
    One,
    Two,
}

impl Not for Player {
    type Output = Player;

    fn not(self) -> Self::Output {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Whether the match continues after a point.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum RallyOutcome {
    /// Both players are still short of the winning score; serve again.
    NextRally,
    /// The named player just reached the winning score.
    MatchOver(Player),
}

/// Markers flashed between rallies : green on the scorer's half, red on the
/// other.
const TOP_MARKER: (Point, Point) = (Point::new(115, 75), Point::new(125, 85));
const BOTTOM_MARKER: (Point, Point) = (Point::new(115, 235), Point::new(125, 245));

/// Both players' point counts, mirrored onto the seven-segment readout.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ScoreBoard {
    player_1: u8,
    player_2: u8,
}

impl ScoreBoard {
    pub fn new() -> ScoreBoard {
        ScoreBoard {
            player_1: 0,
            player_2: 0,
        }
    }

    pub fn score(&self, player: Player) -> u8 {
        match player {
            Player::One => self.player_1,
            Player::Two => self.player_2,
        }
    }

    /// The first player at the winning score, if either has reached it.
    pub fn winner(&self) -> Option<Player> {
        if self.player_1 >= WINNING_SCORE {
            Some(Player::One)
        } else if self.player_2 >= WINNING_SCORE {
            Some(Player::Two)
        } else {
            None
        }
    }

    /// Push the current scores to the readout : player one on the leftmost
    /// digit, player two on the rightmost, the middle four blanked.
    pub fn refresh_digits<D: SevenSegment>(&self, seven_seg: &mut D) {
        seven_seg.display_digit(1, self.player_1);
        for position in 2..=5 {
            seven_seg.display_digit(position, DIGIT_BLANK);
        }
        seven_seg.display_digit(6, self.player_2);
    }

    /// Record a point for `scorer` : flash the half markers, bump and publish
    /// the score, and either hold for the inter-rally pause or report the
    /// match over. Calling this after the match is decided changes nothing.
    pub fn point_scored<S, T, D>(
        &mut self,
        scorer: Player,
        display: &mut S,
        timer: &mut T,
        seven_seg: &mut D,
    ) -> Result<RallyOutcome, RenderError>
    where
        S: PixelSink,
        T: DelayTimer,
        D: SevenSegment,
    {
        if let Some(winner) = self.winner() {
            return Ok(RallyOutcome::MatchOver(winner));
        }

        let (winner_marker, loser_marker) = match scorer {
            Player::One => (TOP_MARKER, BOTTOM_MARKER),
            Player::Two => (BOTTOM_MARKER, TOP_MARKER),
        };
        draw_marker(display, winner_marker, Colour::GREEN)?;
        draw_marker(display, loser_marker, Colour::RED)?;

        match scorer {
            Player::One => self.player_1 += 1,
            Player::Two => self.player_2 += 1,
        }
        log::info!(
            "point for player {scorer:?} : {} - {}",
            self.player_1,
            self.player_2
        );
        self.refresh_digits(seven_seg);

        if let Some(winner) = self.winner() {
            return Ok(RallyOutcome::MatchOver(winner));
        }
        timer.sleep_us(POINT_PAUSE_US);
        draw_marker(display, winner_marker, Colour::BACKGROUND)?;
        draw_marker(display, loser_marker, Colour::BACKGROUND)?;
        Ok(RallyOutcome::NextRally)
    }
}

fn draw_marker<S: PixelSink>(
    display: &mut S,
    corners: (Point, Point),
    colour: Colour,
) -> Result<(), RenderError> {
    graphics::draw_box(display, corners.0, corners.1, colour, Some(colour))
}

/// The WINNER column, bottom to top on the portrait panel.
const LETTERS: [(Glyph, u32); 6] = [
    (Glyph::W, 215),
    (Glyph::I, 190),
    (Glyph::N, 165),
    (Glyph::N, 140),
    (Glyph::E, 115),
    (Glyph::R, 90),
];

/// Paint the full-court victory banner : a yellow panel with a black outline,
/// WINNER spelled down the left column and `P 1` or `P 2` beside it.
pub fn draw_victory_banner<S, W>(
    display: &mut S,
    watchdog: &mut W,
    winner: Player,
) -> Result<(), RenderError>
where
    S: PixelSink,
    W: Watchdog,
{
    graphics::draw_box(
        display,
        Point::new(COURT_MIN, COURT_MIN),
        Point::new(COURT_MAX_X, COURT_MAX_Y),
        Colour::BLACK,
        Some(Colour::YELLOW),
    )?;
    watchdog.reset();
    for (glyph, y) in LETTERS {
        graphics::draw_glyph(
            display,
            Point::new(85, y),
            Point::new(115, y + 20),
            glyph,
            Colour::BLACK,
        )?;
        watchdog.reset();
    }
    graphics::draw_glyph(
        display,
        Point::new(125, 165),
        Point::new(155, 185),
        Glyph::P,
        Colour::BLACK,
    )?;
    let numeral = match winner {
        Player::One => Glyph::One,
        Player::Two => Glyph::Two,
    };
    graphics::draw_glyph(
        display,
        Point::new(125, 140),
        Point::new(155, 160),
        numeral,
        Colour::BLACK,
    )?;
    watchdog.reset();
    Ok(())
}

#[cfg(test)]
impl ScoreBoard {
    pub(crate) fn with_scores(player_1: u8, player_2: u8) -> ScoreBoard {
        ScoreBoard { player_1, player_2 }
    }
}
