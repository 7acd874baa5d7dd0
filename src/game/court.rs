//! Fixed geometry and pacing of the court.
//!
//! The values are those of the original 240x320 portrait build; the scaling
//! constants are load bearing for the paired board and must not drift.

/// Top and left edge of the court box.
pub const COURT_MIN: u32 = 10;
/// Right edge of the court box.
pub const COURT_MAX_X: u32 = 230;
/// Bottom edge of the court box.
pub const COURT_MAX_Y: u32 = 310;

/// Centre of the court, where the ball is served from.
pub const COURT_CENTRE_X: u32 = 120;
pub const COURT_CENTRE_Y: u32 = 160;

/// Row of the dashed net.
pub const NET_Y: u32 = 160;

/// Interior bounds for the ball's top-left corner while in flight.
pub const BALL_MIN_X: u32 = 12;
pub const BALL_MAX_X: u32 = 225;
pub const BALL_MIN_Y: u32 = 12;
pub const BALL_MAX_Y: u32 = 305;

/// The ball is a filled square spanning `x..=x + BALL_EDGE` on both axes.
pub const BALL_EDGE: u32 = 3;

pub const PADDLE_LENGTH: u32 = 40;
pub const PADDLE_WIDTH: u32 = 2;

/// Travel limits for a paddle's left edge (the right limit before the length
/// is subtracted).
pub const PADDLE_MIN_X: u32 = 11;
pub const PADDLE_MAX_X: u32 = 229;

/// Fixed rows of the two paddles : paddle 1 guards the top goal line,
/// paddle 2 the bottom one. Both sit on the border rows outside the grey
/// court fill, so they erase to black.
pub const PADDLE_1_Y: u32 = 7;
pub const PADDLE_2_Y: u32 = 311;

/// Serve position of both paddles' left edge (centred on the court).
pub const PADDLE_START_X: u32 = 99;

/// Base per-step animation delay the speed control is subtracted from.
pub const BASE_STEP_DELAY_US: u32 = 5000;
/// Pause marking a wall or paddle bounce.
pub const BOUNCE_PAUSE_US: u32 = 10_000;
/// Pause with the score markers shown, before the next serve.
pub const POINT_PAUSE_US: u32 = 3_000_000;

/// First player to reach this many points wins the match.
pub const WINNING_SCORE: u8 = 10;

/// Serve angles are uniform integer degrees in
/// `SERVE_ANGLE_MIN..SERVE_ANGLE_MAX`.
pub const SERVE_ANGLE_MIN: u32 = 20;
pub const SERVE_ANGLE_MAX: u32 = 60;

/// Blank code understood by the seven-segment encoder.
pub const DIGIT_BLANK: u8 = 16;
