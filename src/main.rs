use std::{fs, io};

use clap::{Parser, ValueEnum};
use fern::FormatCallback;
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::format_description::well_known::Iso8601;

use crate::game::court::{COURT_MAX_X, COURT_MAX_Y, COURT_MIN};
use crate::game::{GameState, Peripherals, TickOutcome};
use crate::graphics::{Glyph, Point};
use crate::hal::{Colour, DelayTimer, PixelSink, RenderError, RunGate, Watchdog};
use crate::sim::{
    CountingWatchdog, FixedSpeed, Framebuffer, HoldButtons, InstantTimer, LoggingSevenSegment,
    PressGate, SleepTimer, SweepPosition,
};

mod game;
mod graphics;
mod hal;
mod sim;

/// Polls of the run gate before giving up on the start press.
const GATE_POLL_BUDGET: u32 = 1_000_000;

#[derive(Parser)]
#[command(about, long_about = None)]
struct Cli {
    /// Seed for the serve randomness; a random one is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks even if nobody has won.
    #[arg(long, short, default_value = "200000")]
    ticks: u64,

    /// Honour the animation delays with real sleeps instead of skipping them.
    #[arg(long, short)]
    real_time: bool,

    /// Polls the simulated start press waits before opening the run gate.
    #[arg(long, short, default_value = "0")]
    gate_delay: u32,

    /// Raw 10-bit speed sample the speed control is pinned to.
    #[arg(long, default_value = "512")]
    speed: u16,

    /// Set the folder path.
    ///
    /// The given path can be absolute or relative.
    /// The program will attempt to create all the folders nested in the path.
    #[arg(long, short, default_value = "./log/", value_name = "PATH")]
    log_folder: String,

    /// Set where the printed logging is outputted.
    #[arg(value_enum, long, short, default_value_t)]
    console_channel: ConsoleChannel,
}

#[derive(Copy, Clone, ValueEnum, Default)]
enum ConsoleChannel {
    /// Print to stdout
    #[default]
    Out,
    /// Print to stderr
    Err,
}

/// Plays one match against the simulated peripherals. All errors are logged, the [`Result`] returned is only given
/// for command-line environments.
fn main() -> Result<(), ()> {
    let cli = Cli::parse();
    setup_logger(cli.log_folder.clone(), cli.console_channel)
        .map_err(|e| eprintln!("Error while configuring logging : {e:?}"))?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let result = if cli.real_time {
        run_match(&cli, SleepTimer, rng)
    } else {
        run_match(&cli, InstantTimer::default(), rng)
    };
    result.map_err(|e| log::error!("Display failure ended the match : {e}."))
}

/// Bring up the display, wait for the start press, then tick the match until
/// someone wins or the tick budget runs out.
fn run_match<T, R>(cli: &Cli, timer: T, mut rng: R) -> Result<(), RenderError>
where
    T: DelayTimer,
    R: Rng,
{
    let mut io = Peripherals {
        display: Framebuffer::lt24(),
        timer,
        watchdog: CountingWatchdog::default(),
        position: SweepPosition::new(3),
        buttons: HoldButtons,
        speed: FixedSpeed(cli.speed),
        seven_seg: LoggingSevenSegment::default(),
    };
    let mut gate = PressGate::new(cli.gate_delay);

    draw_splash(&mut io.display, &mut io.watchdog)?;
    if !game::await_run_signal(&mut gate, &mut io.watchdog, GATE_POLL_BUDGET) {
        log::error!("The run gate never opened, giving up.");
        return Ok(());
    }

    let mut state = GameState::new();
    state.draw_court(&mut io.display, &mut io.watchdog, &mut io.seven_seg)?;
    log::info!("Match started.");
    for _ in 0..cli.ticks {
        if !gate.is_running() {
            io.watchdog.reset();
            continue;
        }
        if let TickOutcome::MatchOver(winner) = state.tick(&mut io, &mut rng)? {
            game::draw_victory_banner(&mut io.display, &mut io.watchdog, winner)?;
            log::info!(
                "Match over. Player {winner:?} wins {} - {}.",
                state.scores().score(game::Player::One),
                state.scores().score(game::Player::Two)
            );
            return Ok(());
        }
    }
    log::info!("Tick budget exhausted with no winner, exiting.");
    Ok(())
}

/// The START / STOP panels shown before the run gate opens, traced the way the
/// control board renders them.
fn draw_splash<S, W>(display: &mut S, watchdog: &mut W) -> Result<(), RenderError>
where
    S: PixelSink,
    W: Watchdog,
{
    graphics::draw_box(
        display,
        Point::new(COURT_MIN, COURT_MIN),
        Point::new(COURT_MAX_X, COURT_MAX_Y),
        Colour::WHITE,
        None,
    )?;
    graphics::draw_box(
        display,
        Point::new(10, 10),
        Point::new(120, 160),
        Colour::WHITE,
        Some(Colour::GREEN),
    )?;
    graphics::draw_box(
        display,
        Point::new(120, 10),
        Point::new(230, 160),
        Colour::WHITE,
        Some(Colour::RED),
    )?;
    watchdog.reset();
    for (glyph, y) in [
        (Glyph::S, 125),
        (Glyph::T, 100),
        (Glyph::A, 75),
        (Glyph::R, 50),
        (Glyph::T, 25),
    ] {
        graphics::draw_glyph(
            display,
            Point::new(50, y),
            Point::new(80, y + 20),
            glyph,
            Colour::BLACK,
        )?;
    }
    watchdog.reset();
    for (glyph, y) in [
        (Glyph::S, 115),
        (Glyph::T, 90),
        (Glyph::O, 65),
        (Glyph::P, 40),
    ] {
        graphics::draw_glyph(
            display,
            Point::new(150, y),
            Point::new(180, y + 20),
            glyph,
            Colour::WHITE,
        )?;
    }
    watchdog.reset();
    Ok(())
}

/// Set up the global logger to log to stdout/stderr and to a file named as the current timestamp.
fn setup_logger(log_folder: String, console_channel: ConsoleChannel) -> io::Result<()> {
    // Configure log output on the given console
    let console_config = fern::Dispatch::new()
        .level(log::LevelFilter::Trace)
        .format(format_log);
    let console_config = match console_channel {
        ConsoleChannel::Out => console_config.chain(io::stdout()),
        ConsoleChannel::Err => console_config.chain(io::stderr()),
    };

    // Configure log output in rotating log files
    let rotator = make_rotator(log_folder)?;
    let file_config = fern::Dispatch::new()
        .level(log::LevelFilter::Trace)
        .format(format_log)
        .chain(rotator as Box<(dyn io::Write + Send)>);

    // Finish the config. Can unwrap because we know we only set the logger once.
    fern::Dispatch::new()
        .chain(console_config)
        .chain(file_config)
        .apply()
        .unwrap();
    Ok(())
}

/// Make the rotating file middleware to give to the logger.
fn make_rotator(log_folder: String) -> io::Result<Box<FileRotate<AppendCount>>> {
    fs::create_dir_all(&log_folder)?;
    let log_file_path = log_folder + "/" + &utc_now_wrapper() + ".log";
    let rotator = Box::new(FileRotate::new(
        log_file_path,
        AppendCount::new(10),
        ContentLimit::Lines(4000),
        Compression::None,
        #[cfg(unix)]
        None,
    ));
    Ok(rotator)
}

/// The function given to the logging crate [`fern`] to format messages.
fn format_log(out: FormatCallback, message: &std::fmt::Arguments, record: &log::Record) {
    out.finish(format_args!(
        "[{} {} {}] {}",
        utc_now_wrapper(),
        record.level(),
        &record
            .target()
            .chars()
            .take_while(|&c| c != ':')
            .collect::<String>(),
        message
    ))
}

/// Create a [`String`] of the current time in the UTC timezone, with a default in case of error.
fn utc_now_wrapper() -> String {
    time::OffsetDateTime::now_utc()
        .format(&Iso8601::DATE_TIME)
        .unwrap_or(String::from("invalid date"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cli(gate_delay: u32, ticks: u64) -> Cli {
        Cli {
            seed: Some(1),
            ticks,
            real_time: false,
            gate_delay,
            speed: 1023,
            log_folder: String::from("./log/"),
            console_channel: ConsoleChannel::Out,
        }
    }

    #[test]
    fn match_runs_through_a_delayed_gate_press() {
        let cli = test_cli(500, 200);
        let rng = StdRng::seed_from_u64(1);
        assert!(run_match(&cli, InstantTimer::default(), rng).is_ok());
    }

    #[test]
    fn splash_panels_are_outlined_in_white() {
        let mut fb = Framebuffer::lt24();
        let mut watchdog = CountingWatchdog::default();
        draw_splash(&mut fb, &mut watchdog).unwrap();
        assert_eq!(fb.pixel(60, 10), Colour::WHITE);
        assert_eq!(fb.pixel(120, 80), Colour::WHITE);
        assert_eq!(fb.pixel(60, 80), Colour::GREEN);
        assert_eq!(fb.pixel(200, 80), Colour::RED);
    }
}
