// SPDX-License-Identifier: MIT
//
// cflash — color flash cards in the terminal.
//
// This is the main binary that wires together the two library crates:
//
//   cflash-palette → scheme rules, gamut masks, distance filter, generator
//   cflash-color   → sRGB/HSV/LAB conversions, hex codes, label contrast
//
// One run resolves settings, then loops:
//
//   CLI flags ─┐
//              ├─► Settings ─► generate_palette ─► render ─► stdout
//   config ────┘                    ▲                 │
//                                   └── sleep(refresh) ◄┘  (while rounds remain)
//
// Diagnostics go to stderr through `tracing`; set CFLASH_LOG=debug to see
// per-palette summaries.

mod config;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cflash_palette::{
    GamutMask, PaletteRequest, RandomSource, Scheme, ThreadRandom, Xorshift32, generate_palette,
};

use crate::config::AppConfig;
use crate::render::Style;

// ─── Command line ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "cflash", version, about = "Color flash cards: harmonious random palettes")]
struct Cli {
    /// Colors per palette (1-12)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Harmony scheme: complementary, monochromatic, analogous, triadic, gamutMask
    #[arg(short, long)]
    scheme: Option<Scheme>,

    /// Gamut mask index for the gamutMask scheme (wraps; see --list-masks)
    #[arg(short, long, allow_negative_numbers = true)]
    mask: Option<i64>,

    /// Seed for a reproducible sequence of palettes
    #[arg(long, env = "CFLASH_SEED")]
    seed: Option<u32>,

    /// Seconds between palettes when showing more than one round
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    refresh: Option<u64>,

    /// Number of palettes to show (0 = until interrupted)
    #[arg(long, default_value_t = 1)]
    rounds: u64,

    /// Print hex codes only, without colors
    #[arg(long)]
    plain: bool,

    /// Config file (default: <config dir>/cflash/config.toml)
    #[arg(long, env = "CFLASH_CONFIG")]
    config: Option<PathBuf>,

    /// List the gamut masks with their indices and exit
    #[arg(long)]
    list_masks: bool,
}

// ─── Settings ────────────────────────────────────────────────────────────────

/// Everything one run needs, after flags have been laid over the config.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    request: PaletteRequest,
    seed: Option<u32>,
    refresh: Duration,
    rounds: u64,
    style: Style,
}

impl Settings {
    fn resolve(cli: &Cli, config: &AppConfig) -> Result<Self> {
        let request = PaletteRequest {
            count: cli.count.unwrap_or(config.count),
            scheme: cli.scheme.unwrap_or(config.scheme),
            mask_index: cli.mask.unwrap_or(config.mask),
        };
        request.validate()?;

        let refresh = cli.refresh.unwrap_or(config.refresh);
        if refresh == 0 {
            bail!("refresh interval must be a positive number of seconds");
        }

        let style = if cli.plain || config.plain { Style::Plain } else { Style::Cards };

        Ok(Self {
            request,
            seed: cli.seed,
            refresh: Duration::from_secs(refresh),
            rounds: cli.rounds,
            style,
        })
    }
}

// ─── Randomness ──────────────────────────────────────────────────────────────

/// The run's random source: seeded for reproducible output, else thread RNG.
enum Source {
    Seeded(Xorshift32),
    Thread(ThreadRandom),
}

impl Source {
    fn new(seed: Option<u32>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(Xorshift32::new(seed)),
            None => Self::Thread(ThreadRandom::new()),
        }
    }
}

impl RandomSource for Source {
    fn next_f64(&mut self) -> f64 {
        match self {
            Self::Seeded(rng) => rng.next_f64(),
            Self::Thread(rng) => rng.next_f64(),
        }
    }
}

// ─── Run loop ────────────────────────────────────────────────────────────────

/// Show `settings.rounds` palettes (forever when 0), pausing via `pause`
/// between them.
fn show(
    settings: &Settings,
    rng: &mut impl RandomSource,
    out: &mut impl Write,
    mut pause: impl FnMut(Duration),
) -> io::Result<()> {
    let repeating = settings.rounds != 1;
    let mut round: u64 = 0;
    loop {
        let palette = generate_palette(&settings.request, rng);
        round += 1;
        debug!(round, hexes = ?palette.hexes(), "showing palette");

        if repeating {
            match settings.style {
                Style::Cards => render::clear_screen(out)?,
                Style::Plain if round > 1 => writeln!(out)?,
                Style::Plain => {}
            }
        }
        render::palette(out, &palette, settings.style)?;
        out.flush()?;

        if settings.rounds != 0 && round >= settings.rounds {
            return Ok(());
        }
        pause(settings.refresh);
    }
}

fn list_masks(out: &mut impl Write) -> io::Result<()> {
    for mask in GamutMask::CATALOG {
        writeln!(out, "{}  {}", mask.index(), mask.name())?;
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list_masks {
        return list_masks(&mut out).context("failed to write to stdout");
    }

    let config = AppConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, &config)?;
    info!(?settings, "starting");

    let mut rng = Source::new(settings.seed);
    show(&settings, &mut rng, &mut out, thread::sleep).context("failed to write to stdout")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CFLASH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(&cli) {
        eprintln!("cflash: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use cflash_palette::ScriptedRandom;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cflash").chain(args.iter().copied())).unwrap()
    }

    fn resolve(args: &[&str], config: &AppConfig) -> Result<Settings> {
        Settings::resolve(&parse(args), config)
    }

    fn output(settings: &Settings, rng: &mut impl RandomSource) -> (String, Vec<Duration>) {
        let mut buf = Vec::new();
        let mut pauses = Vec::new();
        show(settings, rng, &mut buf, |d| pauses.push(d)).unwrap();
        (String::from_utf8(buf).unwrap(), pauses)
    }

    // ── Flags ────────────────────────────────────────────────────────────

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_come_from_config() {
        let settings = resolve(&[], &AppConfig::default()).unwrap();
        assert_eq!(
            settings,
            Settings {
                request: PaletteRequest::default(),
                seed: None,
                refresh: Duration::from_secs(5),
                rounds: 1,
                style: Style::Cards,
            }
        );
    }

    #[test]
    fn flags_override_config() {
        let config = AppConfig {
            count: 4,
            scheme: Scheme::Analogous,
            mask: 1,
            refresh: 9,
            plain: false,
        };
        let settings =
            resolve(&["-n", "5", "-s", "gamut-mask", "-m", "-1", "-r", "2", "--plain"], &config)
                .unwrap();
        assert_eq!(settings.request.count, 5);
        assert_eq!(settings.request.scheme, Scheme::GamutMask);
        assert_eq!(settings.request.mask(), GamutMask::AnalogousSlice);
        assert_eq!(settings.refresh, Duration::from_secs(2));
        assert_eq!(settings.style, Style::Plain);
    }

    #[test]
    fn config_values_survive_without_flags() {
        let config = AppConfig { plain: true, refresh: 12, ..AppConfig::default() };
        let settings = resolve(&["--seed", "7"], &config).unwrap();
        assert_eq!(settings.style, Style::Plain);
        assert_eq!(settings.refresh, Duration::from_secs(12));
        assert_eq!(settings.seed, Some(7));
    }

    #[test]
    fn scheme_flag_is_case_insensitive() {
        assert_eq!(parse(&["--scheme", "Triadic"]).scheme, Some(Scheme::Triadic));
    }

    #[test]
    fn unknown_scheme_is_a_parse_error() {
        assert!(Cli::try_parse_from(["cflash", "--scheme", "neon"]).is_err());
    }

    #[test]
    fn zero_refresh_flag_is_rejected() {
        assert!(Cli::try_parse_from(["cflash", "--refresh", "0"]).is_err());
    }

    #[test]
    fn zero_refresh_in_config_is_rejected() {
        let config = AppConfig { refresh: 0, ..AppConfig::default() };
        let err = resolve(&[], &config).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn out_of_range_count_is_rejected() {
        assert!(resolve(&["-n", "0"], &AppConfig::default()).is_err());
        assert!(resolve(&["-n", "13"], &AppConfig::default()).is_err());
    }

    // ── Run loop ─────────────────────────────────────────────────────────

    fn plain_settings(rounds: u64) -> Settings {
        Settings {
            request: PaletteRequest::new(3, Scheme::Triadic),
            seed: None,
            refresh: Duration::from_secs(3),
            rounds,
            style: Style::Plain,
        }
    }

    #[test]
    fn single_round_prints_once_without_pausing() {
        let mut rng = ScriptedRandom::then_constant(&[0.0], 0.5);
        let (out, pauses) = output(&plain_settings(1), &mut rng);
        assert_eq!(out, "#df1c1c\n#1cdf1c\n#1c1cdf\n");
        assert!(pauses.is_empty());
    }

    #[test]
    fn rounds_are_separated_and_paced() {
        let mut rng = Xorshift32::new(42);
        let (out, pauses) = output(&plain_settings(3), &mut rng);
        assert_eq!(out.split("\n\n").count(), 3);
        assert_eq!(pauses, vec![Duration::from_secs(3); 2]);
    }

    #[test]
    fn repeated_cards_clear_the_screen() {
        let settings = Settings { style: Style::Cards, ..plain_settings(2) };
        let mut rng = Xorshift32::new(1);
        let (out, _) = output(&settings, &mut rng);
        assert_eq!(out.matches("\x1b[2J\x1b[H").count(), 2);
    }

    #[test]
    fn same_seed_same_output() {
        let settings = plain_settings(2);
        let (a, _) = output(&settings, &mut Source::new(Some(99)));
        let (b, _) = output(&settings, &mut Source::new(Some(99)));
        assert_eq!(a, b);
    }

    #[test]
    fn mask_listing() {
        let mut buf = Vec::new();
        list_masks(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "0  Complementary Split\n1  Triadic Split\n2  Y-Shape Split\n3  Analogous Slice\n"
        );
    }
}
