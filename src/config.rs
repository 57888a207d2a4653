use std::time::Duration;

use thiserror::Error;

use crate::CellOffset;
use crate::render::GlyphRenderer;
use crate::rule_set::RuleSet;
use crate::rule_set::RuleSetError;

/// Largest grid, in cells, the program agrees to simulate
pub const MAX_CELLS: usize = 1 << 24;

pub const USAGE: &str = "usage: toruslife [--width N] [--height N] [--interval-ms N] [--seed N] \
[--rule RULE] [--alive C] [--dead C] [--braille] [--generations N]";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{usage}", usage = USAGE)]
    Help,

    #[error("Unknown argument \"{arg}\"\n{usage}", usage = USAGE)]
    UnknownArgument { arg: String },

    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },

    #[error("{flag} expects a number, but got \"{got}\"")]
    InvalidNumber { flag: &'static str, got: String },

    #[error("{flag} must be positive")]
    NotPositive { flag: &'static str },

    #[error("A {width}x{height} grid is larger than {max} cells", max = MAX_CELLS)]
    TooLarge { width: CellOffset, height: CellOffset },

    #[error("{flag} expects a single character, but got \"{got}\"")]
    InvalidGlyph { flag: &'static str, got: String },

    #[error("Invalid rule \"{got}\"")]
    InvalidRule {
        got: String,
        #[source]
        source: RuleSetError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One glyph per cell
    #[default]
    Glyph,

    /// 2x4 cells per braille character
    Braille,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: CellOffset,
    pub height: CellOffset,

    /// Time between two generations
    pub interval: Duration,

    /// Seed for the initial grid. Drawn from entropy when absent.
    pub seed: Option<u64>,

    pub rule: RuleSet,

    pub alive: char,
    pub dead: char,

    pub render_mode: RenderMode,

    /// Stop after this many generations instead of running until interrupted
    pub generations: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 79,
            height: 20,
            interval: Duration::from_secs(1),
            seed: None,
            rule: RuleSet::default(),
            alive: GlyphRenderer::DEFAULT_ALIVE,
            dead: GlyphRenderer::DEFAULT_DEAD,
            render_mode: RenderMode::Glyph,
            generations: None,
        }
    }
}

impl Config {
    /// Build a config from command line arguments, not including the program name.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut next_arg = |flag: &'static str| args.next().ok_or(ConfigError::MissingValue { flag });

            match arg.as_str() {
                "--width" => {
                    config.width = parse_positive("--width", next_arg("--width")?)?;
                }
                "--height" => {
                    config.height = parse_positive("--height", next_arg("--height")?)?;
                }
                "--interval-ms" => {
                    let ms = parse_positive("--interval-ms", next_arg("--interval-ms")?)?;
                    config.interval = Duration::from_millis(ms);
                }
                "--seed" => {
                    config.seed = Some(parse_number("--seed", next_arg("--seed")?)?);
                }
                "--rule" => {
                    let got = next_arg("--rule")?;
                    config.rule = got
                        .parse()
                        .map_err(|source| ConfigError::InvalidRule { got, source })?;
                }
                "--alive" => {
                    config.alive = parse_glyph("--alive", next_arg("--alive")?)?;
                }
                "--dead" => {
                    config.dead = parse_glyph("--dead", next_arg("--dead")?)?;
                }
                "--braille" => {
                    config.render_mode = RenderMode::Braille;
                }
                "--generations" => {
                    config.generations = Some(parse_number("--generations", next_arg("--generations")?)?);
                }
                "-h" | "--help" => return Err(ConfigError::Help),
                _ => return Err(ConfigError::UnknownArgument { arg }),
            }
        }

        let (width, height) = (config.width, config.height);
        if width.checked_mul(height).is_none_or(|cells| cells > MAX_CELLS) {
            return Err(ConfigError::TooLarge { width, height });
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, got: String) -> Result<T, ConfigError> {
    got.parse()
        .map_err(|_| ConfigError::InvalidNumber { flag, got })
}

fn parse_positive<T>(flag: &'static str, got: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    let n: T = parse_number(flag, got)?;

    if n == T::default() {
        return Err(ConfigError::NotPositive { flag });
    }

    Ok(n)
}

fn parse_glyph(flag: &'static str, got: String) -> Result<char, ConfigError> {
    let mut chars = got.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidGlyph { flag, got }),
    }
}
