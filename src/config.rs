// config.rs: Engine parameters, compile-time defaults and environment overrides.
//
// Parameters are handed to the engine untouched; the only processing done here
// is range validation and the derivation of the engine's input block size,
// which becomes the windowing compressor's maximum input chunk size.

use log::warn;

use crate::error::EngineFault;

// Default quality (0 = fastest, 11 = densest).
// Can be overridden by the BRSTREAM_QUALITY environment variable at runtime,
// or by the -q command-line flag.
pub const QUALITY_DEFAULT: u32 = 11;
pub const QUALITY_MIN: u32 = 0;
pub const QUALITY_MAX: u32 = 11;

// Default base-2 logarithm of the sliding window size.
// Can be overridden by the BRSTREAM_LGWIN environment variable,
// or by the -w command-line flag.
pub const LGWIN_DEFAULT: u32 = 22;
pub const LGWIN_MIN: u32 = 10;
pub const LGWIN_MAX: u32 = 24;

// Base-2 logarithm of the input block size; 0 lets the engine pick from quality.
pub const LGBLOCK_DEFAULT: u32 = 0;
pub const LGBLOCK_MIN: u32 = 16;
pub const LGBLOCK_MAX: u32 = 24;

pub const ENV_QUALITY: &str = "BRSTREAM_QUALITY";
pub const ENV_LGWIN: &str = "BRSTREAM_LGWIN";

/// Hint to the encoder about the kind of input it will see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncoderMode {
    #[default]
    Generic,
    /// UTF-8 formatted text.
    Text,
    /// WOFF 2.0 font data.
    Font,
}

impl EncoderMode {
    pub fn name(self) -> &'static str {
        match self {
            EncoderMode::Generic => "generic",
            EncoderMode::Text => "text",
            EncoderMode::Font => "font",
        }
    }
}

/// Compression parameters for one stream.
///
/// A plain value type; the compressor copies it at construction and never
/// changes it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameters {
    pub quality: u32,
    pub lgwin: u32,
    /// 0 = derived from quality, otherwise clamped into `16..=24` by the engine.
    pub lgblock: u32,
    pub mode: EncoderMode,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            quality: QUALITY_DEFAULT,
            lgwin: LGWIN_DEFAULT,
            lgblock: LGBLOCK_DEFAULT,
            mode: EncoderMode::Generic,
        }
    }
}

impl Parameters {
    /// Defaults with `BRSTREAM_QUALITY` / `BRSTREAM_LGWIN` applied.
    pub fn from_env() -> Self {
        Parameters {
            quality: init_quality(),
            lgwin: init_lgwin(),
            ..Parameters::default()
        }
    }

    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_lgwin(mut self, lgwin: u32) -> Self {
        self.lgwin = lgwin;
        self
    }

    pub fn with_lgblock(mut self, lgblock: u32) -> Self {
        self.lgblock = lgblock;
        self
    }

    pub fn with_mode(mut self, mode: EncoderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check every field against the engine's accepted range.
    pub fn validate(&self) -> Result<(), EngineFault> {
        check_range("quality", self.quality, QUALITY_MIN, QUALITY_MAX)?;
        check_range("lgwin", self.lgwin, LGWIN_MIN, LGWIN_MAX)?;
        if self.lgblock != 0 {
            check_range("lgblock", self.lgblock, LGBLOCK_MIN, LGBLOCK_MAX)?;
        }
        Ok(())
    }

    /// Effective input block exponent, following the reference encoder:
    /// the two fastest qualities work on whole windows, qualities 2–3 on
    /// 16 KiB blocks, and the rest on `lgblock` (16 unless set, raised to
    /// `min(18, lgwin)` from quality 9 upwards).
    pub fn effective_lgblock(&self) -> u32 {
        match self.quality {
            0 | 1 => self.lgwin,
            2 | 3 => 14,
            q if self.lgblock == 0 => {
                if q >= 9 && self.lgwin > 16 {
                    self.lgwin.min(18)
                } else {
                    16
                }
            }
            _ => self.lgblock.clamp(LGBLOCK_MIN, LGBLOCK_MAX),
        }
    }

    /// Maximum number of bytes the engine accepts in one window (`M`).
    pub fn input_block_size(&self) -> usize {
        1usize << self.effective_lgblock()
    }
}

fn check_range(name: &'static str, value: u32, min: u32, max: u32) -> Result<(), EngineFault> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(EngineFault::InvalidParameter {
            name,
            value,
            min,
            max,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment overrides
// ─────────────────────────────────────────────────────────────────────────────

pub fn init_quality() -> u32 {
    init_quality_from(std::env::var(ENV_QUALITY).ok().as_deref())
}

/// Testable core of [`init_quality`]: `None` means the variable is unset.
pub fn init_quality_from(env_val: Option<&str>) -> u32 {
    parse_env_u32(ENV_QUALITY, env_val, QUALITY_MIN, QUALITY_MAX).unwrap_or(QUALITY_DEFAULT)
}

pub fn init_lgwin() -> u32 {
    init_lgwin_from(std::env::var(ENV_LGWIN).ok().as_deref())
}

pub fn init_lgwin_from(env_val: Option<&str>) -> u32 {
    parse_env_u32(ENV_LGWIN, env_val, LGWIN_MIN, LGWIN_MAX).unwrap_or(LGWIN_DEFAULT)
}

fn parse_env_u32(var: &str, env_val: Option<&str>, min: u32, max: u32) -> Option<u32> {
    let raw = env_val?;
    match raw.trim().parse::<u32>() {
        Ok(v) if (min..=max).contains(&v) => Some(v),
        Ok(v) => {
            warn!("ignoring {var}={v}: outside {min}..={max}");
            None
        }
        Err(_) => {
            warn!("ignoring {var}={raw}: not a valid unsigned value");
            None
        }
    }
}
