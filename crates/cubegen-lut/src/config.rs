//! Cube resolution and output configuration.
//!
//! A [`CubeConfig`] is created once by the driver and handed, unchanged, to
//! both the lattice generator and the `.cube` writer. It carries the grid
//! resolution, the sampled domain, the number of fractional digits and an
//! optional header comment.
//!
//! # Environment
//!
//! [`CubeConfig::from_env`] reads these overrides:
//!
//! | Variable            | Meaning                      | Default |
//! |---------------------|------------------------------|---------|
//! | `CUBE_MIN`          | domain minimum               | `0.0`   |
//! | `CUBE_MAX`          | domain maximum               | `1.0`   |
//! | `CUBE_FLOAT_LENGTH` | fractional digits in output  | `6`     |
//! | `CUBE_COMMENT`      | `## ` comment in the header  | none    |
//!
//! The domain is only overridden when both `CUBE_MIN` and `CUBE_MAX` are set;
//! a lone bound is ignored.
//!
//! # Example
//!
//! ```rust
//! use cubegen_lut::{CubeConfig, Resolution};
//!
//! let size = Resolution::parse("33")?;
//! let config = CubeConfig::new(size).with_domain(-0.125, 1.5)?;
//! assert_eq!(config.size(), 33);
//! assert!(!config.has_default_domain());
//! # Ok::<(), cubegen_lut::CubeError>(())
//! ```

use std::env;
use std::fmt;

use tracing::{debug, warn};

use crate::{CubeError, CubeResult};

/// Smallest accepted grid resolution.
pub const MIN_SIZE: usize = 3;

/// Default upper bound on the grid resolution.
///
/// 300³ records is 27M pixels, about 430 MB of RGBA `f32`.
pub const DEFAULT_MAX_SIZE: usize = 300;

/// Hard ceiling for any upper bound passed to [`Resolution::new_bounded`].
///
/// 3000³ RGBA `f32` records is already over 400 GB.
pub const ABSOLUTE_MAX_SIZE: usize = 3000;

/// Default number of fractional digits written per value.
pub const DEFAULT_PRECISION: usize = 6;

/// Largest accepted number of fractional digits.
pub const MAX_PRECISION: usize = 32;

/// Environment variable holding the domain minimum.
pub const ENV_MIN: &str = "CUBE_MIN";
/// Environment variable holding the domain maximum.
pub const ENV_MAX: &str = "CUBE_MAX";
/// Environment variable holding the output precision.
pub const ENV_PRECISION: &str = "CUBE_FLOAT_LENGTH";
/// Environment variable holding the header comment.
pub const ENV_COMMENT: &str = "CUBE_COMMENT";

/// Validated grid resolution: the number of samples per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution(usize);

impl Resolution {
    /// Validates a numeric resolution against [`MIN_SIZE`] and [`DEFAULT_MAX_SIZE`].
    pub fn new(size: usize) -> CubeResult<Self> {
        Self::new_bounded(size, DEFAULT_MAX_SIZE)
    }

    /// Validates a numeric resolution against [`MIN_SIZE`] and `max_size`.
    ///
    /// `max_size` is capped at [`ABSOLUTE_MAX_SIZE`], and sizes whose buffer
    /// byte count does not fit in `usize` are rejected.
    pub fn new_bounded(size: usize, max_size: usize) -> CubeResult<Self> {
        Self::check_range(size, max_size).map_err(|reason| CubeError::InvalidResolution {
            token: size.to_string(),
            reason,
        })
    }

    fn check_range(size: usize, max_size: usize) -> Result<Self, String> {
        let max_size = max_size.min(ABSOLUTE_MAX_SIZE);
        if size < MIN_SIZE || size > max_size {
            return Err(format!("size must be between {} and {}", MIN_SIZE, max_size));
        }
        let bytes = size
            .checked_pow(3)
            .and_then(|n| n.checked_mul(std::mem::size_of::<[f32; 4]>()));
        if bytes.is_none() {
            return Err(format!("a {0}x{0}x{0} lattice does not fit in memory", size));
        }
        Ok(Self(size))
    }

    /// Parses a size token with the default upper bound.
    pub fn parse(token: &str) -> CubeResult<Self> {
        Self::parse_bounded(token, DEFAULT_MAX_SIZE)
    }

    /// Parses a size token such as `"33"`.
    ///
    /// Only decimal integer text is accepted; surrounding whitespace is
    /// ignored.
    pub fn parse_bounded(token: &str, max_size: usize) -> CubeResult<Self> {
        let trimmed = token.trim();
        let invalid = |reason: String| CubeError::InvalidResolution {
            token: token.to_string(),
            reason,
        };

        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a decimal integer".into()));
        }
        // All digits, so the only possible parse failure is overflow.
        let size: usize = trimmed.parse().map_err(|_| {
            invalid(format!(
                "size must be between {} and {}",
                MIN_SIZE,
                max_size.min(ABSOLUTE_MAX_SIZE)
            ))
        })?;
        Self::check_range(size, max_size).map_err(invalid)
    }

    /// Samples per channel (N).
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Total number of lattice points (N³).
    #[inline]
    pub fn entry_count(self) -> usize {
        self.0 * self.0 * self.0
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settings shared by lattice generation and `.cube` serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeConfig {
    resolution: Resolution,
    domain_min: f32,
    domain_max: f32,
    precision: usize,
    comment: Option<String>,
}

impl CubeConfig {
    /// Creates a config with the default `[0, 1]` domain, 6 digits and no comment.
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            domain_min: 0.0,
            domain_max: 1.0,
            precision: DEFAULT_PRECISION,
            comment: None,
        }
    }

    /// Creates a config and applies the `CUBE_*` environment overrides.
    pub fn from_env(resolution: Resolution) -> CubeResult<Self> {
        Self::from_vars(resolution, |name| match env::var(name) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            // Lossy text never parses as a number, so numeric overrides still fail.
            Err(env::VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
        })
    }

    /// Creates a config and applies overrides from an arbitrary lookup.
    ///
    /// `lookup` receives the variable names listed in the module docs and
    /// returns `None` when a variable is unset.
    pub fn from_vars<F>(resolution: Resolution, lookup: F) -> CubeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(resolution);

        match (lookup(ENV_MIN), lookup(ENV_MAX)) {
            (Some(min), Some(max)) => {
                let min = parse_bound(ENV_MIN, &min)?;
                let max = parse_bound(ENV_MAX, &max)?;
                config = config.with_domain(min, max)?;
            }
            (Some(_), None) => warn!("{} ignored without {}", ENV_MIN, ENV_MAX),
            (None, Some(_)) => warn!("{} ignored without {}", ENV_MAX, ENV_MIN),
            (None, None) => {}
        }

        if let Some(value) = lookup(ENV_PRECISION) {
            let precision: usize = value.trim().parse().map_err(|_| CubeError::InvalidConfiguration {
                name: ENV_PRECISION.into(),
                value: value.clone(),
                reason: "expected a non-negative integer".into(),
            })?;
            config = config.with_precision(precision).map_err(|_| CubeError::InvalidConfiguration {
                name: ENV_PRECISION.into(),
                value,
                reason: format!("at most {} digits are supported", MAX_PRECISION),
            })?;
        }

        config.comment = lookup(ENV_COMMENT);

        debug!(
            size = config.size(),
            min = config.domain_min,
            max = config.domain_max,
            precision = config.precision,
            "cube config resolved"
        );
        Ok(config)
    }

    /// Sets the sampled domain.
    ///
    /// Both bounds must be finite and `min < max`.
    pub fn with_domain(mut self, min: f32, max: f32) -> CubeResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(CubeError::InvalidConfiguration {
                name: "domain".into(),
                value: format!("[{}, {}]", min, max),
                reason: "minimum must be less than maximum".into(),
            });
        }
        self.domain_min = min;
        self.domain_max = max;
        Ok(self)
    }

    /// Sets the number of fractional digits, at most [`MAX_PRECISION`].
    pub fn with_precision(mut self, precision: usize) -> CubeResult<Self> {
        if precision > MAX_PRECISION {
            return Err(CubeError::InvalidConfiguration {
                name: "precision".into(),
                value: precision.to_string(),
                reason: format!("at most {} digits are supported", MAX_PRECISION),
            });
        }
        self.precision = precision;
        Ok(self)
    }

    /// Sets the header comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Grid resolution.
    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Samples per channel (N).
    #[inline]
    pub fn size(&self) -> usize {
        self.resolution.get()
    }

    /// Domain minimum.
    #[inline]
    pub fn domain_min(&self) -> f32 {
        self.domain_min
    }

    /// Domain maximum.
    #[inline]
    pub fn domain_max(&self) -> f32 {
        self.domain_max
    }

    /// Fractional digits per written value.
    #[inline]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Header comment, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// True when the domain is exactly `[0, 1]`.
    pub fn has_default_domain(&self) -> bool {
        self.domain_min == 0.0 && self.domain_max == 1.0
    }

    /// Distance between neighbouring lattice points.
    #[inline]
    pub fn step(&self) -> f32 {
        (self.domain_max - self.domain_min) / (self.size() - 1) as f32
    }
}

fn parse_bound(name: &str, value: &str) -> CubeResult<f32> {
    let invalid = |reason: &str| CubeError::InvalidConfiguration {
        name: name.into(),
        value: value.into(),
        reason: reason.into(),
    };
    let parsed: f32 = value.trim().parse().map_err(|_| invalid("expected a number"))?;
    if !parsed.is_finite() {
        return Err(invalid("expected a finite number"));
    }
    Ok(parsed)
}
