//! Lattice generator.
//!
//! Produces a pixel buffer holding every point of a uniform N×N×N grid over
//! `[min, max]³`. The buffer stands in for an input image: it is pushed
//! through an external transform chain and the result is written as a
//! `.cube` LUT.
//!
//! # Example
//!
//! ```rust
//! use cubegen_lut::{lattice, CubeConfig, Resolution};
//!
//! let config = CubeConfig::new(Resolution::new(3)?);
//! let pixels = lattice::generate(&config);
//!
//! assert_eq!(pixels.len(), 27);
//! assert_eq!(pixels.get(1), Some([0.5, 0.0, 0.0, 1.0]));
//! # Ok::<(), cubegen_lut::CubeError>(())
//! ```

use tracing::{info, trace};

use crate::{CubeConfig, CubeResult, PixelBuffer, Resolution};

/// Returns the RGBA record for grid indices `(r, g, b)`.
///
/// Each channel is `min + index * step`; alpha is always 1.
#[inline]
pub fn lattice_point(config: &CubeConfig, r: usize, g: usize, b: usize) -> [f32; 4] {
    let min = config.domain_min();
    let step = config.step();
    [
        min + r as f32 * step,
        min + g as f32 * step,
        min + b as f32 * step,
        1.0,
    ]
}

/// Index of grid point `(r, g, b)` within a generated buffer.
#[inline]
pub fn lattice_index(size: usize, r: usize, g: usize, b: usize) -> usize {
    b * size * size + g * size + r
}

/// Generates the full lattice for `config`.
///
/// Records are emitted with blue outermost and red innermost, which is the
/// `.cube` body order. The result depends only on the resolution and domain.
pub fn generate(config: &CubeConfig) -> PixelBuffer {
    let size = config.size();
    info!(size, "generating {0}x{0}x{0} lattice", size);
    if !config.has_default_domain() {
        info!(
            min = config.domain_min(),
            max = config.domain_max(),
            "using custom cube domain"
        );
    }

    let mut pixels = PixelBuffer::with_capacity(config.resolution().entry_count());
    for b in 0..size {
        for g in 0..size {
            for r in 0..size {
                pixels.push(lattice_point(config, r, g, b));
            }
        }
    }

    trace!(records = pixels.len(), step = config.step(), "lattice generated");
    pixels
}

/// Parses `token`, applies the `CUBE_*` environment and generates the lattice.
///
/// Returns the config alongside the buffer so the caller can hand the same
/// settings to the writer.
pub fn generate_from_env(token: &str) -> CubeResult<(CubeConfig, PixelBuffer)> {
    let resolution = Resolution::parse(token)?;
    let config = CubeConfig::from_env(resolution)?;
    let pixels = generate(&config);
    Ok((config, pixels))
}
