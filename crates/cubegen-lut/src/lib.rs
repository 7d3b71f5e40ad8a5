//! # cubegen-lut
//!
//! Synthetic lattice generation and `.cube` 3D LUT writing.
//!
//! Instead of reading an image, the generator synthesizes every point of a
//! uniform N×N×N RGB grid. The buffer is run through an external transform
//! chain and the transformed values are written as a `.cube` LUT that maps
//! the original grid to the transformed colours.
//!
//! # Flow
//!
//! 1. Build a [`CubeConfig`] from a [`Resolution`] (and optionally the
//!    `CUBE_*` environment).
//! 2. [`lattice::generate`] the [`PixelBuffer`].
//! 3. Run it through a [`PixelTransform`].
//! 4. [`cube::write_cube_file`] with the same config.
//!
//! [`bake`] does steps 2–4 in one call.
//!
//! # Usage
//!
//! ```rust
//! use cubegen_lut::{cube, lattice, CubeConfig, Resolution};
//!
//! let config = CubeConfig::new(Resolution::parse("17")?).with_precision(4)?;
//! let pixels = lattice::generate(&config);
//!
//! let mut text = Vec::new();
//! cube::write_cube(&mut text, &config, &pixels)?;
//! assert!(String::from_utf8(text).unwrap().contains("LUT_3D_SIZE 17"));
//! # Ok::<(), cubegen_lut::CubeError>(())
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Diagnostics
//!
//! # Used By
//!
//! - `cubegen-cli` - The `cubegen` binary

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod buffer;
mod config;
mod error;
pub mod cube;
pub mod lattice;
pub mod transform;

pub use buffer::PixelBuffer;
pub use config::{
    CubeConfig, Resolution, ABSOLUTE_MAX_SIZE, DEFAULT_MAX_SIZE, DEFAULT_PRECISION, ENV_COMMENT,
    ENV_MAX, ENV_MIN, ENV_PRECISION, MAX_PRECISION, MIN_SIZE,
};
pub use error::{CubeError, CubeResult};
pub use cube::{parse_cube, read_cube_file, write_cube, write_cube_file, CubeFile};
pub use lattice::{generate, generate_from_env};
pub use transform::{bake, Identity, PixelTransform};
