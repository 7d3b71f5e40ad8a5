//! Seam between the lattice and an external transform chain.
//!
//! The crate does not ship colour transforms. Callers implement
//! [`PixelTransform`] for their pipeline (or pass a closure) and [`bake`]
//! runs generate → transform → write with a single [`CubeConfig`].

use std::path::Path;

use tracing::debug;

use crate::{cube, lattice, CubeConfig, CubeResult};

/// In-place transform over lattice records.
///
/// Implementations must keep the record count and order; only values change.
pub trait PixelTransform {
    /// Transforms `pixels` in place.
    fn apply(&self, pixels: &mut [[f32; 4]]);
}

/// Pass-through transform. Baking it yields an identity LUT.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl PixelTransform for Identity {
    #[inline]
    fn apply(&self, _pixels: &mut [[f32; 4]]) {}
}

impl<F> PixelTransform for F
where
    F: Fn(&mut [[f32; 4]]),
{
    #[inline]
    fn apply(&self, pixels: &mut [[f32; 4]]) {
        self(pixels)
    }
}

/// Generates the lattice for `config`, runs `transform` over it and writes
/// the result to `path`.
pub fn bake<P, T>(path: P, config: &CubeConfig, transform: &T) -> CubeResult<()>
where
    P: AsRef<Path>,
    T: PixelTransform + ?Sized,
{
    let mut pixels = lattice::generate(config);
    transform.apply(pixels.pixels_mut());
    debug!(records = pixels.len(), "transform applied");
    cube::write_cube_file(path, config, &pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CubeError, Resolution};

    #[test]
    fn closure_transform() {
        let config = CubeConfig::new(Resolution::new(3).unwrap());
        let mut pixels = lattice::generate(&config);
        let halve = |px: &mut [[f32; 4]]| {
            for p in px.iter_mut() {
                p[0] *= 0.5;
            }
        };
        halve.apply(pixels.pixels_mut());
        assert_eq!(pixels.get(2), Some([0.5, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn bake_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken.cube");
        std::fs::write(&path, "keep me").unwrap();

        let config = CubeConfig::new(Resolution::new(3).unwrap());
        let err = bake(&path, &config, &Identity).unwrap_err();
        assert!(matches!(err, CubeError::OutputAlreadyExists { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }
}
