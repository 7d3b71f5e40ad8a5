//! RGBA pixel buffer carried from the generator to the writer.

use crate::{CubeError, CubeResult};

/// Ordered sequence of RGBA records.
///
/// The generator fills it in B-outer / G-middle / R-inner order, so the
/// record for grid point `(r, g, b)` lives at `b * N² + g * N + r`. External
/// transforms mutate the records in place and must keep that order; the
/// `.cube` writer reads them back in the same order.
///
/// Alpha is carried only so four-channel tools can process the buffer. It is
/// never written to the LUT.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PixelBuffer {
    data: Vec<[f32; 4]>,
}

impl PixelBuffer {
    /// Creates an empty buffer with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Wraps existing records.
    pub fn from_pixels(data: Vec<[f32; 4]>) -> Self {
        Self { data }
    }

    /// Builds a buffer from interleaved RGBA `f32` values.
    ///
    /// Fails when the length is not a multiple of four.
    pub fn from_flat(values: &[f32]) -> CubeResult<Self> {
        if values.len() % 4 != 0 {
            return Err(CubeError::BufferSizeMismatch {
                expected: values.len().next_multiple_of(4),
                actual: values.len(),
            });
        }
        let data = values
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect();
        Ok(Self { data })
    }

    /// Appends one record.
    #[inline]
    pub fn push(&mut self, pixel: [f32; 4]) {
        self.data.push(pixel);
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the buffer holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the record at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<[f32; 4]> {
        self.data.get(index).copied()
    }

    /// Records as a slice.
    #[inline]
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.data
    }

    /// Records as a mutable slice.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [[f32; 4]] {
        &mut self.data
    }

    /// Interleaved `RGBARGBA...` view.
    #[inline]
    pub fn as_flat(&self) -> &[f32] {
        self.data.as_flattened()
    }

    /// Mutable interleaved view, for pipelines working on raw channel data.
    #[inline]
    pub fn as_flat_mut(&mut self) -> &mut [f32] {
        self.data.as_flattened_mut()
    }

    /// Consumes the buffer and returns its records.
    pub fn into_pixels(self) -> Vec<[f32; 4]> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_view_interleaves_channels() {
        let mut buf = PixelBuffer::from_pixels(vec![[0.1, 0.2, 0.3, 1.0], [0.4, 0.5, 0.6, 1.0]]);
        assert_eq!(buf.as_flat(), &[0.1, 0.2, 0.3, 1.0, 0.4, 0.5, 0.6, 1.0]);

        buf.as_flat_mut()[4] = 0.9;
        assert_eq!(buf.get(1), Some([0.9, 0.5, 0.6, 1.0]));
    }

    #[test]
    fn from_flat_requires_whole_pixels() {
        let buf = PixelBuffer::from_flat(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(buf.len(), 2);

        let err = PixelBuffer::from_flat(&[0.0; 6]).unwrap_err();
        assert!(matches!(err, CubeError::BufferSizeMismatch { expected: 8, actual: 6 }));
    }

    #[test]
    fn empty_buffer() {
        let buf = PixelBuffer::with_capacity(8);
        assert!(buf.is_empty());
        assert_eq!(buf.get(0), None);
    }
}
