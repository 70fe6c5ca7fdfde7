//! In-memory 8-bit raster image.
//!
//! ## Layout
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//!
//! Samples are stored row-major and channel-interleaved in a standard-layout
//! [`Array3`]. A buffer is always non-empty.

use ndarray::{Array3, ArrayView3, ArrayViewMut3};

use crate::error::{EditError, EditResult};

/// Owned image buffer passed by value from stage to stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

impl PixelBuffer {
    /// Build a buffer from raw interleaved samples.
    ///
    /// # Errors
    /// Fails if a dimension is zero, `channels` is not 1 or 3, or
    /// `samples.len() != height * width * channels`.
    pub fn new(height: usize, width: usize, channels: usize, samples: Vec<u8>) -> EditResult<Self> {
        let expected = check_dims(height, width, channels)?;
        if samples.len() != expected {
            return Err(EditError::InvalidBuffer(format!(
                "expected {expected} samples for {height}x{width}x{channels}, got {}",
                samples.len()
            )));
        }
        let data = Array3::from_shape_vec((height, width, channels), samples)
            .map_err(|e| EditError::InvalidBuffer(e.to_string()))?;
        Ok(Self { data })
    }

    /// Wrap an existing `(height, width, channels)` array.
    ///
    /// The samples are compacted into a fresh row-major vector unless the
    /// array already owns exactly its visible elements, so sliced or permuted
    /// arrays never leak hidden rows into [`PixelBuffer::into_samples`].
    pub fn from_array(data: Array3<u8>) -> EditResult<Self> {
        let dim = data.dim();
        let len = check_dims(dim.0, dim.1, dim.2)?;

        let samples = if data.is_standard_layout() {
            match data.into_raw_vec_and_offset() {
                (raw, Some(0)) if raw.len() == len => raw,
                (raw, offset) => {
                    let start = offset.unwrap_or(0);
                    raw.get(start..start + len)
                        .map(<[u8]>::to_vec)
                        .ok_or_else(|| EditError::InvalidBuffer("array storage is shorter than its shape".into()))?
                }
            }
        } else {
            data.iter().copied().collect()
        };

        let data = Array3::from_shape_vec(dim, samples).map_err(|e| EditError::InvalidBuffer(e.to_string()))?;
        Ok(Self { data })
    }

    /// A buffer with every sample set to `value`.
    pub fn filled(height: usize, width: usize, channels: usize, value: u8) -> EditResult<Self> {
        check_dims(height, width, channels)?;
        Ok(Self {
            data: Array3::from_elem((height, width, channels), value),
        })
    }

    /// A buffer whose sample at `(y, x, c)` is `f(y, x, c)`.
    pub fn from_fn<F>(height: usize, width: usize, channels: usize, mut f: F) -> EditResult<Self>
    where
        F: FnMut(usize, usize, usize) -> u8,
    {
        check_dims(height, width, channels)?;
        Ok(Self {
            data: Array3::from_shape_fn((height, width, channels), |(y, x, c)| f(y, x, c)),
        })
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    /// `(height, width, channels)`.
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub(crate) fn view_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        self.data.view_mut()
    }

    /// Row-major, channel-interleaved samples.
    pub fn samples(&self) -> &[u8] {
        // standard layout is established by every constructor
        self.data.as_slice().unwrap_or_default()
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        self.data.as_slice_mut().unwrap_or_default()
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.data.into_raw_vec_and_offset().0
    }

    /// Copy channel `channel` out as a row-major f32 plane.
    pub(crate) fn plane_f32(&self, channel: usize) -> Vec<f32> {
        let channels = self.channels();
        self.samples()
            .iter()
            .skip(channel)
            .step_by(channels)
            .map(|&v| v as f32)
            .collect()
    }

    /// Assemble a buffer from per-channel f32 planes, rounding and clipping
    /// each value to `[0, 255]`.
    ///
    /// Every plane must hold `height * width` values and there must be 1 or
    /// 3 planes; callers derive these from an existing buffer.
    pub(crate) fn from_planes_f32(height: usize, width: usize, planes: &[Vec<f32>]) -> Self {
        debug_assert!(planes.iter().all(|p| p.len() == height * width));
        let data = Array3::from_shape_fn((height, width, planes.len()), |(y, x, c)| {
            to_u8(planes[c][y * width + x])
        });
        Self { data }
    }
}

/// Round to nearest and clip into the 8-bit range.
#[inline]
pub(crate) fn to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Validate a shape and return its sample count.
fn check_dims(height: usize, width: usize, channels: usize) -> EditResult<usize> {
    if height == 0 || width == 0 {
        return Err(EditError::InvalidBuffer(format!(
            "dimensions must be positive, got {height}x{width}"
        )));
    }
    if channels != 1 && channels != 3 {
        return Err(EditError::InvalidBuffer(format!(
            "expected 1 or 3 channels, got {channels}"
        )));
    }
    height
        .checked_mul(width)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| EditError::InvalidBuffer(format!("{height}x{width}x{channels} overflows the sample count")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::s;

    #[test]
    fn test_new_checks_sample_count() {
        assert!(PixelBuffer::new(2, 2, 3, vec![0; 12]).is_ok());
        let err = PixelBuffer::new(2, 2, 3, vec![0; 11]).unwrap_err();
        assert!(matches!(err, EditError::InvalidBuffer(_)));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(PixelBuffer::filled(0, 4, 3, 0).is_err());
        assert!(PixelBuffer::filled(4, 0, 1, 0).is_err());
        assert!(PixelBuffer::filled(4, 4, 4, 0).is_err());
        assert!(PixelBuffer::filled(4, 4, 2, 0).is_err());
    }

    #[test]
    fn test_samples_are_interleaved() {
        let img = PixelBuffer::from_fn(1, 2, 3, |_, x, c| (x * 10 + c) as u8).unwrap();
        assert_eq!(img.samples(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(img.plane_f32(1), vec![1.0, 11.0]);
    }

    #[test]
    fn test_from_array_normalizes_layout() {
        // built column-major, then viewed as (y, x, c)
        let base = Array3::from_shape_fn((3, 2, 1), |(x, y, _)| (y * 3 + x) as u8);
        let permuted = base.permuted_axes([1, 0, 2]);
        assert!(!permuted.is_standard_layout());

        let img = PixelBuffer::from_array(permuted).unwrap();
        assert_eq!(img.dim(), (2, 3, 1));
        assert_eq!(img.samples(), &[0, 1, 2, 3, 4, 5]);

        let rgba = Array3::<u8>::zeros((2, 2, 4));
        assert!(PixelBuffer::from_array(rgba).is_err());
    }

    #[test]
    fn test_from_array_drops_sliced_rows() {
        let mut data = Array3::from_shape_fn((4, 2, 1), |(y, x, _)| (y * 10 + x) as u8);
        data.slice_collapse(s![1.., .., ..]);
        assert!(data.is_standard_layout());

        let img = PixelBuffer::from_array(data).unwrap();
        assert_eq!(img.dim(), (3, 2, 1));
        assert_eq!(img.samples(), &[10, 11, 20, 21, 30, 31]);
        assert_eq!(img.into_samples(), vec![10, 11, 20, 21, 30, 31]);
    }

    #[test]
    fn test_sliced_array_through_in_place_stage() {
        let mut data = Array3::from_shape_fn((3, 2, 3), |(y, x, c)| (y * 40 + x * 10 + c) as u8);
        data.slice_collapse(s![1.., .., ..]);

        let img = PixelBuffer::from_array(data).unwrap();
        let out = crate::filters::Brightness::new(1.0).unwrap().apply(img);
        let samples = out.into_samples();
        assert_eq!(samples.len(), 2 * 2 * 3);
        assert_eq!(&samples[..3], &[40, 41, 42]);
    }

    #[test]
    fn test_overflowing_shape_is_rejected() {
        let err = PixelBuffer::new(usize::MAX, 2, 3, vec![]).unwrap_err();
        assert!(matches!(err, EditError::InvalidBuffer(_)));
        assert!(PixelBuffer::filled(usize::MAX / 2, 3, 3, 0).is_err());
    }

    #[test]
    fn test_to_u8_rounds_and_clips() {
        assert_eq!(to_u8(126.6), 127);
        assert_eq!(to_u8(126.4), 126);
        assert_eq!(to_u8(-3.0), 0);
        assert_eq!(to_u8(300.0), 255);
        assert_eq!(to_u8(f32::NAN), 0);
    }

    #[test]
    fn test_from_planes_round_trip() {
        let img = PixelBuffer::from_fn(2, 2, 3, |y, x, c| (y * 50 + x * 20 + c) as u8).unwrap();
        let planes: Vec<Vec<f32>> = (0..3).map(|c| img.plane_f32(c)).collect();
        let rebuilt = PixelBuffer::from_planes_f32(2, 2, &planes);
        assert_eq!(rebuilt, img);
    }
}
