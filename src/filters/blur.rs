//! Box blur.
//!
//! A uniform averaging kernel delegated to the convolution engine. Borders
//! use edge replication, so flat regions stay flat right up to the edge.

use tracing::debug;

use super::convolve::apply_kernel;
use super::core::{box_kernel, Kernel};
use crate::buffer::PixelBuffer;
use crate::error::EditResult;

/// Smallest accepted box dimension.
pub const MIN_BOX_SIZE: usize = 3;
/// Largest accepted box dimension.
pub const MAX_BOX_SIZE: usize = 31;

/// Round an even size up to the next odd value, then clamp into
/// `[MIN_BOX_SIZE, MAX_BOX_SIZE]`.
pub fn normalize_box_size(requested: i64) -> usize {
    let odd = if requested % 2 == 0 { requested.saturating_add(1) } else { requested };
    odd.clamp(MIN_BOX_SIZE as i64, MAX_BOX_SIZE as i64) as usize
}

/// Box blur stage with its precomputed `1/(w*h)` kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxBlur {
    width: usize,
    height: usize,
    kernel: Kernel,
}

impl BoxBlur {
    /// Build a box blur. Requested sizes are adjusted rather than rejected,
    /// see [`normalize_box_size`].
    pub fn new(width: i64, height: i64) -> EditResult<Self> {
        let w = normalize_box_size(width);
        let h = normalize_box_size(height);
        if w as i64 != width || h as i64 != height {
            debug!(width, height, adjusted_width = w, adjusted_height = h, "box size adjusted");
        }
        Ok(Self {
            width: w,
            height: h,
            kernel: box_kernel(h, w)?,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn apply(&self, image: PixelBuffer) -> PixelBuffer {
        apply_kernel(&image, &self.kernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_box_size() {
        assert_eq!(normalize_box_size(3), 3);
        assert_eq!(normalize_box_size(4), 5);
        assert_eq!(normalize_box_size(2), 3);
        assert_eq!(normalize_box_size(0), 3);
        assert_eq!(normalize_box_size(-7), 3);
        assert_eq!(normalize_box_size(31), 31);
        assert_eq!(normalize_box_size(32), 31);
        assert_eq!(normalize_box_size(101), 31);
        assert_eq!(normalize_box_size(i64::MAX), 31);
    }

    #[test]
    fn test_even_request_is_adjusted() {
        let blur = BoxBlur::new(4, 4).unwrap();
        assert_eq!((blur.width(), blur.height()), (5, 5));
        assert!((blur.kernel().sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_kernel_orientation() {
        let blur = BoxBlur::new(7, 3).unwrap();
        assert_eq!(blur.kernel().width(), 7);
        assert_eq!(blur.kernel().height(), 3);
    }

    #[test]
    fn test_box_blur_smooths_impulse() {
        let img = PixelBuffer::from_fn(5, 5, 1, |y, x, _| if (y, x) == (2, 2) { 90 } else { 0 }).unwrap();
        let out = BoxBlur::new(3, 3).unwrap().apply(img);

        assert_eq!(out.view()[[2, 2, 0]], 10);
        assert_eq!(out.view()[[1, 1, 0]], 10);
        assert_eq!(out.view()[[0, 0, 0]], 0);
    }
}
