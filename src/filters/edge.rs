//! Sobel edge detection.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - uses the single channel directly
//! - **RGB**: (height, width, 3) - reduces to the unweighted channel average
//!
//! The average is taken as the plain channel sum: the final rescale to 255
//! cancels the `1/3`, and integer-valued planes keep the Sobel sums exact, so
//! flat regions give exactly zero.
//!
//! Output has the input's channel count; for RGB the edge magnitude is
//! replicated across all three channels.

use super::convolve::convolve_plane;
use super::core::{sobel_x, sobel_y, Kernel};
use super::grayscale::{luminance_plane, GrayscaleWeights};
use crate::buffer::PixelBuffer;

/// Gradient magnitude `sqrt(gx^2 + gy^2)` of a luminance plane, rescaled so
/// the strongest edge maps to 255.
///
/// A plane without any gradient stays all-zero.
pub fn sobel_magnitude(plane: &[f32], height: usize, width: usize, kx: &Kernel, ky: &Kernel) -> Vec<f32> {
    let gx = convolve_plane(plane, height, width, kx);
    let gy = convolve_plane(plane, height, width, ky);

    let mut magnitude: Vec<f32> = gx
        .iter()
        .zip(gy.iter())
        .map(|(x, y)| (x * x + y * y).sqrt())
        .collect();

    let max = magnitude.iter().copied().fold(0.0f32, f32::max);
    if max > 0.0 {
        let scale = 255.0 / max;
        for m in magnitude.iter_mut() {
            *m *= scale;
        }
    }
    magnitude
}

/// Sobel stage holding the horizontal and vertical operators.
#[derive(Debug, Clone, PartialEq)]
pub struct Sobel {
    kernel_x: Kernel,
    kernel_y: Kernel,
}

impl Default for Sobel {
    fn default() -> Self {
        Self::new()
    }
}

impl Sobel {
    pub fn new() -> Self {
        Self {
            kernel_x: sobel_x(),
            kernel_y: sobel_y(),
        }
    }

    pub fn apply(&self, image: PixelBuffer) -> PixelBuffer {
        let (height, width, channels) = image.dim();
        let luminance = luminance_plane(image.view(), GrayscaleWeights::channel_sum());

        let magnitude = sobel_magnitude(&luminance, height, width, &self.kernel_x, &self.kernel_y);
        let planes = vec![magnitude; channels];
        PixelBuffer::from_planes_f32(height, width, &planes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_image_is_all_zero() {
        let img = PixelBuffer::filled(6, 5, 3, 200).unwrap();
        let out = Sobel::new().apply(img);
        assert_eq!(out.dim(), (6, 5, 3));
        assert!(out.samples().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_flat_image_is_zero_for_every_level() {
        for value in 0..=255u8 {
            let img = PixelBuffer::filled(4, 4, 3, value).unwrap();
            let out = Sobel::new().apply(img);
            assert!(out.samples().iter().all(|&v| v == 0), "level {value}");
        }
    }

    #[test]
    fn test_uneven_channels_average_like_luminance() {
        // columns rise by 1 in a single channel only; still a real edge
        let img = PixelBuffer::from_fn(3, 4, 3, |_, x, c| if c == 0 { 7 + x as u8 } else { 7 }).unwrap();
        let out = Sobel::new().apply(img);
        assert_eq!(out.samples().iter().copied().max(), Some(255));
    }

    #[test]
    fn test_vertical_edge_hits_full_scale() {
        let img = PixelBuffer::from_fn(5, 6, 3, |_, x, _| if x < 3 { 0 } else { 255 }).unwrap();
        let out = Sobel::new().apply(img);

        // strongest response sits on both sides of the step
        assert_eq!(out.view()[[2, 2, 0]], 255);
        assert_eq!(out.view()[[2, 3, 0]], 255);
        assert_eq!(out.view()[[2, 0, 0]], 0);
        assert_eq!(out.view()[[2, 5, 0]], 0);
    }

    #[test]
    fn test_rgb_output_is_replicated() {
        let img = PixelBuffer::from_fn(5, 5, 3, |y, x, c| ((y * 40 + x * 10) as u8).wrapping_add(c as u8 * 5)).unwrap();
        let out = Sobel::new().apply(img);
        for y in 0..5 {
            for x in 0..5 {
                let v = out.view()[[y, x, 0]];
                assert_eq!(out.view()[[y, x, 1]], v);
                assert_eq!(out.view()[[y, x, 2]], v);
            }
        }
    }

    #[test]
    fn test_grayscale_stays_single_channel() {
        let img = PixelBuffer::from_fn(4, 4, 1, |y, _, _| (y * 60) as u8).unwrap();
        let out = Sobel::new().apply(img);
        assert_eq!(out.channels(), 1);
        assert_eq!(out.samples().iter().copied().max(), Some(255));
    }

    #[test]
    fn test_magnitude_combines_both_gradients() {
        // diagonal ramp gives equal |gx| and |gy|
        let plane: Vec<f32> = (0..25).map(|i| ((i / 5 + i % 5) * 10) as f32).collect();
        let gx = convolve_plane(&plane, 5, 5, &sobel_x());
        let gy = convolve_plane(&plane, 5, 5, &sobel_y());
        assert_eq!(gx[12].abs(), gy[12].abs());

        let mag = sobel_magnitude(&plane, 5, 5, &sobel_x(), &sobel_y());
        assert!((mag[12] - 255.0).abs() < 1e-3);
    }
}
