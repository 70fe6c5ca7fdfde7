//! Luminance extraction.
//!
//! Sobel reduces color input with an unweighted channel sum; saturation
//! blends against ITU-R BT.601 luma.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - the single channel is the luminance
//! - **RGB**: (height, width, 3) - weighted sum of the three channels

use ndarray::ArrayView3;

/// ITU-R BT.601 luma coefficients
pub const LUMA_R: f32 = 0.299;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_B: f32 = 0.114;

/// RGB channel weights for luminance conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrayscaleWeights {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for GrayscaleWeights {
    fn default() -> Self {
        Self::bt601()
    }
}

impl GrayscaleWeights {
    /// BT.601 luma (default)
    pub fn bt601() -> Self {
        Self {
            r: LUMA_R,
            g: LUMA_G,
            b: LUMA_B,
        }
    }

    /// Unnormalized channel sum R+G+B. Exact in f32 for 8-bit input; three
    /// times the simple average.
    pub fn channel_sum() -> Self {
        Self {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        }
    }

    #[inline]
    pub fn apply(&self, r: f32, g: f32, b: f32) -> f32 {
        self.r * r + self.g * g + self.b * b
    }
}

/// Compute a row-major luminance plane in the input's 0-255 scale.
///
/// Single-channel input is copied through unchanged.
pub fn luminance_plane(input: ArrayView3<u8>, weights: GrayscaleWeights) -> Vec<f32> {
    let (height, width, channels) = input.dim();
    let mut plane = Vec::with_capacity(height * width);

    for y in 0..height {
        for x in 0..width {
            let lum = if channels < 3 {
                input[[y, x, 0]] as f32
            } else {
                weights.apply(
                    input[[y, x, 0]] as f32,
                    input[[y, x, 1]] as f32,
                    input[[y, x, 2]] as f32,
                )
            };
            plane.push(lum);
        }
    }
    plane
}
