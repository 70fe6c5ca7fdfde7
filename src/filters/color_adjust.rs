//! Color adjustment filters: Brightness, Contrast, Saturation.
//!
//! These are pixel-wise operations that don't require spatial context, so
//! they mutate the owned buffer in place.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - saturation is a no-op
//! - **RGB**: (height, width, 3)
//!
//! All results are rounded to nearest and clipped to 0-255.

use ndarray::{ArrayViewMut3, Axis};

use super::grayscale::GrayscaleWeights;
use crate::buffer::{to_u8, PixelBuffer};
use crate::error::{EditError, EditResult};

/// Fixed pivot for contrast scaling (`255 / 2`).
pub const CONTRAST_MIDPOINT: f32 = 127.5;

fn require_finite(kind: &str, factor: f64) -> EditResult<()> {
    if factor.is_finite() {
        Ok(())
    } else {
        Err(EditError::construction(kind, "factor must be a finite number"))
    }
}

// ============================================================================
// Brightness
// ============================================================================

/// Multiply every sample by `factor` (in place).
///
/// # Arguments
/// * `image` - Image with 1 or 3 channels (height, width, channels)
/// * `factor` - Multiplier: 1.0 = no change, < 1.0 darkens, > 1.0 brightens
pub fn brightness_u8(mut image: ArrayViewMut3<u8>, factor: f32) {
    image.mapv_inplace(|v| to_u8(v as f32 * factor));
}

/// Brightness stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brightness {
    factor: f32,
}

impl Brightness {
    /// # Errors
    /// `factor` must be finite and strictly positive.
    pub fn new(factor: f64) -> EditResult<Self> {
        require_finite("brightness", factor)?;
        if factor <= 0.0 {
            return Err(EditError::construction("brightness", "factor must be > 0"));
        }
        Ok(Self {
            factor: factor as f32,
        })
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn apply(&self, mut image: PixelBuffer) -> PixelBuffer {
        brightness_u8(image.view_mut(), self.factor);
        image
    }
}

// ============================================================================
// Contrast
// ============================================================================

/// Scale every sample away from (or towards) [`CONTRAST_MIDPOINT`] (in place).
///
/// # Arguments
/// * `image` - Image with 1 or 3 channels (height, width, channels)
/// * `multiplier` - 1.0 = no change, 0.0 = flat gray, 2.0 = double contrast
pub fn contrast_u8(mut image: ArrayViewMut3<u8>, multiplier: f32) {
    image.mapv_inplace(|v| to_u8((v as f32 - CONTRAST_MIDPOINT) * multiplier + CONTRAST_MIDPOINT));
}

/// Contrast stage. A factor in `[-10, 10]` maps to the multiplier
/// `1 + factor / 10`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contrast {
    factor: f32,
}

impl Contrast {
    pub const MIN_FACTOR: f64 = -10.0;
    pub const MAX_FACTOR: f64 = 10.0;

    pub fn new(factor: f64) -> EditResult<Self> {
        require_finite("contrast", factor)?;
        if !(Self::MIN_FACTOR..=Self::MAX_FACTOR).contains(&factor) {
            return Err(EditError::construction(
                "contrast",
                format!("factor must be between -10.0 and 10.0, got {factor}"),
            ));
        }
        Ok(Self {
            factor: factor as f32,
        })
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn multiplier(&self) -> f32 {
        1.0 + self.factor / 10.0
    }

    pub fn apply(&self, mut image: PixelBuffer) -> PixelBuffer {
        contrast_u8(image.view_mut(), self.multiplier());
        image
    }
}

// ============================================================================
// Saturation
// ============================================================================

/// Blend each RGB pixel with its BT.601 luma (in place).
///
/// For grayscale images, this is a no-op (saturation requires color channels).
///
/// # Arguments
/// * `image` - Image with 1 or 3 channels (height, width, channels)
/// * `factor` - 0.0 = grayscale, 1.0 = no change, > 1.0 more vivid
pub fn saturation_u8(mut image: ArrayViewMut3<u8>, factor: f32) {
    if image.dim().2 < 3 {
        return;
    }
    let weights = GrayscaleWeights::bt601();

    for mut px in image.lanes_mut(Axis(2)) {
        let r = px[0] as f32 / 255.0;
        let g = px[1] as f32 / 255.0;
        let b = px[2] as f32 / 255.0;
        let lum = weights.apply(r, g, b);

        px[0] = to_u8((lum + factor * (r - lum)).clamp(0.0, 1.0) * 255.0);
        px[1] = to_u8((lum + factor * (g - lum)).clamp(0.0, 1.0) * 255.0);
        px[2] = to_u8((lum + factor * (b - lum)).clamp(0.0, 1.0) * 255.0);
    }
}

/// Saturation stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturation {
    factor: f32,
}

impl Saturation {
    pub const MAX_FACTOR: f64 = 3.0;

    pub fn new(factor: f64) -> EditResult<Self> {
        require_finite("saturation", factor)?;
        if factor < 0.0 {
            return Err(EditError::construction("saturation", "factor must be non-negative"));
        }
        if factor > Self::MAX_FACTOR {
            return Err(EditError::construction(
                "saturation",
                format!("factor must be at most 3.0, got {factor}"),
            ));
        }
        Ok(Self {
            factor: factor as f32,
        })
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn apply(&self, mut image: PixelBuffer) -> PixelBuffer {
        saturation_u8(image.view_mut(), self.factor);
        image
    }
}
