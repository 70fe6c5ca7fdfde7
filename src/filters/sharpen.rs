//! Sharpen filter (unsharp mask).
//!
//! The image is blurred with a fixed 5x5 binomial kernel (taps `1, 4, 6, 4, 1`
//! outer-producted with themselves and normalized), the blurred copy is
//! subtracted from the original to get an edge mask, and `amount * mask` is
//! added back to the original.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1)
//! - **RGB**: (height, width, 3) - each channel is sharpened independently

use tracing::warn;

use super::convolve::convolve_planes;
use super::core::{binomial_kernel_2d, Kernel};
use crate::buffer::{to_u8, PixelBuffer};
use crate::error::{EditError, EditResult};

/// Radius of the blur used for the mask; the kernel is `2 * radius + 1` wide.
pub const SHARPEN_RADIUS: usize = 2;
/// Largest accepted amount.
pub const MAX_AMOUNT: f32 = 10.0;
/// Amounts above this are accepted but tend to produce halos.
pub const ARTIFACT_AMOUNT: f32 = 5.0;

/// Unsharp-mask stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Sharpen {
    amount: f32,
    kernel: Kernel,
}

impl Sharpen {
    /// # Errors
    /// `amount` must be finite, non-negative and at most [`MAX_AMOUNT`].
    pub fn new(amount: f64) -> EditResult<Self> {
        if !amount.is_finite() {
            return Err(EditError::construction("sharpen", "amount must be a finite number"));
        }
        if amount < 0.0 {
            return Err(EditError::construction("sharpen", "amount must be non-negative"));
        }
        if amount > MAX_AMOUNT as f64 {
            return Err(EditError::construction(
                "sharpen",
                format!("amount {amount} is too large (max {MAX_AMOUNT})"),
            ));
        }
        if amount > ARTIFACT_AMOUNT as f64 {
            warn!(amount, threshold = ARTIFACT_AMOUNT, "high sharpen amount may introduce artifacts");
        }

        Ok(Self {
            amount: amount as f32,
            kernel: binomial_kernel_2d(SHARPEN_RADIUS),
        })
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Sharpen in place: `out = orig + amount * (orig - blurred)`, clipped.
    pub fn apply(&self, mut image: PixelBuffer) -> PixelBuffer {
        let channels = image.channels();
        let blurred = convolve_planes(&image, &self.kernel);

        for (i, v) in image.samples_mut().iter_mut().enumerate() {
            let orig = *v as f32;
            let blur = blurred[i % channels][i / channels];
            *v = to_u8(orig + self.amount * (orig - blur));
        }
        image
    }
}
