//! Convolution kernels shared by the spatial filters.
//!
//! This module provides:
//! - The [`Kernel`] type (odd-sized, row-major f32 weights)
//! - Uniform box kernel generation
//! - Binomial (approximately Gaussian) kernel generation
//! - The fixed 3x3 Sobel operators

use crate::error::{EditError, EditResult};

/// Odd-sized 2D convolution kernel.
///
/// Odd dimensions guarantee a single well-defined center sample, which keeps
/// the edge padding symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    height: usize,
    width: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Build a kernel from row-major weights.
    ///
    /// # Errors
    /// Fails if either dimension is even or zero, or the weight count does
    /// not match.
    pub fn new(height: usize, width: usize, weights: Vec<f32>) -> EditResult<Self> {
        if height % 2 == 0 || width % 2 == 0 {
            return Err(EditError::InvalidKernel(format!(
                "dimensions must be odd, got {height}x{width}"
            )));
        }
        if weights.len() != height * width {
            return Err(EditError::InvalidKernel(format!(
                "expected {} weights, got {}",
                height * width,
                weights.len()
            )));
        }
        Ok(Self {
            height,
            width,
            weights,
        })
    }

    /// The 1x1 identity kernel `[[1]]`.
    pub fn identity() -> Self {
        Self {
            height: 1,
            width: 1,
            weights: vec![1.0],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.weights[row * self.width + col]
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// The kernel rotated by 180 degrees.
    pub fn flipped(&self) -> Self {
        let mut weights = self.weights.clone();
        weights.reverse();
        Self {
            height: self.height,
            width: self.width,
            weights,
        }
    }
}

/// Uniform averaging kernel of `height` x `width`, each weight `1/(w*h)`.
///
/// Dimensions must already be odd.
pub fn box_kernel(height: usize, width: usize) -> EditResult<Kernel> {
    let n = (height * width).max(1);
    Kernel::new(height, width, vec![1.0 / n as f32; n])
}

/// Generate a normalized 1D binomial kernel of `2 * radius + 1` taps.
///
/// Row `2 * radius` of Pascal's triangle; radius 2 gives `1, 4, 6, 4, 1`.
pub fn binomial_kernel_1d(radius: usize) -> Vec<f32> {
    let size = 2 * radius + 1;
    let mut row = vec![1.0f64];
    for _ in 1..size {
        let mut next = Vec::with_capacity(row.len() + 1);
        next.push(1.0);
        for pair in row.windows(2) {
            next.push(pair[0] + pair[1]);
        }
        next.push(1.0);
        row = next;
    }

    // Normalize
    let sum: f64 = row.iter().sum();
    row.iter().map(|v| (v / sum) as f32).collect()
}

/// Generate a normalized 2D binomial kernel (outer product of the 1D taps).
pub fn binomial_kernel_2d(radius: usize) -> Kernel {
    let k1d = binomial_kernel_1d(radius);
    let size = k1d.len();

    let mut weights = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            weights.push(k1d[y] * k1d[x]);
        }
    }

    Kernel {
        height: size,
        width: size,
        weights,
    }
}

/// Horizontal-gradient Sobel operator `[[-1,0,1],[-2,0,2],[-1,0,1]]`.
pub fn sobel_x() -> Kernel {
    Kernel {
        height: 3,
        width: 3,
        weights: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
    }
}

/// Vertical-gradient Sobel operator `[[-1,-2,-1],[0,0,0],[1,2,1]]`.
pub fn sobel_y() -> Kernel {
    Kernel {
        height: 3,
        width: 3,
        weights: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_requires_odd_dimensions() {
        assert!(Kernel::new(3, 3, vec![0.0; 9]).is_ok());
        assert!(Kernel::new(2, 3, vec![0.0; 6]).is_err());
        assert!(Kernel::new(3, 4, vec![0.0; 12]).is_err());
        assert!(Kernel::new(0, 1, vec![]).is_err());
        assert!(matches!(
            Kernel::new(3, 3, vec![0.0; 8]),
            Err(EditError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_box_kernel_is_normalized() {
        let k = box_kernel(3, 5).unwrap();
        assert_eq!((k.height(), k.width()), (3, 5));
        assert!((k.sum() - 1.0).abs() < 1e-5);
        assert!((k.at(1, 2) - 1.0 / 15.0).abs() < 1e-7);
    }

    #[test]
    fn test_binomial_radius_two() {
        let k = binomial_kernel_1d(2);
        let expected = [1.0f32, 4.0, 6.0, 4.0, 1.0].map(|v| v / 16.0);
        for (a, b) in k.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-6);
        }

        let k2 = binomial_kernel_2d(2);
        assert_eq!((k2.height(), k2.width()), (5, 5));
        assert!((k2.sum() - 1.0).abs() < 1e-5);
        assert!((k2.at(2, 2) - 36.0 / 256.0).abs() < 1e-6);
        assert!((k2.at(0, 0) - 1.0 / 256.0).abs() < 1e-7);
    }

    #[test]
    fn test_flip_rotates_180() {
        let k = sobel_x().flipped();
        assert_eq!(k.weights(), &[1.0, 0.0, -1.0, 2.0, 0.0, -2.0, 1.0, 0.0, -1.0]);
        assert_eq!(sobel_y().flipped().at(0, 1), 2.0);
    }
}
