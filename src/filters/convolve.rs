//! Spatial convolution with edge-replicated borders.
//!
//! The kernel is rotated 180 degrees before the sliding-window sum, so this is
//! true convolution rather than cross-correlation. The distinction only shows
//! for asymmetric kernels such as Sobel.
//!
//! Each channel is convolved independently; channels never mix. Accumulation
//! is f32 regardless of the sample type, and only [`apply_kernel`] rounds and
//! clips back to 8 bits.
//!
//! Output rows are computed in parallel with rayon. The padded plane is fully
//! built before any worker starts and is only read afterwards; every worker
//! owns a disjoint output row.

use rayon::prelude::*;

use super::core::Kernel;
use crate::buffer::PixelBuffer;

/// Extend a row-major plane by `pad_h` rows and `pad_w` columns on every side,
/// repeating the nearest edge sample outward.
pub fn pad_edge(plane: &[f32], height: usize, width: usize, pad_h: usize, pad_w: usize) -> Vec<f32> {
    let padded_w = width + 2 * pad_w;
    let padded_h = height + 2 * pad_h;
    let mut padded = Vec::with_capacity(padded_h * padded_w);

    for py in 0..padded_h {
        let sy = py.saturating_sub(pad_h).min(height - 1);
        let row = &plane[sy * width..(sy + 1) * width];
        for px in 0..padded_w {
            let sx = px.saturating_sub(pad_w).min(width - 1);
            padded.push(row[sx]);
        }
    }

    padded
}

/// Convolve a single row-major plane, returning unclipped f32 results of the
/// same size.
pub fn convolve_plane(plane: &[f32], height: usize, width: usize, kernel: &Kernel) -> Vec<f32> {
    let (kh, kw) = (kernel.height(), kernel.width());
    let pad_h = kh / 2;
    let pad_w = kw / 2;

    let padded = pad_edge(plane, height, width, pad_h, pad_w);
    let padded_w = width + 2 * pad_w;
    let flipped = kernel.flipped();

    let mut output = vec![0.0f32; height * width];
    output
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let mut sum = 0.0f32;
                for ky in 0..kh {
                    let base = (y + ky) * padded_w + x;
                    let window = &padded[base..base + kw];
                    for (kx, &v) in window.iter().enumerate() {
                        sum += v * flipped.at(ky, kx);
                    }
                }
                *out = sum;
            }
        });

    output
}

/// Convolve every channel of `image` and return the unclipped per-channel
/// planes.
pub fn convolve_planes(image: &PixelBuffer, kernel: &Kernel) -> Vec<Vec<f32>> {
    let (height, width, channels) = image.dim();
    (0..channels)
        .map(|c| convolve_plane(&image.plane_f32(c), height, width, kernel))
        .collect()
}

/// Convolve `image` with `kernel`, producing an image of identical shape.
///
/// Results are rounded to nearest and clipped to `[0, 255]`.
pub fn apply_kernel(image: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let planes = convolve_planes(image, kernel);
    PixelBuffer::from_planes_f32(image.height(), image.width(), &planes)
}
