//! Filter modules for image processing effects.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//!
//! ## Architecture
//!
//! - **Convolution engine** ([`convolve`]) - edge-replicated true convolution,
//!   one channel at a time, f32 accumulation, rows computed with rayon
//! - **Kernels** ([`core`]) - odd-sized kernel type and generators
//! - **Stages** - each filter exposes a validated stage struct whose
//!   constructor checks parameters and whose `apply` cannot fail
//!
//! ## Filter Categories
//!
//! - **Spatial**: box blur, sharpen (unsharp mask), sobel
//! - **Pixel-wise**: brightness, contrast, saturation

pub mod blur;
pub mod color_adjust;
pub mod convolve;
pub mod core;
pub mod edge;
pub mod grayscale;
pub mod sharpen;

pub use blur::BoxBlur;
pub use color_adjust::{Brightness, Contrast, Saturation};
pub use convolve::apply_kernel;
pub use self::core::Kernel;
pub use edge::Sobel;
pub use sharpen::Sharpen;
