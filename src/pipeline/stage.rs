//! The closed set of transform stages.

use std::fmt;

use crate::buffer::PixelBuffer;
use crate::filters::{Brightness, BoxBlur, Contrast, Saturation, Sharpen, Sobel};

/// One validated, immutable transform.
///
/// Every variant was checked at construction time, so [`TransformStage::apply`]
/// cannot fail for a well-formed buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformStage {
    BoxBlur(BoxBlur),
    Sharpen(Sharpen),
    Sobel(Sobel),
    Brightness(Brightness),
    Contrast(Contrast),
    Saturation(Saturation),
}

impl TransformStage {
    /// Operation name as used in descriptors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BoxBlur(_) => "box",
            Self::Sharpen(_) => "sharpen",
            Self::Sobel(_) => "sobel",
            Self::Brightness(_) => "brightness",
            Self::Contrast(_) => "contrast",
            Self::Saturation(_) => "saturation",
        }
    }

    /// Consume `image` and return the transformed buffer.
    pub fn apply(&self, image: PixelBuffer) -> PixelBuffer {
        match self {
            Self::BoxBlur(stage) => stage.apply(image),
            Self::Sharpen(stage) => stage.apply(image),
            Self::Sobel(stage) => stage.apply(image),
            Self::Brightness(stage) => stage.apply(image),
            Self::Contrast(stage) => stage.apply(image),
            Self::Saturation(stage) => stage.apply(image),
        }
    }
}

impl fmt::Display for TransformStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoxBlur(s) => write!(f, "box(width={}, height={})", s.width(), s.height()),
            Self::Sharpen(s) => write!(f, "sharpen(amount={})", s.amount()),
            Self::Sobel(_) => write!(f, "sobel()"),
            Self::Brightness(s) => write!(f, "brightness(factor={})", s.factor()),
            Self::Contrast(s) => write!(f, "contrast(factor={})", s.factor()),
            Self::Saturation(s) => write!(f, "saturation(factor={})", s.factor()),
        }
    }
}

impl From<BoxBlur> for TransformStage {
    fn from(stage: BoxBlur) -> Self {
        Self::BoxBlur(stage)
    }
}

impl From<Sharpen> for TransformStage {
    fn from(stage: Sharpen) -> Self {
        Self::Sharpen(stage)
    }
}

impl From<Sobel> for TransformStage {
    fn from(stage: Sobel) -> Self {
        Self::Sobel(stage)
    }
}

impl From<Brightness> for TransformStage {
    fn from(stage: Brightness) -> Self {
        Self::Brightness(stage)
    }
}

impl From<Contrast> for TransformStage {
    fn from(stage: Contrast) -> Self {
        Self::Contrast(stage)
    }
}

impl From<Saturation> for TransformStage {
    fn from(stage: Saturation) -> Self {
        Self::Saturation(stage)
    }
}
