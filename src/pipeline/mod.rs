//! Ordered, immutable transform pipelines.
//!
//! A [`Pipeline`] is built once from a list of [`OperationDescriptor`]s and
//! then applied to any number of buffers. Every descriptor is validated while
//! building, so applying a pipeline cannot fail.
//!
//! ```
//! use image_chain::{OperationDescriptor, Pipeline, PixelBuffer};
//!
//! let pipeline = Pipeline::build(vec![
//!     OperationDescriptor::new("box").with("width", 3).with("height", 3),
//!     OperationDescriptor::new("brightness").with("value", 1.0),
//! ])
//! .unwrap();
//!
//! let image = PixelBuffer::filled(3, 3, 3, 127).unwrap();
//! assert_eq!(pipeline.apply(image.clone()), image);
//! ```

pub mod descriptor;
pub mod factory;
pub mod stage;

pub use descriptor::{OperationDescriptor, ParamValue};
pub use factory::{OperationKind, StageFactory};
pub use stage::TransformStage;

use tracing::{debug, info};

use crate::buffer::PixelBuffer;
use crate::error::{EditError, EditResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    stages: Vec<TransformStage>,
}

impl Pipeline {
    /// Build every stage in order.
    ///
    /// # Errors
    /// [`EditError::EmptyPipeline`] for an empty list, otherwise the first
    /// failing descriptor wrapped in [`EditError::Operation`] with its index.
    #[tracing::instrument(skip_all)]
    pub fn build<I>(descriptors: I) -> EditResult<Self>
    where
        I: IntoIterator<Item = OperationDescriptor>,
    {
        let stages = descriptors
            .into_iter()
            .enumerate()
            .map(|(index, descriptor)| {
                StageFactory::create(descriptor).map_err(|source| EditError::Operation {
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<EditResult<Vec<_>>>()?;

        let pipeline = Self::from_stages(stages)?;
        info!(stages = pipeline.len(), ops = ?pipeline.describe(), "pipeline built");
        Ok(pipeline)
    }

    /// Parse a JSON array of descriptors and build from it.
    pub fn from_json(json: &str) -> EditResult<Self> {
        Self::build(OperationDescriptor::parse_list(json)?)
    }

    /// Wrap already constructed stages.
    pub fn from_stages(stages: Vec<TransformStage>) -> EditResult<Self> {
        if stages.is_empty() {
            return Err(EditError::EmptyPipeline);
        }
        Ok(Self { stages })
    }

    /// Run every stage, in order, on `image`.
    #[tracing::instrument(skip_all, fields(height = image.height(), width = image.width(), channels = image.channels()))]
    pub fn apply(&self, image: PixelBuffer) -> PixelBuffer {
        self.stages.iter().enumerate().fold(image, |image, (index, stage)| {
            debug!(index, stage = %stage, "applying stage");
            stage.apply(image)
        })
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false for a built pipeline.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stages(&self) -> &[TransformStage] {
        &self.stages
    }

    /// One line per stage with its effective parameters.
    pub fn describe(&self) -> Vec<String> {
        self.stages.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    fn box3() -> OperationDescriptor {
        OperationDescriptor::new("box").with("width", 3).with("height", 3)
    }

    fn brightness(v: f64) -> OperationDescriptor {
        OperationDescriptor::new("brightness").with("factor", v)
    }

    fn ramp() -> PixelBuffer {
        PixelBuffer::from_fn(5, 5, 3, |y, x, c| ((y * 5 + x) * 9 + c * 2) as u8).unwrap()
    }

    #[test]
    fn test_constant_image_survives_blur_and_identity_brightness() {
        let pipeline = Pipeline::build(vec![box3(), brightness(1.0)]).unwrap();
        let image = PixelBuffer::filled(3, 3, 3, 127).unwrap();
        assert_eq!(pipeline.apply(image.clone()), image);
    }

    #[test]
    fn test_order_matters() {
        let a = Pipeline::build(vec![box3(), brightness(1.8)]).unwrap();
        let b = Pipeline::build(vec![brightness(1.8), box3()]).unwrap();

        let image = PixelBuffer::from_fn(5, 5, 3, |y, x, _| if (x + y) % 2 == 0 { 200 } else { 20 }).unwrap();
        assert_ne!(a.apply(image.clone()), b.apply(image));
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let err = Pipeline::build(Vec::new()).unwrap_err();
        assert!(matches!(err, EditError::EmptyPipeline));
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(Pipeline::from_stages(vec![]).is_err());
    }

    #[test]
    fn test_error_reports_failing_index() {
        let err = Pipeline::build(vec![box3(), OperationDescriptor::new("glow"), brightness(0.0)]).unwrap_err();
        match &err {
            EditError::Operation { index, source } => {
                assert_eq!(*index, 1);
                assert!(matches!(**source, EditError::UnknownOperation(_)));
            }
            other => panic!("unexpected error {other}"),
        }
        assert!(err.to_string().starts_with("operation #1:"));
    }

    #[test]
    fn test_construction_error_category_survives_wrapping() {
        let err = Pipeline::build(vec![brightness(-2.0)]).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Construction);
    }

    #[test]
    fn test_describe_and_accessors() {
        let pipeline = Pipeline::from_json(
            r#"[{"type": "box", "width": 4, "height": 3}, {"type": "SOBEL"}, {"type": "contrast", "value": 2.5}]"#,
        )
        .unwrap();
        assert_eq!(pipeline.len(), 3);
        assert!(!pipeline.is_empty());
        assert_eq!(pipeline.stages()[1].name(), "sobel");
        assert_eq!(
            pipeline.describe(),
            vec!["box(width=5, height=3)", "sobel()", "contrast(factor=2.5)"]
        );
    }

    #[test]
    fn test_pipeline_is_reusable() {
        let pipeline = Pipeline::build(vec![box3(), brightness(0.5)]).unwrap();
        let first = pipeline.apply(ramp());
        let second = pipeline.apply(ramp());
        assert_eq!(first, second);
        assert_eq!(first.dim(), (5, 5, 3));
    }
}
