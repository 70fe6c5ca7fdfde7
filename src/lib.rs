//! image-chain: declarative image editing pipelines.
//!
//! An ordered list of operation descriptors (box blur, sharpen, sobel,
//! brightness, contrast, saturation) is validated into an immutable
//! [`Pipeline`], which then transforms 8-bit [`PixelBuffer`]s.
//!
//! ## Image Format
//! - **Grayscale**: (height, width, 1)
//! - **RGB**: (height, width, 3)
//!
//! ## Layers
//! - [`filters`] - convolution engine, kernels and the individual stages
//! - [`pipeline`] - descriptors, stage factory and the pipeline itself
//! - [`config`] - JSON run configuration used by the `edit-image` binary
//!
//! Python bindings (PyO3) and WASM bindings are available behind the
//! `python` and `wasm` features.

pub mod buffer;
pub mod config;
pub mod error;
pub mod filters;
pub mod pipeline;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use buffer::PixelBuffer;
pub use config::RunConfig;
pub use error::{EditError, EditResult, ErrorCategory};
pub use pipeline::{OperationDescriptor, OperationKind, ParamValue, Pipeline, StageFactory, TransformStage};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::{EditError, Pipeline, PixelBuffer, StageFactory};

    fn to_py_err(err: EditError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    /// Apply a JSON list of operations to an image.
    ///
    /// # Arguments
    /// * `image` - u8 array of shape (height, width, channels), channels 1 or 3
    /// * `operations_json` - e.g. `[{"type": "box", "width": 3, "height": 3}]`
    ///
    /// # Returns
    /// A new u8 array of the same shape. Invalid operations raise `ValueError`.
    #[pyfunction]
    pub fn apply_operations<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        operations_json: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let pipeline = Pipeline::from_json(operations_json).map_err(to_py_err)?;
        let buffer = PixelBuffer::from_array(image.as_array().to_owned()).map_err(to_py_err)?;
        let result = py.allow_threads(|| pipeline.apply(buffer));
        Ok(result.into_array().into_pyarray(py))
    }

    /// Names of the supported operation types.
    #[pyfunction]
    pub fn supported_operations() -> Vec<&'static str> {
        StageFactory::supported_kinds()
    }

    #[pymodule]
    pub fn image_chain(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(apply_operations, m)?)?;
        m.add_function(wrap_pyfunction!(supported_operations, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::image_chain;
