//! photolooks
//!
//! Ten creative "looks" rendered from a single photo, built from a small
//! set of primitive image operations.
//!
//! ## Image Format
//! Every operation works on RGB float images:
//! - **Shape**: (height, width, 3) as `ndarray::Array3<f32>`
//! - **Range**: 0.0-1.0; looks clamp their output back into range
//!
//! Two steps (equalize, posterize) go through an explicit 8-bit round trip,
//! see [`filters::grayscale`].
//!
//! ## Layout
//! - [`filters`]: primitive operations
//! - [`params`]: the baked-in parameter table
//! - [`looks`]: the ten pipelines
//! - [`driver`]: runs every look over one image and saves the results
//! - [`io`]: decoding and JPEG encoding
//!
//! Optional bindings: Python via PyO3 (`python` feature) and JavaScript
//! via wasm-bindgen (`wasm` feature).

use ndarray::{Array3, ArrayView3};

pub mod driver;
pub mod error;
pub mod filters;
pub mod io;
pub mod looks;
pub mod params;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use driver::{Driver, FilterOutcome, FilterResult, ImageSink, JpegSink, RunConfig, RunSummary, Schedule};
pub use error::{FilterError, Result};
pub use looks::FilterKind;
pub use params::{FilterParams, ParameterTable};

/// Render the look called `name` with its built-in parameters.
///
/// Entry point shared by the Python and WebAssembly bindings.
pub fn apply_look(name: &str, image: ArrayView3<f32>) -> Result<Array3<f32>> {
    let kind: FilterKind = name.parse()?;
    looks::apply_from_table(kind, image, &ParameterTable::builtin())
}

/// Names of every look, in pipeline order.
pub fn look_names() -> Vec<&'static str> {
    FilterKind::ALL.iter().map(|k| k.name()).collect()
}

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::grayscale::{f32_to_u8, u8_to_f32};
    use crate::FilterError;

    fn to_py_err(e: FilterError) -> PyErr {
        PyValueError::new_err(e.to_string())
    }

    // ========================================================================
    // Looks
    // ========================================================================

    /// Render a look on an RGB float image (height, width, 3), values 0.0-1.0.
    #[pyfunction]
    pub fn apply_look<'py>(
        py: Python<'py>,
        name: &str,
        image: PyReadonlyArray3<'py, f32>,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let result = crate::apply_look(name, image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Render a look on an RGB u8 image (height, width, 3).
    #[pyfunction]
    pub fn apply_look_u8<'py>(
        py: Python<'py>,
        name: &str,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = u8_to_f32(image.as_array());
        let result = crate::apply_look(name, input.view()).map_err(to_py_err)?;
        Ok(f32_to_u8(result.view()).into_pyarray(py))
    }

    /// Names of every look, in pipeline order.
    #[pyfunction]
    pub fn look_names() -> Vec<&'static str> {
        crate::look_names()
    }

    /// photolooks extension module
    #[pymodule]
    pub fn photolooks(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(apply_look, m)?)?;
        m.add_function(wrap_pyfunction!(apply_look_u8, m)?)?;
        m.add_function(wrap_pyfunction!(look_names, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::photolooks;
