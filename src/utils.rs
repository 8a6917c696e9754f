//! utils — conversion helpers for the Python bindings.
//!
//! Accept numpy arrays, pandas Series (via `to_numpy`) or plain sequences and
//! turn them into contiguous readonly arrays for the correlation engine.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{
    Element,
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
fn extract_array<'py, T>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, expected: &str,
) -> PyResult<PyReadonlyArray1<'py, T>>
where
    T: Element + for<'a> FromPyObject<'a>,
{
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<T>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<T>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<T> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(format!(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of {expected}"
        ))
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    extract_array(py, raw_data, "float64")
}

#[cfg(feature = "python-bindings")]
pub fn extract_i64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, i64>> {
    extract_array(py, raw_data, "int64")
}

/// Borrow a readonly array as a contiguous slice.
#[cfg(feature = "python-bindings")]
pub fn contiguous<'a, 'py, T: Element>(
    arr: &'a PyReadonlyArray1<'py, T>, name: &str,
) -> PyResult<&'a [T]> {
    arr.as_slice()
        .map_err(|_| PyValueError::new_err(format!("{name} must be a 1-D contiguous array")))
}
