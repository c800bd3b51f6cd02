//! PyO3 bindings for the `shoteval` engine.
//!
//! Notes
//! - Keep bindings thin and predictable; robots cross the boundary as plain
//!   tuples so gameplay scripts need no wrapper classes.
//! - Evaluation stays in Rust; Python only assembles the frame.

use pyo3::prelude::*;

mod common;
mod shot;

#[pymodule]
fn shoteval_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", shoteval::VERSION)?;
    shot::register(m)?;
    Ok(())
}
