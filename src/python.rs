//! src/python.rs
//!
//! Python-bindings (feature `python`), module `_native`.

use crate::{
    config::ConfigError,
    grasp::Grasp,
    instance::{Instance, InstanceError},
    params::{ConstructionMethod, Params, SearchMethod},
};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

fn instance_err(e: InstanceError) -> PyErr {
    match e {
        InstanceError::Io(io) => PyIOError::new_err(io.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn config_err(e: ConfigError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python-binding voor één GRASP-run.
/// Geeft `(waarde, haalbaar, geselecteerde indices)` terug.
#[pyfunction]
#[pyo3(signature = (
    instance_path,
    alpha = 0.1,
    max_iterations = 1_000,
    time_limit = 1_800.0,
    construction = "standard",
    search = "first_improving",
    seed = None,
))]
#[allow(clippy::too_many_arguments)]
fn solve_py(
    py: Python<'_>,
    instance_path: String,
    alpha: f64,
    max_iterations: usize,
    time_limit: f64,
    construction: &str,
    search: &str,
    seed: Option<u64>,
) -> PyResult<(f64, bool, Vec<usize>)> {
    let instance = Instance::from_path(&instance_path).map_err(instance_err)?;
    let construction: ConstructionMethod = construction.parse().map_err(config_err)?;
    let search: SearchMethod = search.parse().map_err(config_err)?;

    let mut params = Params::new(alpha, max_iterations, time_limit, construction, search);
    params.seed = seed;
    let mut grasp = Grasp::new(params).map_err(config_err)?;

    // De zoektocht raakt geen Python-objecten aan.
    let outcome = py.allow_threads(|| grasp.run(&instance));
    let feasible = instance.is_feasible(&outcome.best.solution);
    Ok((outcome.best.value, feasible, outcome.best.solution.to_indices()))
}

/// Helperfunctie om een instantie te parsen en `(sets, universumgrootte)` terug te geven.
#[pyfunction]
fn parse_instance_py(instance_path: String) -> PyResult<(usize, usize)> {
    let instance = Instance::from_path(&instance_path).map_err(instance_err)?;
    Ok((instance.num_sets(), instance.universe_size()))
}

/// Definieert de Python-module `_native`.
#[pymodule]
fn _native(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(solve_py, m)?)?;
    m.add_function(wrap_pyfunction!(parse_instance_py, m)?)?;
    Ok(())
}
