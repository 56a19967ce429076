use optics::fresnel::Polarization;
use optics::medium::Medium;
use optics::optics::OpticsModel;
use optics::powers::Powers;
use pyo3::prelude::*;

/// The medium catalog as (name, refractive index) pairs.
#[pyfunction]
fn media() -> Vec<(&'static str, f32)> {
    Medium::ALL
        .iter()
        .map(|medium| (medium.name(), medium.index()))
        .collect()
}

/// Look up a medium by name (case insensitive).
#[pyfunction]
fn medium(name: &str) -> PyResult<Medium> {
    name.parse::<Medium>()
        .map_err(|err| pyo3::exceptions::PyValueError::new_err(err.to_string()))
}

#[pymodule]
fn _optics_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(media, m)?)?;
    m.add_function(wrap_pyfunction!(medium, m)?)?;
    m.add_class::<Medium>()?;
    m.add_class::<Polarization>()?;
    m.add_class::<Powers>()?;
    m.add_class::<OpticsModel>()?;
    Ok(())
}
