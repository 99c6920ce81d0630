use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Unknown indicator: {0}")]
    UnknownIndicator(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, IndicatorError>;

#[cfg(feature = "python")]
impl From<IndicatorError> for pyo3::PyErr {
    fn from(err: IndicatorError) -> pyo3::PyErr {
        pyo3::exceptions::PyRuntimeError::new_err(err.to_string())
    }
}
