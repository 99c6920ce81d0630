use std::collections::BTreeMap;

use pyo3::prelude::*;
use pyo3::types::PyModule;
use pyo3_polars::PyDataFrame;

use crate::config::{CensusColumns, PsgcColumns};
use crate::indicators;
use crate::psgc;
use crate::ratio::IndicatorResult;
use crate::schema::{columns, geography, DEFAULT_PLACES};

type PyIndicator = PyResult<BTreeMap<String, Option<f64>>>;

fn to_py(result: IndicatorResult) -> BTreeMap<String, Option<f64>> {
    result.into_iter().map(|(k, v)| (k, v.value())).collect()
}

fn grouped_by(for_each: &str) -> CensusColumns {
    CensusColumns::default().with_for_each(for_each)
}

#[pyfunction]
#[pyo3(signature = (df, for_each=columns::BGY_PSGC, col_to_count=columns::POPULATION))]
fn population(df: PyDataFrame, for_each: &str, col_to_count: &str) -> PyIndicator {
    let cols = grouped_by(for_each).with_population(col_to_count);
    Ok(to_py(indicators::population(&df.0, &cols)?))
}

#[pyfunction]
#[pyo3(signature = (df, for_each=columns::BGY_PSGC, sex=columns::SEX, places=DEFAULT_PLACES))]
fn sex_ratio(df: PyDataFrame, for_each: &str, sex: &str, places: u32) -> PyIndicator {
    let cols = grouped_by(for_each).with_sex(sex);
    Ok(to_py(indicators::sex_ratio(&df.0, &cols, places)?))
}

#[pyfunction]
#[pyo3(signature = (df, for_each=columns::BGY_PSGC, age=columns::AGE))]
fn working_age_population(df: PyDataFrame, for_each: &str, age: &str) -> PyIndicator {
    let cols = grouped_by(for_each).with_age(age);
    Ok(to_py(indicators::working_age_population(&df.0, &cols)?))
}

#[pyfunction]
#[pyo3(signature = (df, for_each=columns::BGY_PSGC, age=columns::AGE, places=DEFAULT_PLACES))]
fn youth_dependency_ratio(df: PyDataFrame, for_each: &str, age: &str, places: u32) -> PyIndicator {
    let cols = grouped_by(for_each).with_age(age);
    Ok(to_py(indicators::youth_dependency_ratio(&df.0, &cols, places)?))
}

#[pyfunction]
#[pyo3(signature = (df, for_each=columns::BGY_PSGC, age=columns::AGE, places=DEFAULT_PLACES))]
fn old_age_dependency_ratio(
    df: PyDataFrame,
    for_each: &str,
    age: &str,
    places: u32,
) -> PyIndicator {
    let cols = grouped_by(for_each).with_age(age);
    Ok(to_py(indicators::old_age_dependency_ratio(&df.0, &cols, places)?))
}

#[pyfunction]
#[pyo3(signature = (
    df,
    for_each=columns::BGY_PSGC,
    age=columns::AGE,
    attendance=columns::ATTENDANCE,
    places=DEFAULT_PLACES,
))]
fn school_attendance_rate(
    df: PyDataFrame,
    for_each: &str,
    age: &str,
    attendance: &str,
    places: u32,
) -> PyIndicator {
    let cols = grouped_by(for_each).with_age(age).with_attendance(attendance);
    Ok(to_py(indicators::school_attendance_rate(&df.0, &cols, places)?))
}

#[pyfunction]
#[pyo3(signature = (
    df,
    for_each=columns::BGY_PSGC,
    age=columns::AGE,
    literacy=columns::LITERACY,
    places=DEFAULT_PLACES,
))]
fn adult_literacy_rate(
    df: PyDataFrame,
    for_each: &str,
    age: &str,
    literacy: &str,
    places: u32,
) -> PyIndicator {
    let cols = grouped_by(for_each).with_age(age).with_literacy(literacy);
    Ok(to_py(indicators::adult_literacy_rate(&df.0, &cols, places)?))
}

#[pyfunction]
#[pyo3(signature = (
    df,
    for_each=columns::BGY_PSGC,
    age=columns::AGE,
    literacy=columns::LITERACY,
    places=DEFAULT_PLACES,
))]
fn literacy_rate(
    df: PyDataFrame,
    for_each: &str,
    age: &str,
    literacy: &str,
    places: u32,
) -> PyIndicator {
    adult_literacy_rate(df, for_each, age, literacy, places)
}

#[pyfunction]
#[pyo3(signature = (
    df,
    for_each=columns::BGY_PSGC,
    age=columns::AGE,
    attainment=columns::ATTAINMENT,
    places=DEFAULT_PLACES,
))]
fn mean_years_schooling(
    df: PyDataFrame,
    for_each: &str,
    age: &str,
    attainment: &str,
    places: u32,
) -> PyIndicator {
    let cols = grouped_by(for_each).with_age(age).with_attainment(attainment);
    Ok(to_py(indicators::mean_years_schooling(&df.0, &cols, places)?))
}

#[pyfunction]
#[pyo3(signature = (
    df,
    for_each=columns::BGY_PSGC,
    ofw=columns::OFW,
    col_to_count=columns::POPULATION,
    places=DEFAULT_PLACES,
))]
fn ofw_per_1k_people(
    df: PyDataFrame,
    for_each: &str,
    ofw: &str,
    col_to_count: &str,
    places: u32,
) -> PyIndicator {
    let cols = grouped_by(for_each).with_ofw(ofw).with_population(col_to_count);
    Ok(to_py(indicators::ofw_per_1k_people(&df.0, &cols, places)?))
}

/// Add the derived barangay PSGC column to a frame.
#[pyfunction]
#[pyo3(signature = (
    df,
    reg=geography::REGION,
    prv=geography::PROVINCE,
    mun=geography::MUNICIPALITY,
    bgy=geography::BARANGAY,
    zfill_widths=geography::ZFILL_WIDTHS,
    name=columns::BGY_PSGC,
))]
fn get_brgy_psgc(
    df: PyDataFrame,
    reg: &str,
    prv: &str,
    mun: &str,
    bgy: &str,
    zfill_widths: [usize; 4],
    name: &str,
) -> PyResult<PyDataFrame> {
    let cols = PsgcColumns {
        region: reg.to_string(),
        province: prv.to_string(),
        municipality: mun.to_string(),
        barangay: bgy.to_string(),
        widths: zfill_widths,
    };
    Ok(PyDataFrame(psgc::with_brgy_psgc(&df.0, &cols, name)?))
}

/// Export default column names as a Python submodule.
fn add_column_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let cols = PyModule::new(m.py(), "columns")?;
    cols.add("BGY_PSGC", columns::BGY_PSGC)?;
    cols.add("POPULATION", columns::POPULATION)?;
    cols.add("SEX", columns::SEX)?;
    cols.add("AGE", columns::AGE)?;
    cols.add("ATTENDANCE", columns::ATTENDANCE)?;
    cols.add("LITERACY", columns::LITERACY)?;
    cols.add("ATTAINMENT", columns::ATTAINMENT)?;
    cols.add("OFW", columns::OFW)?;
    cols.add("REGION", geography::REGION)?;
    cols.add("PROVINCE", geography::PROVINCE)?;
    cols.add("MUNICIPALITY", geography::MUNICIPALITY)?;
    cols.add("BARANGAY", geography::BARANGAY)?;
    m.add_submodule(&cols)?;
    Ok(())
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(population, m)?)?;
    m.add_function(wrap_pyfunction!(sex_ratio, m)?)?;
    m.add_function(wrap_pyfunction!(working_age_population, m)?)?;
    m.add_function(wrap_pyfunction!(youth_dependency_ratio, m)?)?;
    m.add_function(wrap_pyfunction!(old_age_dependency_ratio, m)?)?;
    m.add_function(wrap_pyfunction!(school_attendance_rate, m)?)?;
    m.add_function(wrap_pyfunction!(adult_literacy_rate, m)?)?;
    m.add_function(wrap_pyfunction!(literacy_rate, m)?)?;
    m.add_function(wrap_pyfunction!(mean_years_schooling, m)?)?;
    m.add_function(wrap_pyfunction!(ofw_per_1k_people, m)?)?;
    m.add_function(wrap_pyfunction!(get_brgy_psgc, m)?)?;
    m.add("DEFAULT_PLACES", DEFAULT_PLACES)?;
    add_column_exports(m)?;
    Ok(())
}
