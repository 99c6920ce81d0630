use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use polars::prelude::*;
use rayon::prelude::*;

use crate::config::CensusColumns;
use crate::error::{IndicatorError, Result};
use crate::indicators;
use crate::ratio::IndicatorResult;

/// Every indicator the engine computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Indicator {
    Population,
    SexRatio,
    WorkingAgePopulation,
    YouthDependencyRatio,
    OldAgeDependencyRatio,
    SchoolAttendanceRate,
    AdultLiteracyRate,
    MeanYearsSchooling,
    OfwPer1kPeople,
}

impl Indicator {
    pub const ALL: [Indicator; 9] = [
        Indicator::Population,
        Indicator::SexRatio,
        Indicator::WorkingAgePopulation,
        Indicator::YouthDependencyRatio,
        Indicator::OldAgeDependencyRatio,
        Indicator::SchoolAttendanceRate,
        Indicator::AdultLiteracyRate,
        Indicator::MeanYearsSchooling,
        Indicator::OfwPer1kPeople,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Indicator::Population => "population",
            Indicator::SexRatio => "sex_ratio",
            Indicator::WorkingAgePopulation => "working_age_population",
            Indicator::YouthDependencyRatio => "youth_dependency_ratio",
            Indicator::OldAgeDependencyRatio => "old_age_dependency_ratio",
            Indicator::SchoolAttendanceRate => "school_attendance_rate",
            Indicator::AdultLiteracyRate => "adult_literacy_rate",
            Indicator::MeanYearsSchooling => "mean_years_schooling",
            Indicator::OfwPer1kPeople => "ofw_per_1k_people",
        }
    }

    /// Plain counts ignore the rounding precision.
    pub fn is_count(self) -> bool {
        matches!(self, Indicator::Population | Indicator::WorkingAgePopulation)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Indicator {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "literacy_rate" {
            return Ok(Indicator::AdultLiteracyRate);
        }
        Indicator::ALL
            .into_iter()
            .find(|indicator| indicator.name() == s)
            .ok_or_else(|| IndicatorError::UnknownIndicator(s.to_string()))
    }
}

/// Compute a single indicator.
pub fn compute(
    indicator: Indicator,
    df: &DataFrame,
    cols: &CensusColumns,
    places: u32,
) -> Result<IndicatorResult> {
    match indicator {
        Indicator::Population => indicators::population(df, cols),
        Indicator::SexRatio => indicators::sex_ratio(df, cols, places),
        Indicator::WorkingAgePopulation => indicators::working_age_population(df, cols),
        Indicator::YouthDependencyRatio => indicators::youth_dependency_ratio(df, cols, places),
        Indicator::OldAgeDependencyRatio => indicators::old_age_dependency_ratio(df, cols, places),
        Indicator::SchoolAttendanceRate => indicators::school_attendance_rate(df, cols, places),
        Indicator::AdultLiteracyRate => indicators::adult_literacy_rate(df, cols, places),
        Indicator::MeanYearsSchooling => indicators::mean_years_schooling(df, cols, places),
        Indicator::OfwPer1kPeople => indicators::ofw_per_1k_people(df, cols, places),
    }
}

/// Compute every indicator in parallel. Fails if any single one fails.
pub fn compute_all(
    df: &DataFrame,
    cols: &CensusColumns,
    places: u32,
) -> Result<BTreeMap<Indicator, IndicatorResult>> {
    Indicator::ALL
        .par_iter()
        .map(|&indicator| compute(indicator, df, cols, places).map(|r| (indicator, r)))
        .collect()
}

/// Wide frame: one row per area, one column per indicator (undefined → null).
pub fn results_to_frame(
    results: &BTreeMap<Indicator, IndicatorResult>,
    key_name: &str,
) -> Result<DataFrame> {
    let mut areas: Vec<&str> = results.values().flat_map(|r| r.areas()).collect();
    areas.sort_unstable();
    areas.dedup();

    let mut columns = vec![Column::new(key_name.into(), &areas)];
    for (indicator, result) in results {
        let values: Vec<Option<f64>> = areas
            .iter()
            .map(|area| result.get(area).and_then(|r| r.value()))
            .collect();
        columns.push(Column::new(indicator.name().into(), values));
    }

    Ok(DataFrame::new(columns)?)
}
