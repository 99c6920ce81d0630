//! Fixed catalog of per-area census indicators.
//!
//! Every function validates the columns it reads, counts with
//! [`count_per_area`] and combines the counts into an [`IndicatorResult`].

use std::collections::BTreeSet;

use polars::prelude::*;
use tracing::debug;

use crate::config::CensusColumns;
use crate::counter::{code, count_per_area, sum_per_area, AreaCounts};
use crate::error::Result;
use crate::ratio::{IndicatorResult, Ratio};
use crate::schema::{ages, codes};
use crate::schooling::years_of_schooling_expr;

const PERCENT: f64 = 100.0;
const PER_THOUSAND: f64 = 1_000.0;

/// Count of the population column per area.
pub fn population(df: &DataFrame, cols: &CensusColumns) -> Result<IndicatorResult> {
    cols.validate(df, &[cols.population.as_str()])?;
    debug!(indicator = "population", rows = df.height());

    let counts = count_per_area(df, &cols.for_each, Some(cols.population.as_str()), None)?;
    Ok(as_values(&counts))
}

/// Males per 100 females.
pub fn sex_ratio(df: &DataFrame, cols: &CensusColumns, places: u32) -> Result<IndicatorResult> {
    cols.validate(df, &[cols.sex.as_str()])?;
    debug!(indicator = "sex_ratio", rows = df.height());

    let is_male = code(&cols.sex).eq(lit(codes::MALE));
    let is_female = code(&cols.sex).eq(lit(codes::FEMALE));

    let males = count_per_area(df, &cols.for_each, Some(cols.sex.as_str()), Some(is_male))?;
    let females = count_per_area(df, &cols.for_each, Some(cols.sex.as_str()), Some(is_female))?;

    Ok(ratio(&males, &females, PERCENT, places))
}

/// Count of rows aged 15 to 64 inclusive.
pub fn working_age_population(df: &DataFrame, cols: &CensusColumns) -> Result<IndicatorResult> {
    cols.validate(df, &[cols.age.as_str()])?;
    debug!(indicator = "working_age_population", rows = df.height());

    Ok(as_values(&count_working_age(df, cols)?))
}

/// Under-15s per 100 of working age.
pub fn youth_dependency_ratio(
    df: &DataFrame,
    cols: &CensusColumns,
    places: u32,
) -> Result<IndicatorResult> {
    cols.validate(df, &[cols.age.as_str()])?;
    debug!(indicator = "youth_dependency_ratio", rows = df.height());

    let is_youth = code(&cols.age).lt(lit(ages::WORKING_MIN));
    let youth = count_per_area(df, &cols.for_each, Some(cols.age.as_str()), Some(is_youth))?;
    let working_age = count_working_age(df, cols)?;

    Ok(ratio(&youth, &working_age, PERCENT, places))
}

/// Over-64s per 100 of working age.
pub fn old_age_dependency_ratio(
    df: &DataFrame,
    cols: &CensusColumns,
    places: u32,
) -> Result<IndicatorResult> {
    cols.validate(df, &[cols.age.as_str()])?;
    debug!(indicator = "old_age_dependency_ratio", rows = df.height());

    let is_old_age = code(&cols.age).gt(lit(ages::WORKING_MAX));
    let old_age = count_per_area(df, &cols.for_each, Some(cols.age.as_str()), Some(is_old_age))?;
    let working_age = count_working_age(df, cols)?;

    Ok(ratio(&old_age, &working_age, PERCENT, places))
}

/// Percentage of 5 to 24 year olds currently attending school.
pub fn school_attendance_rate(
    df: &DataFrame,
    cols: &CensusColumns,
    places: u32,
) -> Result<IndicatorResult> {
    cols.validate(df, &[cols.age.as_str(), cols.attendance.as_str()])?;
    debug!(indicator = "school_attendance_rate", rows = df.height());

    let is_school_age = between(&cols.age, ages::SCHOOL_MIN, ages::SCHOOL_MAX);
    let is_attending = code(&cols.attendance).eq(lit(codes::YES));

    let attending = count_per_area(
        df,
        &cols.for_each,
        Some(cols.age.as_str()),
        Some(is_attending.and(is_school_age.clone())),
    )?;
    let school_age = count_per_area(df, &cols.for_each, Some(cols.age.as_str()), Some(is_school_age))?;

    Ok(ratio(&attending, &school_age, PERCENT, places))
}

/// Percentage of the reading-age (5+) population that is literate.
pub fn adult_literacy_rate(
    df: &DataFrame,
    cols: &CensusColumns,
    places: u32,
) -> Result<IndicatorResult> {
    cols.validate(df, &[cols.age.as_str(), cols.literacy.as_str()])?;
    debug!(indicator = "adult_literacy_rate", rows = df.height());

    let is_reading_age = code(&cols.age).gt(lit(ages::READING_ABOVE));
    let is_literate = code(&cols.literacy).eq(lit(codes::YES));

    let literate = count_per_area(
        df,
        &cols.for_each,
        Some(cols.age.as_str()),
        Some(is_literate.and(is_reading_age.clone())),
    )?;
    let reading_age = count_per_area(df, &cols.for_each, Some(cols.age.as_str()), Some(is_reading_age))?;

    Ok(ratio(&literate, &reading_age, PERCENT, places))
}

/// Same as [`adult_literacy_rate`].
pub fn literacy_rate(df: &DataFrame, cols: &CensusColumns, places: u32) -> Result<IndicatorResult> {
    adult_literacy_rate(df, cols, places)
}

/// Average years of schooling of the graduate-age (25+) population.
///
/// Attainment codes outside every schooling band add no years but the row
/// still counts towards the denominator.
pub fn mean_years_schooling(
    df: &DataFrame,
    cols: &CensusColumns,
    places: u32,
) -> Result<IndicatorResult> {
    cols.validate(df, &[cols.age.as_str(), cols.attainment.as_str()])?;
    debug!(indicator = "mean_years_schooling", rows = df.height());

    let is_graduate_age = code(&cols.age).gt(lit(ages::GRADUATE_ABOVE));

    let years = sum_per_area(
        df,
        &cols.for_each,
        years_of_schooling_expr(code(&cols.attainment)),
        Some(is_graduate_age.clone()),
    )?;
    let graduate_age =
        count_per_area(df, &cols.for_each, Some(cols.age.as_str()), Some(is_graduate_age))?;

    Ok(graduate_age
        .iter()
        .map(|(area, &count)| {
            let total = years.get(area).copied().unwrap_or(0.0);
            (area.clone(), Ratio::scaled(total, count as f64, 1.0).round(places))
        })
        .collect())
}

/// Overseas Filipino workers per 1,000 people.
pub fn ofw_per_1k_people(
    df: &DataFrame,
    cols: &CensusColumns,
    places: u32,
) -> Result<IndicatorResult> {
    cols.validate(df, &[cols.ofw.as_str(), cols.population.as_str()])?;
    debug!(indicator = "ofw_per_1k_people", rows = df.height());

    let is_ofw = code(&cols.ofw).eq(lit(codes::YES));
    let ofw = count_per_area(df, &cols.for_each, Some(cols.ofw.as_str()), Some(is_ofw))?;
    let people = count_per_area(df, &cols.for_each, Some(cols.population.as_str()), None)?;

    Ok(ratio(&ofw, &people, PER_THOUSAND, places))
}

// ── Private helpers ─────────────────────────────────────────────────────────

fn count_working_age(df: &DataFrame, cols: &CensusColumns) -> Result<AreaCounts> {
    let is_working_age = between(&cols.age, ages::WORKING_MIN, ages::WORKING_MAX);
    count_per_area(df, &cols.for_each, Some(cols.age.as_str()), Some(is_working_age))
}

/// Inclusive on both ends.
fn between(column: &str, low: i64, high: i64) -> Expr {
    code(column)
        .gt_eq(lit(low))
        .and(code(column).lt_eq(lit(high)))
}

fn as_values(counts: &AreaCounts) -> IndicatorResult {
    counts
        .iter()
        .map(|(area, &count)| (area.clone(), Ratio::Value(count as f64)))
        .collect()
}

/// Combine two count maps over the union of their areas. A missing
/// numerator counts as zero; a missing denominator leaves the area undefined.
fn ratio(
    numerator: &AreaCounts,
    denominator: &AreaCounts,
    scale: f64,
    places: u32,
) -> IndicatorResult {
    let areas: BTreeSet<&String> = numerator.keys().chain(denominator.keys()).collect();

    areas
        .into_iter()
        .map(|area| {
            let num = numerator.get(area).copied().unwrap_or(0) as f64;
            let den = denominator.get(area).copied().unwrap_or(0) as f64;
            (area.clone(), Ratio::scaled(num, den, scale).round(places))
        })
        .collect()
}
