use std::collections::BTreeMap;

use polars::prelude::*;

use crate::config::require_columns;
use crate::error::Result;
use crate::schema::internal;

/// Count per area code, ordered by area.
pub type AreaCounts = BTreeMap<String, u64>;

/// Count rows (or non-null values of `col_to_count`) per distinct value of
/// `for_each`.
///
/// Rows failing `condition` are dropped before grouping, so areas with no
/// matching rows are absent from the result rather than zero. Rows with a
/// null area code are never counted.
pub fn count_per_area(
    df: &DataFrame,
    for_each: &str,
    col_to_count: Option<&str>,
    condition: Option<Expr>,
) -> Result<AreaCounts> {
    let counted = match col_to_count {
        Some(name) => {
            require_columns(df, &[name])?;
            col(name).count()
        }
        // Null keys are filtered out first, so this is the row count.
        None => col(internal::AREA).count(),
    };

    let grouped = group_per_area(df, for_each, counted.cast(DataType::UInt64), condition)?;

    let keys = grouped.column(internal::AREA)?.as_materialized_series().str()?;
    let counts = grouped
        .column(internal::VALUE)?
        .as_materialized_series()
        .u64()?;

    let mut out = AreaCounts::new();
    for (key, count) in keys.into_iter().zip(counts.into_iter()) {
        if let (Some(key), Some(count)) = (key, count) {
            out.insert(key.to_string(), count);
        }
    }
    Ok(out)
}

/// Sum a per-row expression per area code. Null values add nothing.
pub fn sum_per_area(
    df: &DataFrame,
    for_each: &str,
    value: Expr,
    condition: Option<Expr>,
) -> Result<BTreeMap<String, f64>> {
    let summed = value.cast(DataType::Float64).sum();
    let grouped = group_per_area(df, for_each, summed.cast(DataType::Float64), condition)?;

    let keys = grouped.column(internal::AREA)?.as_materialized_series().str()?;
    let sums = grouped
        .column(internal::VALUE)?
        .as_materialized_series()
        .f64()?;

    let mut out = BTreeMap::new();
    for (key, sum) in keys.into_iter().zip(sums.into_iter()) {
        if let Some(key) = key {
            out.insert(key.to_string(), sum.unwrap_or(0.0));
        }
    }
    Ok(out)
}

fn group_per_area(
    df: &DataFrame,
    for_each: &str,
    agg: Expr,
    condition: Option<Expr>,
) -> Result<DataFrame> {
    require_columns(df, &[for_each])?;

    let mut lazy = df
        .clone()
        .lazy()
        .filter(col(for_each).is_not_null());

    if let Some(condition) = condition {
        lazy = lazy.filter(condition);
    }

    let grouped = lazy
        .with_columns([col(for_each).cast(DataType::String).alias(internal::AREA)])
        .group_by([col(internal::AREA)])
        .agg([agg.alias(internal::VALUE)])
        .collect()?;

    tracing::trace!(for_each, groups = grouped.height(), "grouped per area");
    Ok(grouped)
}

/// `column` compared numerically: non-numeric values become null.
pub(crate) fn code(column: &str) -> Expr {
    col(column).cast(DataType::Float64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "BGY_PSGC" => [Some("A"), Some("A"), Some("A"), Some("B"), Some("B"), None],
            "P2" => [Some(1i64), Some(2), None, Some(1), Some(2), Some(3)],
            "P3" => [1i64, 2, 2, 1, 1, 2],
        )
        .unwrap()
    }

    #[test]
    fn counts_rows_without_value_column() {
        let counts = count_per_area(&sample(), "BGY_PSGC", None, None).unwrap();
        assert_eq!(counts.get("A"), Some(&3));
        assert_eq!(counts.get("B"), Some(&2));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn skips_nulls_in_counted_column() {
        let counts = count_per_area(&sample(), "BGY_PSGC", Some("P2"), None).unwrap();
        assert_eq!(counts.get("A"), Some(&2));
        assert_eq!(counts.get("B"), Some(&2));
    }

    #[test]
    fn condition_filters_before_grouping() {
        let females = code("P3").eq(lit(2));
        let counts = count_per_area(&sample(), "BGY_PSGC", Some("P3"), Some(females)).unwrap();
        assert_eq!(counts.get("A"), Some(&2));
        // no zero-fill
        assert!(!counts.contains_key("B"));
    }

    #[test]
    fn numeric_keys_are_stringified() {
        let df = df!("AREA" => [10i64, 10, 20], "P5" => [1i64, 2, 3]).unwrap();
        let counts = count_per_area(&df, "AREA", Some("P5"), None).unwrap();
        assert_eq!(counts.get("10"), Some(&2));
        assert_eq!(counts.get("20"), Some(&1));
    }

    #[test]
    fn sums_per_area() {
        let sums = sum_per_area(&sample(), "BGY_PSGC", col("P2"), None).unwrap();
        assert_eq!(sums.get("A"), Some(&3.0));
        assert_eq!(sums.get("B"), Some(&3.0));
    }

    #[test]
    fn missing_column_fails_fast() {
        assert!(count_per_area(&sample(), "MISSING", None, None).is_err());
        assert!(count_per_area(&sample(), "BGY_PSGC", Some("P99"), None).is_err());
    }
}
