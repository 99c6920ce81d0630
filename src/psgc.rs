use polars::prelude::*;

use crate::config::{require_columns, PsgcColumns};
use crate::error::Result;
use crate::schema::{columns, geography};

/// Format one barangay PSGC: `PH` followed by each part left-padded with
/// zeros to its width. Over-width parts are kept whole; nothing is validated.
pub fn brgy_psgc(
    region: &str,
    province: &str,
    municipality: &str,
    barangay: &str,
    widths: [usize; 4],
) -> String {
    let mut code = String::from(geography::PSGC_PREFIX);
    for (part, width) in [region, province, municipality, barangay].into_iter().zip(widths) {
        code.push_str(&format!("{part:0>width$}"));
    }
    code
}

/// Derive the barangay PSGC for every row.
///
/// Level columns of any dtype are cast to strings first. A null in any
/// level gives a null code for that row.
pub fn get_brgy_psgc(df: &DataFrame, cols: &PsgcColumns) -> Result<Column> {
    let levels = cols.levels();
    require_columns(df, &levels)?;
    tracing::debug!(rows = df.height(), ?levels, "deriving barangay psgc");

    let parts = levels
        .iter()
        .map(|name| {
            df.column(name)?
                .as_materialized_series()
                .cast(&DataType::String)
        })
        .collect::<PolarsResult<Vec<Series>>>()?;
    let parts = parts
        .iter()
        .map(|s| s.str())
        .collect::<PolarsResult<Vec<&StringChunked>>>()?;

    let codes: Vec<Option<String>> = (0..df.height())
        .map(|i| {
            Some(brgy_psgc(
                parts[0].get(i)?,
                parts[1].get(i)?,
                parts[2].get(i)?,
                parts[3].get(i)?,
                cols.widths,
            ))
        })
        .collect();

    Ok(Column::new(columns::BGY_PSGC.into(), codes))
}

/// Return `df` with the derived PSGC added (or replaced) as `name`.
pub fn with_brgy_psgc(df: &DataFrame, cols: &PsgcColumns, name: &str) -> Result<DataFrame> {
    let mut psgc = get_brgy_psgc(df, cols)?;
    psgc.rename(name.into());

    let mut out = df.clone();
    out.with_column(psgc)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_each_level() {
        assert_eq!(brgy_psgc("1", "4", "23", "5", [2, 2, 2, 3]), "PH010423005");
    }

    #[test]
    fn keeps_over_width_parts() {
        assert_eq!(brgy_psgc("123", "4", "5", "6789", [2, 2, 2, 3]), "PH12304056789");
    }

    #[test]
    fn derives_column_from_integer_levels() {
        let df = df!(
            "REG" => [1i64, 13],
            "PRV" => [4i64, 74],
            "MUN" => [23i64, 1],
            "BGY" => [5i64, 120],
        )
        .unwrap();

        let psgc = get_brgy_psgc(&df, &PsgcColumns::default()).unwrap();
        let psgc = psgc.str().unwrap();
        assert_eq!(psgc.get(0), Some("PH010423005"));
        assert_eq!(psgc.get(1), Some("PH137401120"));
    }

    #[test]
    fn null_level_gives_null_code() {
        let df = df!(
            "REG" => [Some("1"), None],
            "PRV" => ["4", "4"],
            "MUN" => ["23", "23"],
            "BGY" => ["5", "5"],
        )
        .unwrap();

        let psgc = get_brgy_psgc(&df, &PsgcColumns::default()).unwrap();
        assert_eq!(psgc.null_count(), 1);
    }

    #[test]
    fn with_brgy_psgc_appends_named_column() {
        let df = df!("REG" => [1i64], "PRV" => [4i64], "MUN" => [23i64], "BGY" => [5i64]).unwrap();
        let out = with_brgy_psgc(&df, &PsgcColumns::default(), "AREA").unwrap();

        assert_eq!(out.width(), 5);
        assert_eq!(out.column("AREA").unwrap().str().unwrap().get(0), Some("PH010423005"));
    }

    #[test]
    fn missing_level_fails() {
        let df = df!("REG" => [1i64]).unwrap();
        assert!(get_brgy_psgc(&df, &PsgcColumns::default()).is_err());
    }
}
