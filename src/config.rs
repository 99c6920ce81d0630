use polars::prelude::DataFrame;

use crate::error::{IndicatorError, Result};
use crate::schema::{columns, geography};

/// Names of the semantic columns the indicators read.
///
/// Defaults follow the census person-record layout (`P2`, `P3`, ...) grouped
/// by barangay PSGC. Override individual names with the `with_*` setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusColumns {
    /// Grouping key (area code) column.
    pub for_each: String,
    pub population: String,
    pub sex: String,
    pub age: String,
    pub attendance: String,
    pub literacy: String,
    pub attainment: String,
    pub ofw: String,
}

impl Default for CensusColumns {
    fn default() -> Self {
        Self {
            for_each: columns::BGY_PSGC.to_string(),
            population: columns::POPULATION.to_string(),
            sex: columns::SEX.to_string(),
            age: columns::AGE.to_string(),
            attendance: columns::ATTENDANCE.to_string(),
            literacy: columns::LITERACY.to_string(),
            attainment: columns::ATTAINMENT.to_string(),
            ofw: columns::OFW.to_string(),
        }
    }
}

impl CensusColumns {
    pub fn with_for_each(mut self, name: impl Into<String>) -> Self {
        self.for_each = name.into();
        self
    }

    pub fn with_population(mut self, name: impl Into<String>) -> Self {
        self.population = name.into();
        self
    }

    pub fn with_sex(mut self, name: impl Into<String>) -> Self {
        self.sex = name.into();
        self
    }

    pub fn with_age(mut self, name: impl Into<String>) -> Self {
        self.age = name.into();
        self
    }

    pub fn with_attendance(mut self, name: impl Into<String>) -> Self {
        self.attendance = name.into();
        self
    }

    pub fn with_literacy(mut self, name: impl Into<String>) -> Self {
        self.literacy = name.into();
        self
    }

    pub fn with_attainment(mut self, name: impl Into<String>) -> Self {
        self.attainment = name.into();
        self
    }

    pub fn with_ofw(mut self, name: impl Into<String>) -> Self {
        self.ofw = name.into();
        self
    }

    /// Check that the grouping column and every column in `needed` exist.
    pub fn validate(&self, df: &DataFrame, needed: &[&str]) -> Result<()> {
        require_columns(df, &[self.for_each.as_str()])?;
        require_columns(df, needed)
    }
}

/// Source columns and padding widths for deriving barangay PSGC codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsgcColumns {
    pub region: String,
    pub province: String,
    pub municipality: String,
    pub barangay: String,
    /// Zero-fill widths in region, province, municipality, barangay order.
    pub widths: [usize; 4],
}

impl Default for PsgcColumns {
    fn default() -> Self {
        Self {
            region: geography::REGION.to_string(),
            province: geography::PROVINCE.to_string(),
            municipality: geography::MUNICIPALITY.to_string(),
            barangay: geography::BARANGAY.to_string(),
            widths: geography::ZFILL_WIDTHS,
        }
    }
}

impl PsgcColumns {
    pub fn levels(&self) -> [&str; 4] {
        [
            self.region.as_str(),
            self.province.as_str(),
            self.municipality.as_str(),
            self.barangay.as_str(),
        ]
    }
}

pub(crate) fn require_columns(df: &DataFrame, required: &[&str]) -> Result<()> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(IndicatorError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn defaults_use_census_layout() {
        let cols = CensusColumns::default();
        assert_eq!(cols.for_each, "BGY_PSGC");
        assert_eq!(cols.population, "P2");
        assert_eq!(cols.age, "P5");
        assert_eq!(cols.ofw, "P15");
    }

    #[test]
    fn setters_override_single_names() {
        let cols = CensusColumns::default()
            .with_for_each("MUN_PSGC")
            .with_age("AGE");
        assert_eq!(cols.for_each, "MUN_PSGC");
        assert_eq!(cols.age, "AGE");
        assert_eq!(cols.sex, "P3");
    }

    #[test]
    fn validate_reports_first_missing_column() {
        let df = df!("BGY_PSGC" => ["A"], "P5" => [30i64]).unwrap();
        let cols = CensusColumns::default();

        assert!(cols.validate(&df, &["P5"]).is_ok());
        match cols.validate(&df, &["P5", "P3", "P10"]) {
            Err(IndicatorError::MissingColumn(name)) => assert_eq!(name, "P3"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn validate_checks_grouping_column() {
        let df = df!("P5" => [30i64]).unwrap();
        let err = CensusColumns::default().validate(&df, &[]).unwrap_err();
        assert!(matches!(err, IndicatorError::MissingColumn(name) if name == "BGY_PSGC"));
    }
}
