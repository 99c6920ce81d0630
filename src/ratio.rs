use std::collections::BTreeMap;
use std::fmt;

use polars::prelude::*;

use crate::error::Result;

/// Numeric indicator value, or an explicit marker for an undefined ratio
/// (zero or absent denominator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Value(f64),
    Undefined,
}

impl Ratio {
    /// `numerator / denominator * scale`. Undefined when the denominator is 0.
    pub fn scaled(numerator: f64, denominator: f64, scale: f64) -> Self {
        if denominator == 0.0 {
            Ratio::Undefined
        } else {
            Ratio::Value(numerator / denominator * scale)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(v),
            Ratio::Undefined => None,
        }
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, Ratio::Undefined)
    }

    /// Round to `places` decimals, ties to even.
    pub fn round(self, places: u32) -> Self {
        match self {
            Ratio::Value(v) => Ratio::Value(round_to(v, places)),
            Ratio::Undefined => Ratio::Undefined,
        }
    }
}

impl From<Ratio> for Option<f64> {
    fn from(ratio: Ratio) -> Self {
        ratio.value()
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Value(v) => write!(f, "{v}"),
            Ratio::Undefined => write!(f, "undefined"),
        }
    }
}

pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / factor
}

/// Per-area indicator values keyed by area code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorResult {
    values: BTreeMap<String, Ratio>,
}

impl IndicatorResult {
    pub fn get(&self, area: &str) -> Option<Ratio> {
        self.values.get(area).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn areas(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Ratio)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Only the areas with a defined value.
    pub fn defined(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values
            .iter()
            .filter_map(|(k, v)| v.value().map(|v| (k.as_str(), v)))
    }

    pub fn round(&self, places: u32) -> Self {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.round(places)))
            .collect()
    }

    pub fn into_inner(self) -> BTreeMap<String, Ratio> {
        self.values
    }

    /// Two-column frame: area code and value (undefined → null).
    pub fn to_frame(&self, key_name: &str, value_name: &str) -> Result<DataFrame> {
        let keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        let vals: Vec<Option<f64>> = self.values.values().map(|v| v.value()).collect();

        let df = DataFrame::new(vec![
            Column::new(key_name.into(), keys),
            Column::new(value_name.into(), vals),
        ])?;
        Ok(df)
    }
}

impl FromIterator<(String, Ratio)> for IndicatorResult {
    fn from_iter<I: IntoIterator<Item = (String, Ratio)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for IndicatorResult {
    type Item = (String, Ratio);
    type IntoIter = std::collections::btree_map::IntoIter<String, Ratio>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_denominator_is_undefined() {
        assert_eq!(Ratio::scaled(3.0, 0.0, 100.0), Ratio::Undefined);
        assert_eq!(Ratio::scaled(0.0, 4.0, 100.0), Ratio::Value(0.0));
        assert_eq!(Ratio::scaled(1.0, 4.0, 1000.0), Ratio::Value(250.0));
    }

    #[test]
    fn rounding_is_idempotent() {
        for v in [66.666_666_6, 100.0 / 3.0, 12.345_5, 0.000_4, 1234.567_89] {
            for places in 0..6 {
                let once = Ratio::Value(v).round(places);
                assert_eq!(once.round(places), once);
            }
        }
        assert_eq!(Ratio::Undefined.round(3), Ratio::Undefined);
    }

    #[test]
    fn round_uses_requested_precision() {
        assert_eq!(Ratio::Value(200.0 / 3.0).round(3), Ratio::Value(66.667));
        assert_eq!(Ratio::Value(200.0 / 3.0).round(0), Ratio::Value(67.0));
    }

    #[test]
    fn to_frame_maps_undefined_to_null() {
        let result: IndicatorResult = vec![
            ("A".to_string(), Ratio::Value(1.5)),
            ("B".to_string(), Ratio::Undefined),
        ]
        .into_iter()
        .collect();

        let df = result.to_frame("BGY_PSGC", "sex_ratio").unwrap();
        assert_eq!(df.height(), 2);
        let values = df.column("sex_ratio").unwrap().f64().unwrap();
        assert_eq!(values.get(0), Some(1.5));
        assert_eq!(values.get(1), None);
    }
}
