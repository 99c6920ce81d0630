//! Years-of-schooling bands keyed on the highest-attainment code.
//!
//! Attainment codes are ordinal: the hundreds digit marks the level
//! (primary 1xx, secondary 2xx, tertiary 7xx) and the tens digit the
//! grade reached within it. Flat bands map a code range to a fixed number of
//! years; linear bands add one year per grade above the band start.

use std::ops::{Bound, RangeBounds};

use polars::prelude::*;

/// A half-open, open or closed interval of attainment codes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodeSpan {
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
}

impl CodeSpan {
    pub const fn exactly(code: f64) -> Self {
        Self {
            lower: Bound::Included(code),
            upper: Bound::Included(code),
        }
    }

    pub fn contains(&self, code: f64) -> bool {
        (self.lower, self.upper).contains(&code)
    }

    fn predicate(&self, code: Expr) -> Expr {
        let lower = match self.lower {
            Bound::Included(v) => code.clone().gt_eq(lit(v)),
            Bound::Excluded(v) => code.clone().gt(lit(v)),
            Bound::Unbounded => lit(true),
        };
        let upper = match self.upper {
            Bound::Included(v) => code.lt_eq(lit(v)),
            Bound::Excluded(v) => code.lt(lit(v)),
            Bound::Unbounded => lit(true),
        };
        lower.and(upper)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchoolingBand {
    /// Every code in `codes` counts as `years`.
    Flat { codes: CodeSpan, years: f64 },
    /// Codes in `[start, end)` count as `(code - start) / 10 + base_years`.
    Linear { start: f64, end: f64, base_years: f64 },
}

/// Bands in evaluation order. The spans are disjoint.
pub const SCHOOLING_BANDS: [SchoolingBand; 7] = [
    // some pre-primary
    SchoolingBand::Flat {
        codes: CodeSpan::exactly(10.0),
        years: 1.0,
    },
    // primary
    SchoolingBand::Linear {
        start: 110.0,
        end: 170.0,
        base_years: 1.0,
    },
    // special education
    SchoolingBand::Flat {
        codes: CodeSpan::exactly(190.0),
        years: 11.0,
    },
    // secondary
    SchoolingBand::Linear {
        start: 210.0,
        end: 250.0,
        base_years: 7.0,
    },
    // post-secondary non-degree
    SchoolingBand::Flat {
        codes: CodeSpan {
            lower: Bound::Excluded(250.0),
            upper: Bound::Included(700.0),
        },
        years: 11.0,
    },
    // tertiary
    SchoolingBand::Linear {
        start: 710.0,
        end: 750.0,
        base_years: 11.0,
    },
    // post-tertiary
    SchoolingBand::Flat {
        codes: CodeSpan {
            lower: Bound::Excluded(750.0),
            upper: Bound::Excluded(999.0),
        },
        years: 15.0,
    },
];

impl SchoolingBand {
    pub fn contains(&self, code: f64) -> bool {
        match *self {
            SchoolingBand::Flat { codes, .. } => codes.contains(code),
            SchoolingBand::Linear { start, end, .. } => (start..end).contains(&code),
        }
    }

    /// Years credited to `code`, if it falls in this band.
    pub fn years_for(&self, code: f64) -> Option<f64> {
        if !self.contains(code) {
            return None;
        }
        Some(match *self {
            SchoolingBand::Flat { years, .. } => years,
            SchoolingBand::Linear {
                start, base_years, ..
            } => (code - start) / 10.0 + base_years,
        })
    }

    fn predicate(&self, code: Expr) -> Expr {
        match *self {
            SchoolingBand::Flat { codes, .. } => codes.predicate(code),
            SchoolingBand::Linear { start, end, .. } => CodeSpan {
                lower: Bound::Included(start),
                upper: Bound::Excluded(end),
            }
            .predicate(code),
        }
    }

    fn years_expr(&self, code: Expr) -> Expr {
        match *self {
            SchoolingBand::Flat { years, .. } => lit(years),
            SchoolingBand::Linear {
                start, base_years, ..
            } => (code - lit(start)) / lit(10.0) + lit(base_years),
        }
    }
}

/// Years of schooling for a single attainment code; 0 outside every band.
pub fn years_of_schooling(code: f64) -> f64 {
    SCHOOLING_BANDS
        .iter()
        .find_map(|band| band.years_for(code))
        .unwrap_or(0.0)
}

/// Per-row years of schooling for a numeric attainment expression.
///
/// Rows outside every band (or with a null code) evaluate to 0.
pub fn years_of_schooling_expr(code: Expr) -> Expr {
    SCHOOLING_BANDS
        .iter()
        .rev()
        .fold(lit(0.0), |otherwise, band| {
            when(band.predicate(code.clone()))
                .then(band.years_expr(code.clone()))
                .otherwise(otherwise)
        })
}
