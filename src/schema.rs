/// Column-name and code constants for census microdata extracts.
/// Single source of truth - exported to Python via PyO3.

// ── Person-record columns ───────────────────────────────────────────────────
pub mod columns {
    pub const BGY_PSGC: &str = "BGY_PSGC";
    pub const POPULATION: &str = "P2";
    pub const SEX: &str = "P3";
    pub const AGE: &str = "P5";
    pub const ATTENDANCE: &str = "P10";
    pub const LITERACY: &str = "P11";
    pub const ATTAINMENT: &str = "P12";
    pub const OFW: &str = "P15";
}

// ── Geographic level columns ────────────────────────────────────────────────
pub mod geography {
    pub const REGION: &str = "REG";
    pub const PROVINCE: &str = "PRV";
    pub const MUNICIPALITY: &str = "MUN";
    pub const BARANGAY: &str = "BGY";

    /// Zero-padding widths for region, province, municipality, barangay.
    pub const ZFILL_WIDTHS: [usize; 4] = [2, 2, 2, 3];
    pub const PSGC_PREFIX: &str = "PH";
}

// ── Coded values ────────────────────────────────────────────────────────────
pub mod codes {
    pub const MALE: i64 = 1;
    pub const FEMALE: i64 = 2;
    /// Shared "yes" code for attendance, literacy and OFW status.
    pub const YES: i64 = 1;
}

// ── Age brackets (whole years, inclusive) ───────────────────────────────────
pub mod ages {
    pub const WORKING_MIN: i64 = 15;
    pub const WORKING_MAX: i64 = 64;
    pub const SCHOOL_MIN: i64 = 5;
    pub const SCHOOL_MAX: i64 = 24;
    /// Rows older than this are counted as reading age.
    pub const READING_ABOVE: i64 = 4;
    /// Rows older than this are counted as graduate age.
    pub const GRADUATE_ABOVE: i64 = 24;
}

/// Default rounding precision for ratio indicators.
pub const DEFAULT_PLACES: u32 = 3;

// ── Internal result column names ────────────────────────────────────────────
pub(crate) mod internal {
    pub const AREA: &str = "__area";
    pub const VALUE: &str = "__value";
}
