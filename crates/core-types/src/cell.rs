use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single value in a `Table` column.
///
/// Columns are loosely typed: a `Price` column read from an external source may hold
/// numbers, numeric text, junk text or gaps side by side. The operations that need a
/// concrete type coerce on read (see `to_numeric` and `as_timestamp`).
///
/// The `#[serde(untagged)]` attribute maps JSON scalars straight onto the variants, so
/// `[101.5, null, "n/a", "2024-03-01T00:00:00"]` is a valid column. Variant order matters:
/// integers are tried before floats and timestamps before free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl Cell {
    /// Coerces the cell to a number, returning `None` for anything that is not one.
    ///
    /// NaN counts as missing. Text is trimmed and parsed as a float; infinities survive.
    pub fn to_numeric(&self) -> Option<f64> {
        let value = match self {
            Cell::Float(v) => *v,
            Cell::Int(v) => *v as f64,
            Cell::Bool(b) => f64::from(u8::from(*b)),
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Null | Cell::Timestamp(_) => return None,
        };
        (!value.is_nan()).then_some(value)
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// A short name for the variant, used in type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Cell::Null => "null",
            Cell::Bool(_) => "bool",
            Cell::Int(_) => "integer",
            Cell::Float(_) => "float",
            Cell::Timestamp(_) => "timestamp",
            Cell::Text(_) => "text",
        }
    }

    /// Converts date-like text into a timestamp.
    ///
    /// Accepts `YYYY-MM-DD` (midnight), ISO date-times with a `T` or a space separator,
    /// and RFC 3339 strings with an offset (normalized to UTC). Text that matches none of
    /// these becomes `Null`; non-text cells are returned unchanged.
    pub fn parse_timestamp(&self) -> Cell {
        let Cell::Text(raw) = self else {
            return self.clone();
        };
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Cell::Timestamp(dt.naive_utc());
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Cell::Timestamp(ts);
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map_or(Cell::Null, Cell::Timestamp)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::Timestamp(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn numeric_coercion_treats_junk_as_missing() {
        assert_eq!(Cell::Float(1.5).to_numeric(), Some(1.5));
        assert_eq!(Cell::Int(7).to_numeric(), Some(7.0));
        assert_eq!(Cell::Bool(true).to_numeric(), Some(1.0));
        assert_eq!(Cell::from(" 42.25 ").to_numeric(), Some(42.25));
        assert_eq!(Cell::from("n/a").to_numeric(), None);
        assert_eq!(Cell::from("NaN").to_numeric(), None);
        assert_eq!(Cell::Float(f64::NAN).to_numeric(), None);
        assert_eq!(Cell::Null.to_numeric(), None);
        assert_eq!(Cell::Timestamp(ts("2024-01-01 00:00:00")).to_numeric(), None);
        assert_eq!(Cell::from("inf").to_numeric(), Some(f64::INFINITY));
    }

    #[test]
    fn parses_common_date_formats() {
        let midnight = ts("2024-03-05 00:00:00");
        assert_eq!(Cell::from("2024-03-05").parse_timestamp(), Cell::Timestamp(midnight));
        assert_eq!(
            Cell::from("2024-03-05T12:30:00").parse_timestamp(),
            Cell::Timestamp(ts("2024-03-05 12:30:00"))
        );
        assert_eq!(
            Cell::from("2024-03-05 12:30:00").parse_timestamp(),
            Cell::Timestamp(ts("2024-03-05 12:30:00"))
        );
        assert_eq!(
            Cell::from("2024-03-05T12:30:00+02:00").parse_timestamp(),
            Cell::Timestamp(ts("2024-03-05 10:30:00"))
        );
        assert_eq!(Cell::from("next tuesday").parse_timestamp(), Cell::Null);
        assert_eq!(Cell::Int(3).parse_timestamp(), Cell::Int(3));
    }

    #[test]
    fn untagged_json_picks_the_narrowest_variant() {
        let cells: Vec<Cell> =
            serde_json::from_str(r#"[null, true, 3, 3.5, "2024-01-02T00:00:00", "oil shock"]"#)
                .unwrap();
        assert_eq!(
            cells,
            vec![
                Cell::Null,
                Cell::Bool(true),
                Cell::Int(3),
                Cell::Float(3.5),
                Cell::Timestamp(ts("2024-01-02 00:00:00")),
                Cell::from("oil shock"),
            ]
        );
    }
}
