use crate::error::ConvertError;
use crate::process::{date_parser, utils};
use crate::schema::{Column, ColumnType, Layout};
use std::fmt;
use tracing::trace;

/// One typed value of a converted record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Already normalized to `DD/MM/YYYY`.
    Date(String),
    Text(String),
    Numeric(f64),
}

/// CSV text form: dates and strings as-is, floats via [`format_float`].
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Date(s) | FieldValue::Text(s) => f.write_str(s),
            FieldValue::Numeric(v) => f.write_str(&format_float(*v)),
        }
    }
}

/// Shortest round-trip form, keeping `.0` on integral values (`61.1`, `100.0`).
///
/// Exponents carry an explicit sign and at least two digits (`1e+20`,
/// `1e-07`); non-finite values are `nan`, `inf` and `-inf`.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let s = format!("{:?}", v);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}

pub type Record = Vec<FieldValue>;

/// What a `string` column accepts once its padding is trimmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StringRule {
    /// Fields are single tokens; any whitespace left after trimming is an error.
    #[default]
    SingleToken,
    AllowInnerWhitespace,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub string_rule: StringRule,
}

/// Converts raw fixed-width lines against a borrowed layout.
#[derive(Debug, Clone, Copy)]
pub struct LineConverter<'a> {
    columns: &'a [Column],
    expected_len: usize,
    options: ConvertOptions,
}

impl<'a> LineConverter<'a> {
    pub fn new(layout: &'a Layout, options: ConvertOptions) -> Self {
        Self {
            columns: layout.columns(),
            expected_len: layout.total_width(),
            options,
        }
    }

    pub fn expected_len(&self) -> usize {
        self.expected_len
    }

    /// Convert one line. Trailing `\r`/`\n` are ignored; every other character
    /// counts towards the length check.
    pub fn convert(&self, line: &str) -> Result<Record, ConvertError> {
        convert_with(line, self.columns, self.expected_len, &self.options)
    }
}

/// Convert `line` with the default options (single-token string fields).
///
/// `expected_len` is normally the sum of the column sizes; it is checked
/// against both the line and the columns.
pub fn convert_line(
    line: &str,
    columns: &[Column],
    expected_len: usize,
) -> Result<Record, ConvertError> {
    convert_with(line, columns, expected_len, &ConvertOptions::default())
}

pub fn convert_with(
    line: &str,
    columns: &[Column],
    expected_len: usize,
    options: &ConvertOptions,
) -> Result<Record, ConvertError> {
    let line = utils::strip_line_terminator(line);
    let actual = line.chars().count();
    if actual != expected_len {
        return Err(ConvertError::LineLength {
            expected: expected_len,
            actual,
        });
    }

    // columns may not come from `parse_layout`, so their total is unchecked
    let width = columns
        .iter()
        .try_fold(0usize, |acc, c| acc.checked_add(c.size));
    if width != Some(expected_len) {
        return Err(ConvertError::LineLength {
            expected: width.unwrap_or(usize::MAX),
            actual,
        });
    }

    let slices = utils::split_fixed(line, columns.iter().map(|c| c.size)).ok_or(
        ConvertError::LineLength {
            expected: expected_len,
            actual,
        },
    )?;

    let mut out = Vec::with_capacity(columns.len());
    for (col, raw) in columns.iter().zip(slices) {
        let value = convert_field(col, raw, options)?;
        trace!(column = %col.name, raw, value = ?value, "Converted field");
        out.push(value);
    }
    Ok(out)
}

fn convert_field(
    col: &Column,
    raw: &str,
    options: &ConvertOptions,
) -> Result<FieldValue, ConvertError> {
    let cleaned = utils::clean_str(raw);
    match col.ty {
        ColumnType::Date => date_parser::reformat_date(cleaned)
            .map(FieldValue::Date)
            .ok_or_else(|| ConvertError::DateFormat {
                column: col.name.clone(),
                value: raw.to_owned(),
            }),

        ColumnType::String => {
            if options.string_rule == StringRule::SingleToken
                && cleaned.chars().any(char::is_whitespace)
            {
                return Err(ConvertError::FieldFormat {
                    column: col.name.clone(),
                    value: raw.to_owned(),
                });
            }
            Ok(FieldValue::Text(cleaned.to_owned()))
        }

        ColumnType::Numeric => cleaned
            .parse::<f64>()
            .map(FieldValue::Numeric)
            .map_err(|_| ConvertError::NumericFormat {
                column: col.name.clone(),
                value: raw.to_owned(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse_layout;

    const META: &str = "Birth date,10,date\nFirst name,15,string\nLast name,15,string\nWeight,5,numeric\n";

    fn layout() -> Layout {
        parse_layout(META).unwrap()
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_convert_line_correct_line() {
        let layout = layout();
        let out = convert_line(
            "1975-01-31Jane           Doe             61.1",
            layout.columns(),
            45,
        )
        .unwrap();
        assert_eq!(
            out,
            vec![
                FieldValue::Date("31/01/1975".into()),
                text("Jane"),
                text("Doe"),
                FieldValue::Numeric(61.1),
            ]
        );
    }

    #[test]
    fn test_convert_line_special_characters() {
        let layout = layout();
        let out = convert_line(
            "1975-01-31Janeé@!$&π     Doeφ¥           61.1",
            layout.columns(),
            45,
        )
        .unwrap();
        assert_eq!(out.len(), layout.len());
        assert_eq!(out[1], text("Janeé@!$&π"));
        assert_eq!(out[2], text("Doeφ¥"));
    }

    #[test]
    fn test_convert_line_date_format_issue() {
        let layout = layout();
        let err = convert_line(
            "195-01-310Jane           Doe             61.1",
            layout.columns(),
            45,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConvertError::DateFormat {
                column: "Birth date".into(),
                value: "195-01-310".into(),
            }
        );
    }

    #[test]
    fn test_convert_line_numeric_issue() {
        let layout = layout();
        let err = convert_line(
            "1975-01-31Jane           Doe            61.1r",
            layout.columns(),
            45,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::NumericFormat { ref column, .. } if column == "Weight"));
    }

    #[test]
    fn test_convert_line_space_inside_field() {
        let layout = layout();
        let err = convert_line(
            "1975-01-31Ja ne          Doe             61.1",
            layout.columns(),
            45,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::FieldFormat { ref column, .. } if column == "First name"));
    }

    #[test]
    fn test_convert_line_space_allowed_when_configured() {
        let layout = layout();
        let conv = LineConverter::new(
            &layout,
            ConvertOptions {
                string_rule: StringRule::AllowInnerWhitespace,
            },
        );
        let out = conv
            .convert("1975-01-31Ja ne          Doe             61.1")
            .unwrap();
        assert_eq!(out[1], text("Ja ne"));
    }

    #[test]
    fn test_convert_line_comma_inside_string_field() {
        let layout = layout();
        let out = convert_line(
            "1975-01-31Ja,ne          Doe             61.1",
            layout.columns(),
            45,
        )
        .unwrap();
        assert_eq!(out[1], text("Ja,ne"));
        assert_eq!(out[3], FieldValue::Numeric(61.1));
    }

    #[test]
    fn test_convert_line_line_length() {
        let layout = layout();
        let good = "1975-01-31Jane           Doe             61.1";
        let longer = format!("{} ", good);
        let shorter = &good[..44];

        for line in [longer.as_str(), shorter] {
            let err = convert_line(line, layout.columns(), 45).unwrap_err();
            assert_eq!(
                err,
                ConvertError::LineLength {
                    expected: 45,
                    actual: line.chars().count(),
                }
            );
        }
    }

    #[test]
    fn test_convert_line_ignores_line_terminator() {
        let layout = layout();
        let out = convert_line(
            "1975-01-31Jane           Doe             61.1\r\n",
            layout.columns(),
            45,
        )
        .unwrap();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_convert_line_expected_len_disagrees_with_columns() {
        let layout = layout();
        let err = convert_line("1975-01-31Jane", layout.columns(), 14).unwrap_err();
        assert_eq!(
            err,
            ConvertError::LineLength {
                expected: 45,
                actual: 14,
            }
        );
    }

    #[test]
    fn test_convert_line_idempotent() {
        let layout = layout();
        let conv = LineConverter::new(&layout, ConvertOptions::default());
        let line = "1988-11-28Bob            Big            102.4";
        assert_eq!(conv.convert(line).unwrap(), conv.convert(line).unwrap());
    }

    #[test]
    fn test_convert_line_empty_numeric() {
        let layout = layout();
        let err = convert_line(
            "1975-01-31Jane           Doe                 ",
            layout.columns(),
            45,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::NumericFormat { .. }));
    }

    #[test]
    fn test_convert_line_columns_width_overflow() {
        let columns = vec![
            Column {
                name: "a".into(),
                size: usize::MAX,
                ty: ColumnType::String,
            },
            Column {
                name: "b".into(),
                size: 1,
                ty: ColumnType::String,
            },
        ];
        let err = convert_line("x", &columns, 1).unwrap_err();
        assert_eq!(
            err,
            ConvertError::LineLength {
                expected: usize::MAX,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1e20), "1e+20");
        assert_eq!(format_float(1.5e300), "1.5e+300");
        assert_eq!(format_float(1e-7), "1e-07");
        assert_eq!(format_float(-2.5e-10), "-2.5e-10");
        assert_eq!(format_float(1e15), "1000000000000000.0");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_convert_line_non_finite_numeric() {
        let columns = vec![Column {
            name: "Weight".into(),
            size: 5,
            ty: ColumnType::Numeric,
        }];
        let out = convert_line("  nan", &columns, 5).unwrap();
        assert_eq!(out[0].to_string(), "nan");
        let out = convert_line("-inf ", &columns, 5).unwrap();
        assert_eq!(out[0].to_string(), "-inf");
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Numeric(61.1).to_string(), "61.1");
        assert_eq!(FieldValue::Numeric(100.0).to_string(), "100.0");
        assert_eq!(FieldValue::Date("31/01/1975".into()).to_string(), "31/01/1975");
    }
}
