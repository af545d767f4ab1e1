use std::{
    fmt,
    io::{self, BufRead},
    num::ParseFloatError,
};

use minefield_core::{MineRecord, ValidationError};
use minefield_field::Field;

const FIELDS_PER_RECORD: usize = 3;

/// Column of an input record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RecordField {
    /// First column, the horizontal coordinate.
    X,
    /// Second column, the vertical coordinate.
    Y,
    /// Third column, the explosive power.
    Power,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X coord"),
            Self::Y => write!(f, "Y coord"),
            Self::Power => write!(f, "power"),
        }
    }
}

/// Errors raised while turning text lines into records.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ParseError {
    /// A line did not contain exactly three fields.
    #[error("line {line_number} '{line}' does not have 3 fields: {found}")]
    FieldCount {
        /// One-based line number.
        line_number: usize,
        /// Offending line content.
        line: String,
        /// Number of whitespace-separated fields found.
        found: usize,
    },
    /// A field could not be parsed as a float.
    #[error("line {line_number} '{line}' invalid float for {field}: '{value}'")]
    InvalidFloat {
        /// One-based line number.
        line_number: usize,
        /// Offending line content.
        line: String,
        /// Column that failed to parse.
        field: RecordField,
        /// Raw text of the column.
        value: String,
        /// Underlying float parsing failure.
        #[source]
        source: ParseFloatError,
    },
    /// A field parsed but does not fit in a single-precision float.
    #[error("line {line_number} '{line}' {field} out of range: '{value}'")]
    OutOfRange {
        /// One-based line number.
        line_number: usize,
        /// Offending line content.
        line: String,
        /// Column that overflowed.
        field: RecordField,
        /// Raw text of the column.
        value: String,
    },
    /// The input could not be read.
    #[error("cannot read input")]
    Io(#[from] io::Error),
}

/// Errors raised while loading a field from text input.
#[derive(Debug, thiserror::Error)]
pub(crate) enum LoadError {
    /// A line was malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A record described an invalid mine.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The input contained no records at all.
    #[error("input contains no mines")]
    Empty,
}

/// Reads every line of the input as an `X Y power` record.
///
/// Parsing stops at the first malformed line.
pub(crate) fn parse_records<R: BufRead>(reader: R) -> Result<Vec<MineRecord>, ParseError> {
    let mut records = Vec::new();
    for (offset, line) in reader.lines().enumerate() {
        let line = line?;
        records.push(parse_line(offset + 1, &line)?);
    }
    Ok(records)
}

fn parse_line(line_number: usize, line: &str) -> Result<MineRecord, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != FIELDS_PER_RECORD {
        return Err(ParseError::FieldCount {
            line_number,
            line: line.to_owned(),
            found: fields.len(),
        });
    }

    let parse = |field: RecordField, value: &str| {
        let parsed = value
            .parse::<f32>()
            .map_err(|source| ParseError::InvalidFloat {
                line_number,
                line: line.to_owned(),
                field,
                value: value.to_owned(),
                source,
            })?;
        if parsed.is_finite() || spells_non_finite(value) {
            Ok(parsed)
        } else {
            Err(ParseError::OutOfRange {
                line_number,
                line: line.to_owned(),
                field,
                value: value.to_owned(),
            })
        }
    };

    Ok(MineRecord::new(
        parse(RecordField::X, fields[0])?,
        parse(RecordField::Y, fields[1])?,
        parse(RecordField::Power, fields[2])?,
    ))
}

// Overflowing literals parse to infinity; only explicit spellings may.
fn spells_non_finite(value: &str) -> bool {
    let unsigned = value.strip_prefix(&['+', '-'][..]).unwrap_or(value);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|spelling| unsigned.eq_ignore_ascii_case(spelling))
}

/// Parses the input and loads every record into a new field.
///
/// Identifiers follow line order starting at one. No field is returned
/// unless every line parses and every mine validates.
pub(crate) fn load_field<R: BufRead>(reader: R) -> Result<Field, LoadError> {
    let records = parse_records(reader)?;
    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(Field::from_records(records)?)
}
