use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::tokenize::split_row;
use super::{Orientation, TableOptions, TabularError};

/// Integers up to this magnitude survive a round trip through `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// One scalar parsed from delimited text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// A number when `raw` is an unambiguous decimal literal, text otherwise.
    ///
    /// Hex, `inf`, `NaN` and the empty string all stay text.
    pub fn parse(raw: &str) -> Self {
        if number_literal().is_match(raw)
            && let Ok(number) = raw.parse::<f64>()
            && number.is_finite()
        {
            return Cell::Number(number);
        }
        Cell::Text(raw.to_string())
    }
}

impl From<&Cell> for Value {
    fn from(cell: &Cell) -> Self {
        match cell {
            Cell::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                Value::from(*n as i64)
            }
            Cell::Number(n) => serde_json::Number::from_f64(*n)
                .map_or_else(|| Value::String(n.to_string()), Value::Number),
            Cell::Text(s) => Value::String(s.clone()),
        }
    }
}

/// How a column is addressed in the rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKey {
    Name(String),
    Index(usize),
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Name(name) => write!(f, "{name}"),
            ColumnKey::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A rectangular grid of cells: every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<ColumnKey>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Shape the grid as records (row-major) or parallel arrays (column-major).
    ///
    /// With `simplify` set and exactly one column, either orientation yields
    /// a flat array of the column's cells.
    pub fn to_value(&self, orientation: Orientation, simplify: bool) -> Value {
        if simplify && self.columns.len() == 1 {
            return Value::Array(self.rows.iter().flatten().map(Value::from).collect());
        }

        match orientation {
            Orientation::Row => Value::Array(
                self.rows
                    .iter()
                    .map(|row| {
                        let record: Map<String, Value> = self
                            .columns
                            .iter()
                            .zip(row)
                            .map(|(key, cell)| (key.to_string(), Value::from(cell)))
                            .collect();
                        Value::Object(record)
                    })
                    .collect(),
            ),
            Orientation::Column => {
                let mut columns = Map::new();
                for (index, key) in self.columns.iter().enumerate() {
                    let cells = self
                        .rows
                        .iter()
                        .filter_map(|row| row.get(index))
                        .map(Value::from)
                        .collect();
                    columns.insert(key.to_string(), Value::Array(cells));
                }
                Value::Object(columns)
            }
        }
    }
}

/// Parse delimited text into a table.
///
/// Rows are separated by blank lines. The first row fixes the column count
/// and, with `has_headers`, names the columns instead of holding data. Any
/// row that fails to tokenize or has the wrong length fails the whole table.
pub fn parse_table(text: &str, options: &TableOptions) -> Result<Table, TabularError> {
    options.validate()?;

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return Err(TabularError::EmptyInput);
    }

    let rows: Vec<&str> = row_separator().split(normalized).collect();
    let header = rows
        .first()
        .and_then(|row| split_row(row, options.separator))
        .ok_or(TabularError::RowTokenizeFailure { row: 0 })?;

    let columns: Vec<ColumnKey> = if options.keys_from_headers() {
        header.into_iter().map(ColumnKey::Name).collect()
    } else {
        (0..header.len()).map(ColumnKey::Index).collect()
    };

    let data_start = usize::from(options.has_headers);
    let rows = rows
        .iter()
        .enumerate()
        .skip(data_start)
        .map(|(row, raw)| -> Result<Vec<Cell>, TabularError> {
            let fields = split_row(raw, options.separator)
                .ok_or(TabularError::RowTokenizeFailure { row })?;
            if fields.len() != columns.len() {
                return Err(TabularError::RowLengthMismatch {
                    row,
                    expected: columns.len(),
                    found: fields.len(),
                });
            }
            Ok(fields.iter().map(|field| Cell::parse(field)).collect())
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Table { columns, rows })
}

/// One or more blank lines
fn row_separator() -> &'static Regex {
    static ROW_SEPARATOR: OnceLock<Regex> = OnceLock::new();
    ROW_SEPARATOR.get_or_init(|| Regex::new(r"\n\s*\n").expect("Invalid row separator regex"))
}

fn number_literal() -> &'static Regex {
    static NUMBER_LITERAL: OnceLock<Regex> = OnceLock::new();
    NUMBER_LITERAL.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
            .expect("Invalid number literal regex")
    })
}
