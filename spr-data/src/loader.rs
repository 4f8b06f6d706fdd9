//! Spreadsheet and CSV loading for daily performance tables.
//!
//! Both readers expect a header row naming the `Date`, `PR` and `GHI`
//! columns (exact, case sensitive). Other columns are ignored. Row numbers
//! in errors are 1-based and count the header row, so they match what a
//! spreadsheet application shows.
//!
//! # Example CSV
//! ```text
//! Date,GHI,PR
//! 2019-07-01,3.256608333,69.57528653
//! 2019-07-02,3.976766667,79.31322121
//! ```

use crate::dataset::Dataset;
use crate::error::{DataError, Result};
use crate::performance::{DailyPerformance, DATE_COLUMN, GHI_COLUMN, PR_COLUMN};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::NaiveDate;
use log::debug;
use spr_utils::dates::parse_date_lenient;
use std::path::Path;

/// Default input file name.
pub const DEFAULT_INPUT: &str = "Assignment_Dataset.xlsx";

static EMPTY_CELL: Data = Data::Empty;

/// Supported input containers, chosen by file extension.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputFormat {
    Spreadsheet,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputFormat::Spreadsheet),
            "csv" => Ok(InputFormat::Csv),
            _ => Err(DataError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Positions of the required columns within a row.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    pr: usize,
    ghi: usize,
}

impl ColumnIndex {
    fn from_headers<'a, I>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<&str> = headers.into_iter().collect();
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|header| *header == name)
                .ok_or(DataError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            date: find(DATE_COLUMN)?,
            pr: find(PR_COLUMN)?,
            ghi: find(GHI_COLUMN)?,
        })
    }
}

/// Load a dataset, picking the reader from the file extension.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let days = match InputFormat::from_path(path)? {
        InputFormat::Spreadsheet => read_spreadsheet(path)?,
        InputFormat::Csv => read_csv(path)?,
    };
    Dataset::new(days)
}

/// Read the first worksheet of a workbook.
pub fn read_spreadsheet(path: &Path) -> Result<Vec<DailyPerformance>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DataError::NoWorksheet)??;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|cells| cells.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();
    let columns = ColumnIndex::from_headers(header.iter().map(String::as_str))?;

    let mut days = Vec::new();
    for (offset, cells) in rows.enumerate() {
        // header is row 1
        let row = offset + 2;
        if cells.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let cell = |index: usize| cells.get(index).unwrap_or(&EMPTY_CELL);
        days.push(DailyPerformance {
            date: cell_to_date(cell(columns.date), row)?,
            pr: cell_to_number(cell(columns.pr), row, PR_COLUMN)?,
            ghi: cell_to_number(cell(columns.ghi), row, GHI_COLUMN)?,
        });
    }
    debug!("read {} rows from {}", days.len(), path.display());
    Ok(days)
}

/// Read a CSV file with a header row.
pub fn read_csv(path: &Path) -> Result<Vec<DailyPerformance>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_path(path)?;
    let days = read_csv_records(rdr)?;
    debug!("read {} rows from {}", days.len(), path.display());
    Ok(days)
}

/// Parse CSV text with a header row.
pub fn parse_csv(csv_data: &str) -> Result<Vec<DailyPerformance>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(csv_data.as_bytes());
    read_csv_records(rdr)
}

fn read_csv_records<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Vec<DailyPerformance>> {
    let columns = ColumnIndex::from_headers(rdr.headers()?.iter())?;

    let mut days = Vec::new();
    for (offset, result) in rdr.records().enumerate() {
        let record = result?;
        let row = offset + 2;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let field = |index: usize| record.get(index).unwrap_or("");
        let date_text = field(columns.date);
        let date = parse_date_lenient(date_text).ok_or_else(|| DataError::InvalidDate {
            row,
            value: date_text.to_string(),
        })?;
        days.push(DailyPerformance {
            date,
            pr: text_to_number(field(columns.pr), row, PR_COLUMN)?,
            ghi: text_to_number(field(columns.ghi), row, GHI_COLUMN)?,
        });
    }
    Ok(days)
}

fn text_to_number(text: &str, row: usize, column: &'static str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| DataError::InvalidNumber {
            row,
            column,
            value: text.to_string(),
        })
}

fn cell_to_number(cell: &Data, row: usize, column: &'static str) -> Result<f64> {
    let value = match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => return text_to_number(s, row, column),
        _ => None,
    };
    value
        .filter(|value| value.is_finite())
        .ok_or_else(|| DataError::InvalidNumber {
            row,
            column,
            value: cell.to_string(),
        })
}

fn cell_to_date(cell: &Data, row: usize) -> Result<NaiveDate> {
    let date = match cell {
        Data::String(s) | Data::DateTimeIso(s) => parse_date_lenient(s),
        Data::Empty => None,
        other => other.as_date(),
    };
    date.ok_or_else(|| DataError::InvalidDate {
        row,
        value: cell.to_string(),
    })
}
