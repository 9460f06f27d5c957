//! Flat CSV exchange format for ledger rows
//!
//! Columns are fixed and ordered year, balances, flows, derived figures.
//! Numbers are written with `f64`'s `Display`, which round-trips exactly and
//! never switches to exponent notation. Non-finite values become empty cells.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use super::rows::YearRow;
use crate::error::LoadError;

/// Header row, in column order
pub const CSV_HEADERS: [&str; 16] = [
    "Year",
    "Start Total NW",
    "Start Accessible NW",
    "Work Income",
    "Expenses",
    "Savings",
    "Restricted Savings",
    "Accessible Savings",
    "Growth Total",
    "Growth Accessible",
    "Withdrawal Needed",
    "End Total NW",
    "End Accessible NW",
    "Capital Income Total",
    "Capital Income Accessible",
    "Coast FIRE Number",
];

/// Write rows as CSV to any writer
pub fn write_rows_csv<W: Write>(writer: W, rows: &[YearRow]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;

    for row in rows {
        let mut record = Vec::with_capacity(CSV_HEADERS.len());
        record.push(row.year.to_string());
        record.extend(numeric_fields(row).iter().map(|v| format_cell(*v)));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write rows to a CSV file at `path`
pub fn export_rows_csv(path: &Path, rows: &[YearRow]) -> Result<(), LoadError> {
    let file = File::create(path)?;
    write_rows_csv(file, rows)?;
    log::info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Render rows as a CSV string
pub fn rows_to_csv_string(rows: &[YearRow]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_rows_csv(&mut buffer, rows)?;
    // csv only ever emits the UTF-8 we gave it
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Read rows back from the CSV produced by [`write_rows_csv`]
pub fn read_rows_csv<R: Read>(reader: R) -> Result<Vec<YearRow>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        if record.len() != CSV_HEADERS.len() {
            return Err(LoadError::ColumnCount {
                line: record.position().map(|p| p.line() as usize).unwrap_or(0),
                found: record.len(),
                expected: CSV_HEADERS.len(),
            });
        }

        let year = record[0].parse::<u32>().map_err(|_| LoadError::BadNumber {
            field: CSV_HEADERS[0].to_string(),
            value: record[0].to_string(),
        })?;
        let mut values = [0.0; 15];
        for (index, value) in values.iter_mut().enumerate() {
            *value = parse_cell(CSV_HEADERS[index + 1], &record[index + 1])?;
        }

        rows.push(YearRow {
            year,
            start_total_nw: values[0],
            start_accessible_nw: values[1],
            work_income: values[2],
            expenses: values[3],
            savings: values[4],
            restricted_savings: values[5],
            accessible_savings: values[6],
            growth_total: values[7],
            growth_accessible: values[8],
            withdrawal_needed: values[9],
            end_total_nw: values[10],
            end_accessible_nw: values[11],
            capital_income_total: values[12],
            capital_income_accessible: values[13],
            coast_fire_number: values[14],
        });
    }

    Ok(rows)
}

fn numeric_fields(row: &YearRow) -> [f64; 15] {
    [
        row.start_total_nw,
        row.start_accessible_nw,
        row.work_income,
        row.expenses,
        row.savings,
        row.restricted_savings,
        row.accessible_savings,
        row.growth_total,
        row.growth_accessible,
        row.withdrawal_needed,
        row.end_total_nw,
        row.end_accessible_nw,
        row.capital_income_total,
        row.capital_income_accessible,
        row.coast_fire_number,
    ]
}

fn format_cell(value: f64) -> String {
    if value.is_finite() {
        format!("{}", value)
    } else {
        String::new()
    }
}

fn parse_cell(field: &str, raw: &str) -> Result<f64, LoadError> {
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>().map_err(|_| LoadError::BadNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}
