//! CSV-based assumption loader
//!
//! Reads a two-column `name,value` file. Names are the camelCase field names
//! of `GlobalInputs`; fields missing from the file keep their default value.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::GlobalInputs;
use crate::error::LoadError;

/// Every field name accepted by [`set_named_field`]
pub const FIELD_NAMES: [&str; 11] = [
    "projectionYears",
    "yearsUntilRetirement",
    "startingTotalNW",
    "startingAccessibleNW",
    "nominalReturn",
    "inflation",
    "fees",
    "safeWithdrawalRate",
    "retirementSpending",
    "restrictedSavingsRate",
    "currentYearIncome",
];

/// Load inputs from a `name,value` CSV file
pub fn load_inputs_csv(path: &Path) -> Result<GlobalInputs, LoadError> {
    let file = File::open(path)?;
    load_inputs_from_reader(file)
}

/// Load inputs from any reader (e.g. string buffer)
pub fn load_inputs_from_reader<R: Read>(reader: R) -> Result<GlobalInputs, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut inputs = GlobalInputs::default();

    for result in csv_reader.records() {
        let record = result?;
        if record.len() != 2 {
            return Err(LoadError::ColumnCount {
                line: record.position().map(|p| p.line() as usize).unwrap_or(0),
                found: record.len(),
                expected: 2,
            });
        }
        set_named_field(&mut inputs, record[0].trim(), record[1].trim())?;
    }

    inputs.validate()?;
    Ok(inputs)
}

/// Assign one field by its camelCase name from its textual value
///
/// Balance setters keep accessible within total the same way an input form
/// derives one from the other.
pub fn set_named_field(inputs: &mut GlobalInputs, name: &str, raw: &str) -> Result<(), LoadError> {
    match name {
        "projectionYears" => inputs.projection_years = parse_years(name, raw)?,
        "yearsUntilRetirement" => inputs.years_until_retirement = parse_years(name, raw)?,
        "startingTotalNW" => inputs.set_starting_total_nw(parse_number(name, raw)?),
        "startingAccessibleNW" => inputs.set_starting_accessible_nw(parse_number(name, raw)?),
        "nominalReturn" => inputs.nominal_return = parse_number(name, raw)?,
        "inflation" => inputs.inflation = parse_number(name, raw)?,
        "fees" => inputs.fees = parse_number(name, raw)?,
        "safeWithdrawalRate" => inputs.safe_withdrawal_rate = parse_number(name, raw)?,
        "retirementSpending" => inputs.retirement_spending = parse_number(name, raw)?,
        "restrictedSavingsRate" => inputs.restricted_savings_rate = parse_number(name, raw)?,
        "currentYearIncome" => inputs.current_year_income = parse_number(name, raw)?,
        other => return Err(LoadError::UnknownField(other.to_string())),
    }
    Ok(())
}

fn parse_number(field: &str, raw: &str) -> Result<f64, LoadError> {
    raw.parse::<f64>().map_err(|_| LoadError::BadNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

fn parse_years(field: &str, raw: &str) -> Result<u32, LoadError> {
    raw.parse::<u32>().map_err(|_| LoadError::BadNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;

    #[test]
    fn test_load_overrides_named_fields() {
        let csv = "name,value\nprojectionYears,30\nretirementSpending,120000\nnominalReturn,0.06\n";
        let inputs = load_inputs_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(inputs.projection_years, 30);
        assert_eq!(inputs.retirement_spending, 120_000.0);
        assert_eq!(inputs.nominal_return, 0.06);
        // untouched fields keep defaults
        assert_eq!(inputs.years_until_retirement, 19);
    }

    #[test]
    fn test_load_rejects_unknown_field() {
        let csv = "name,value\nmortgage,1000\n";
        let err = load_inputs_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownField(name) if name == "mortgage"));
    }

    #[test]
    fn test_load_rejects_fractional_years() {
        let csv = "name,value\nprojectionYears,12.5\n";
        let err = load_inputs_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::BadNumber { .. }));
    }

    #[test]
    fn test_load_validates_result() {
        let csv = "name,value\nsafeWithdrawalRate,4\n";
        let err = load_inputs_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(InputError::RateOutOfRange { field: "safeWithdrawalRate", .. })
        ));
    }

    #[test]
    fn test_every_field_name_is_settable() {
        let mut inputs = GlobalInputs::default();
        for name in FIELD_NAMES {
            set_named_field(&mut inputs, name, "1").unwrap();
        }
        assert_eq!(inputs.projection_years, 1);
        assert_eq!(inputs.current_year_income, 1.0);
    }
}
