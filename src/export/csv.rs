//! CSV export of expenses
//!
//! Every text field is quoted with embedded quotes doubled; the amount is
//! written unquoted as a plain decimal.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{VyapaarError, VyapaarResult};
use crate::models::{Expense, Money};
use crate::storage::file_io::write_text_atomic;

pub const CSV_HEADER: [&str; 10] = [
    "ID",
    "Date",
    "Merchant",
    "Business Unit",
    "Category",
    "Amount",
    "Status",
    "Payment Method",
    "Description",
    "Submitted By",
];

/// Default file name for an export made on `date`
pub fn export_filename(date: NaiveDate) -> String {
    format!("expenses_export_{}.csv", date.format("%Y-%m-%d"))
}

/// Write a header and one record per expense; returns the record count
pub fn write_expenses_csv<W: Write>(expenses: &[&Expense], mut writer: W) -> VyapaarResult<usize> {
    writeln!(writer, "{}", quoted_fields(&CSV_HEADER)?)?;

    for expense in expenses {
        let date = expense.date.format("%Y-%m-%d").to_string();
        let head = quoted_fields(&[
            expense.id.as_str(),
            date.as_str(),
            expense.merchant.as_str(),
            expense.business_unit.as_str(),
            expense.category.as_str(),
        ])?;
        let tail = quoted_fields(&[
            expense.status.label(),
            expense.payment_method.label(),
            expense.description.as_str(),
            expense.submitted_by.name.as_str(),
        ])?;
        writeln!(writer, "{},{},{}", head, amount_field(expense.amount), tail)?;
    }

    writer
        .flush()
        .map_err(|e| VyapaarError::Export(format!("Failed to flush CSV: {}", e)))?;
    Ok(expenses.len())
}

/// Render `fields` as one always-quoted CSV run without a line terminator
fn quoted_fields(fields: &[&str]) -> VyapaarResult<String> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    csv.write_record(fields)?;

    let bytes = csv
        .into_inner()
        .map_err(|e| VyapaarError::Export(format!("Failed to write CSV: {}", e)))?;
    let mut text = String::from_utf8(bytes)
        .map_err(|e| VyapaarError::Export(format!("CSV output is not UTF-8: {}", e)))?;
    text.pop();
    Ok(text)
}

/// Write the export to `path`, replacing any existing file
pub fn export_expenses_csv(expenses: &[&Expense], path: &Path) -> VyapaarResult<usize> {
    let mut buffer = Vec::new();
    let count = write_expenses_csv(expenses, &mut buffer)?;

    let text = String::from_utf8(buffer)
        .map_err(|e| VyapaarError::Export(format!("CSV output is not UTF-8: {}", e)))?;
    write_text_atomic(path, &text)?;

    log::info!("Exported {} expenses to {}", count, path.display());
    Ok(count)
}

/// `12500`, `1234.5`, `0.05`
fn amount_field(amount: Money) -> String {
    let text = format!("{:.2}", amount.as_decimal());
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppData;
    use tempfile::TempDir;

    fn render(expenses: &[&Expense]) -> String {
        let mut buffer = Vec::new();
        write_expenses_csv(expenses, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_and_line_count() {
        let data = AppData::seed();
        let rows: Vec<&Expense> = data.expenses.iter().collect();
        let output = render(&rows);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), rows.len() + 1);
        assert_eq!(
            lines[0],
            r#""ID","Date","Merchant","Business Unit","Category","Amount","Status","Payment Method","Description","Submitted By""#
        );
        assert_eq!(
            lines[1],
            r#""e1","2023-10-25","Shree Cement Traders","Construction Projects","Materials",12500,"Approved","Bank Transfer","50 bags of cement for Site A","Ramesh (Site Manager)""#
        );
        assert!(!output.contains('\r'));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut expense = AppData::seed().expenses[1].clone();
        expense.merchant = r#"Sharma "Bhai" Stores"#.into();
        expense.description = "Tea, biscuits".into();
        expense.amount = Money::from_paise(123450);

        let output = render(&[&expense]);
        let record = output.lines().nth(1).unwrap();
        assert!(record.contains(r#""Sharma ""Bhai"" Stores""#));
        assert!(record.contains(r#""Tea, biscuits""#));
        assert!(record.contains(",1234.5,"));
        assert!(record.contains(r#""Pending Review""#));
    }

    #[test]
    fn test_numeric_looking_text_is_quoted() {
        let mut expense = AppData::seed().expenses[0].clone();
        expense.merchant = "2024".into();
        expense.business_unit = "42".into();
        expense.description = "500".into();

        let output = render(&[&expense]);
        assert_eq!(
            output.lines().nth(1).unwrap(),
            r#""e1","2023-10-25","2024","42","Materials",12500,"Approved","Bank Transfer","500","Ramesh (Site Manager)""#
        );
    }

    #[test]
    fn test_multiline_description_stays_one_record() {
        let mut expense = AppData::seed().expenses[0].clone();
        expense.description = "line one\nline two".into();

        let output = render(&[&expense]);
        assert!(output.contains("\"line one\nline two\",\"Ramesh (Site Manager)\"\n"));
    }

    #[test]
    fn test_empty_export_has_header_only() {
        assert_eq!(render(&[]).lines().count(), 1);
    }

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let path = temp_dir.path().join(export_filename(date));
        assert!(path.ends_with("expenses_export_2024-03-09.csv"));

        let data = AppData::seed();
        let rows: Vec<&Expense> = data.expenses.iter().filter(|e| e.is_pending()).collect();
        assert_eq!(export_expenses_csv(&rows, &path).unwrap(), 2);

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);
    }

    #[test]
    fn test_amount_field() {
        assert_eq!(amount_field(Money::from_rupees(450)), "450");
        assert_eq!(amount_field(Money::from_paise(5)), "0.05");
        assert_eq!(amount_field(Money::from_paise(1010)), "10.1");
        assert_eq!(amount_field(Money::zero()), "0");
    }
}
