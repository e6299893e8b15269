// Payment CSV export and import

use crate::models::{NewPayment, Payment, PaymentStatus, PaymentType};
use crate::store::RecordStore;
use chrono::NaiveDate;
use eyre::{Result, eyre};
use tracing::{debug, info};

/// Column headers, in export order
pub const HEADER: [&str; 7] = ["ID", "Due Date", "Property", "Customer", "Type", "Amount", "Status"];

/// Booking numbers of imported rows start here
const IMPORT_BOOKING_BASE: i64 = 90000;

/// Render payments as CSV, every cell quoted
pub fn export_payments<'a>(payments: impl IntoIterator<Item = &'a Payment>) -> String {
    let mut lines = vec![HEADER.join(",")];
    for payment in payments {
        let cells = [
            payment.id.to_string(),
            payment.data.due_date.clone(),
            payment.data.property_title.clone().unwrap_or_default(),
            payment.data.customer.clone().unwrap_or_default(),
            payment.data.payment_type.label().to_string(),
            payment.amount_display(),
            payment.data.status.as_str().to_string(),
        ];
        let row: Vec<String> = cells.iter().map(|cell| quote(cell)).collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Default export file name for `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("transactions-{}.csv", date.format("%Y-%m-%d"))
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Split CSV text into rows of trimmed cells
///
/// Quoted cells may contain commas, doubled quotes and line breaks. Blank
/// lines produce no row.
pub fn split_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if cell.trim().is_empty() => {
                cell.clear();
                in_quotes = true;
            }
            (',', false) => row.push(std::mem::take(&mut cell).trim().to_string()),
            ('\r', false) => {}
            ('\n', false) => {
                row.push(std::mem::take(&mut cell).trim().to_string());
                rows.push(std::mem::take(&mut row));
            }
            _ => cell.push(c),
        }
    }
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell.trim().to_string());
        rows.push(row);
    }

    rows.retain(|row: &Vec<String>| !(row.len() == 1 && row[0].is_empty()));
    rows
}

fn import_type(label: &str) -> PaymentType {
    match label {
        "Sale" => PaymentType::Deposit,
        other => other.parse().unwrap_or(PaymentType::Rent),
    }
}

fn import_status(label: &str) -> PaymentStatus {
    match label {
        "Success" | "Completed" => PaymentStatus::Paid,
        "Failed" => PaymentStatus::Cancelled,
        other => other.parse().unwrap_or(PaymentStatus::Pending),
    }
}

fn non_empty(cell: &str) -> Option<String> {
    if cell.is_empty() { None } else { Some(cell.to_string()) }
}

/// Parse CSV text into payment drafts
///
/// The first row is a header. Rows with fewer than seven cells are skipped.
/// Rows without a due date are due on `today`.
pub fn parse_payments(text: &str, today: NaiveDate) -> Result<Vec<NewPayment>> {
    let rows = split_rows(text);
    if rows.len() < 2 {
        return Err(eyre!("CSV needs a header row and at least one data row"));
    }

    let mut drafts = Vec::new();
    for (i, cells) in rows.iter().enumerate().skip(1) {
        if cells.len() < HEADER.len() {
            debug!(row = i + 1, cells = cells.len(), "Skipping short CSV row");
            continue;
        }

        let amount: String = cells[5].chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
        drafts.push(NewPayment {
            booking: IMPORT_BOOKING_BASE + i as i64,
            payment_type: import_type(&cells[4]),
            month_number: 1,
            amount: if amount.is_empty() { "0".to_string() } else { amount },
            due_date: non_empty(&cells[1]).unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
            status: import_status(&cells[6]),
            paid_date: None,
            property_title: non_empty(&cells[2]),
            customer: non_empty(&cells[3]),
        });
    }

    Ok(drafts)
}

/// Add every payment in `text` to `store`, keeping file order at the front
pub fn import_payments(store: &mut RecordStore<Payment>, text: &str, today: NaiveDate) -> Result<usize> {
    let drafts = parse_payments(text, today)?;
    let count = drafts.len();
    for draft in drafts.into_iter().rev() {
        store.add(draft);
    }
    info!(count, "Imported payments");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 21).unwrap()
    }

    #[test]
    fn test_export_quotes_every_cell() {
        let payments = seed::payments();
        let csv = export_payments(payments.iter().take(1));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "ID,Due Date,Property,Customer,Type,Amount,Status");
        assert_eq!(
            lines[1],
            r#""23487","2025-07-08","Oak Grove Estates","David Martinez","Rent","₵293.00","paid""#
        );
    }

    #[test]
    fn test_export_escapes_quotes() {
        let mut payment = seed::payments().remove(4);
        payment.data.property_title = Some("The \"Lakeside\" Villa".to_string());
        let csv = export_payments([&payment]);
        assert!(csv.contains(r#""The ""Lakeside"" Villa""#));
        assert!(csv.contains(r#""₵8,500.00""#));
    }

    #[test]
    fn test_split_rows() {
        assert_eq!(split_rows(r#"a, "b,c" ,"d""e""#), vec![vec!["a", "b,c", "d\"e"]]);
        assert_eq!(split_rows("x,,y\r\n\nz"), vec![vec!["x", "", "y"], vec!["z"]]);
        assert_eq!(split_rows("\"two\nlines\",b\nc,d\n"), vec![vec!["two\nlines", "b"], vec!["c", "d"]]);
        assert!(split_rows("").is_empty());
    }

    #[test]
    fn test_multiline_cell_survives_round_trip() {
        let mut payment = seed::payments().remove(0);
        payment.data.property_title = Some("Oak Grove\nUnit 4".to_string());
        let csv = export_payments([&payment]);

        let drafts = parse_payments(&csv, today()).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].property_title.as_deref(), Some("Oak Grove\nUnit 4"));
        assert_eq!(drafts[0].customer.as_deref(), Some("David Martinez"));
        assert_eq!(drafts[0].status, PaymentStatus::Paid);
    }

    #[test]
    fn test_parse_requires_data_row() {
        assert!(parse_payments("", today()).is_err());
        assert!(parse_payments("ID,Due Date,Property,Customer,Type,Amount,Status\n", today()).is_err());
    }

    #[test]
    fn test_parse_maps_labels() {
        let text = "ID,Due Date,Property,Customer,Type,Amount,Status\n\
                    1,2025-08-01,Palm Court,Ama Owusu,Sale,\"₵12,000.00\",Success\n\
                    2,,Cedar House,Kofi Mensah,Late Fee,45,Failed\n\
                    short,row\n\
                    3,2025-08-03,,,Mystery,n/a,whatever\n";

        let drafts = parse_payments(text, today()).unwrap();
        assert_eq!(drafts.len(), 3);

        assert_eq!(drafts[0].payment_type, PaymentType::Deposit);
        assert_eq!(drafts[0].amount, "12000.00");
        assert_eq!(drafts[0].status, PaymentStatus::Paid);
        assert_eq!(drafts[0].customer.as_deref(), Some("Ama Owusu"));

        assert_eq!(drafts[1].payment_type, PaymentType::LateFee);
        assert_eq!(drafts[1].status, PaymentStatus::Cancelled);
        assert_eq!(drafts[1].due_date, "2025-07-21");

        assert_eq!(drafts[2].payment_type, PaymentType::Rent);
        assert_eq!(drafts[2].amount, "0");
        assert_eq!(drafts[2].status, PaymentStatus::Pending);
        assert_eq!(drafts[2].property_title, None);
    }

    #[test]
    fn test_export_then_import() {
        let payments = seed::payments();
        let csv = export_payments(&payments);
        let drafts = parse_payments(&csv, today()).unwrap();

        assert_eq!(drafts.len(), payments.len());
        for (draft, original) in drafts.iter().zip(&payments) {
            assert_eq!(draft.payment_type, original.data.payment_type);
            assert_eq!(draft.status, original.data.status);
            assert_eq!(draft.amount, original.data.amount);
            assert_eq!(draft.due_date, original.data.due_date);
        }
    }

    #[test]
    fn test_import_prepends_in_file_order() {
        let mut store = RecordStore::open(Arc::new(MemoryStorage::new()), seed::payments());
        let text = "ID,Due Date,Property,Customer,Type,Amount,Status\n\
                    a,2025-08-01,First,One,Rent,100,paid\n\
                    b,2025-08-02,Second,Two,Rent,200,pending\n";

        assert_eq!(import_payments(&mut store, text, today()).unwrap(), 2);
        assert_eq!(store.len(), 15);
        assert_eq!(store.records()[0].data.property_title.as_deref(), Some("First"));
        assert_eq!(store.records()[1].data.property_title.as_deref(), Some("Second"));
        assert_eq!(store.records()[2].id.to_string(), "23487");
    }
}
