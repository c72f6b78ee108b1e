//! # Receipt Formatter
//!
//! Renders the finalized cart as fixed-width text and saves it.
//!
//! ## Layout
//! ```text
//!
//! Greener Pastures Grocery Store
//!
//! 	9090 Lake Ontario Dr.
//! 	San Jose, CA 95134
//! 	(408) 555 - 4545
//!
//! Date:         19 October 2026 04:30 PM
//! Cashier:                       Nazeer
//!
//! QTY        Desc                 Cost
//! ----------------------------------------
//! x3         milk                 $9.00
//! ----------------------------------------
//! Subtotal                $9.00
//! Tax                     $0.84
//! Total                   $9.84
//! ```
//!
//! Amounts come from [`ReceiptTotals`]; this module only lays them out.

use chrono::NaiveDateTime;
use std::path::Path;
use tracing::info;

use crate::config::ShopConfig;
use crate::error::{ShopError, ShopResult};
use grocer_core::{CartLine, ReceiptTotals};

/// Width of the separator lines.
pub const RECEIPT_WIDTH: usize = 40;

/// Timestamp format on the `Date:` line.
pub const DATE_FORMAT: &str = "%d %B %Y %I:%M %p";

/// A rendered receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// The lines that were rung up.
    pub lines: Vec<CartLine>,
    /// Subtotal, tax and total.
    pub totals: ReceiptTotals,
    /// The printable document.
    pub text: String,
}

/// Lays out a receipt for `lines`, stamped with `at`.
pub fn render(config: &ShopConfig, lines: &[CartLine], at: NaiveDateTime) -> Receipt {
    let totals = ReceiptTotals::compute(lines, config.tax_rate());
    let separator = "-".repeat(RECEIPT_WIDTH);

    let mut rows = vec![String::new(), config.store_name.clone(), String::new()];
    rows.extend(config.store_address.iter().map(|line| format!("\t{}", line)));
    rows.push(format!("\t{}", config.store_phone));
    rows.push(String::new());
    rows.push(format!("Date: {:>31}", at.format(DATE_FORMAT).to_string()));
    rows.push(format!("Cashier: {:>28}", config.cashier));
    rows.push(String::new());
    rows.push(format!("{:<10} {:<20} {:<5}", "QTY", "Desc", "Cost"));
    rows.push(separator.clone());

    rows.extend(lines.iter().map(|line| {
        format!(
            "x{:<9} {:<20} {:<5}",
            line.count(),
            line.name(),
            line.line_total()
        )
    }));

    rows.push(separator);
    rows.push(format!("Subtotal {:>20}", totals.subtotal));
    rows.push(format!("Tax {:>25}", totals.tax));
    rows.push(format!("Total {:>23}", totals.total));

    let mut text = rows.join("\n");
    text.push('\n');

    Receipt {
        lines: lines.to_vec(),
        totals,
        text,
    }
}

/// Saves the receipt, replacing any previous one.
pub fn save(receipt: &Receipt, path: &Path) -> ShopResult<()> {
    std::fs::write(path, &receipt.text).map_err(|source| ShopError::ReceiptWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        total = %receipt.totals.total,
        "Receipt written"
    );
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use grocer_core::Money;

    fn afternoon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(16, 30, 0)
            .unwrap()
    }

    fn milk_times_three() -> Vec<CartLine> {
        vec![CartLine::new(0, "milk", Money::from_cents(300), 3)]
    }

    #[test]
    fn test_totals_for_three_milk() {
        let receipt = render(&ShopConfig::default(), &milk_times_three(), afternoon());

        assert_eq!(receipt.totals.subtotal, Money::from_cents(900));
        assert_eq!(receipt.totals.tax, Money::from_cents(84));
        assert_eq!(receipt.totals.total, Money::from_cents(984));
    }

    #[test]
    fn test_layout() {
        let receipt = render(&ShopConfig::default(), &milk_times_three(), afternoon());
        let lines: Vec<&str> = receipt.text.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Greener Pastures Grocery Store");
        assert_eq!(lines[3], "\t9090 Lake Ontario Dr.");
        assert_eq!(lines[5], "\t(408) 555 - 4545");
        assert_eq!(lines[7], format!("Date: {:>31}", "19 October 2026 04:30 PM"));
        assert_eq!(lines[8], format!("Cashier: {:>28}", "Nazeer"));
        assert!(lines[10].starts_with("QTY        Desc"));
        assert_eq!(lines[11], "-".repeat(40));
        assert_eq!(lines[12], format!("x3         {:<20} $9.00", "milk"));
        assert_eq!(lines[13], "-".repeat(40));
        assert_eq!(lines[14], format!("Subtotal {:>20}", "$9.00"));
        assert_eq!(lines[15], format!("Tax {:>25}", "$0.84"));
        assert_eq!(lines[16], format!("Total {:>23}", "$9.84"));
        assert_eq!(lines.len(), 17);
        assert!(receipt.text.ends_with("$9.84\n"));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Receipt.txt");
        std::fs::write(&path, "old receipt").unwrap();

        let receipt = render(&ShopConfig::default(), &milk_times_three(), afternoon());
        save(&receipt, &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), receipt.text);
    }

    #[test]
    fn test_save_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("Receipt.txt");

        let receipt = render(&ShopConfig::default(), &milk_times_three(), afternoon());
        let err = save(&receipt, &path).unwrap_err();

        assert!(matches!(err, ShopError::ReceiptWrite { .. }));
    }
}
