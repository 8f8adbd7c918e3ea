//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rust_decimal::Decimal;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format an amount rounded to two decimal places
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Render a lock flag for table cells
pub fn format_locked(locked: bool) -> String {
    if locked {
        "locked".red().to_string()
    } else {
        "active".green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_amount_pads_to_cents() {
        assert_eq!(format_amount(Decimal::from(5)), "5.00");
        assert_eq!(format_amount(Decimal::from_str("12.5").unwrap()), "12.50");
        assert_eq!(format_amount(Decimal::from_str("0.009").unwrap()), "0.01");
        assert_eq!(format_amount(Decimal::from_str("1102.4999").unwrap()), "1102.50");
    }
}
