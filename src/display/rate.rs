//! Exchange rate display formatting

use crate::models::CurrencyRateTable;

/// Format the rate table, one ordered pair per line
pub fn format_rate_table(rates: &CurrencyRateTable) -> String {
    if rates.is_empty() {
        return "No currency rates registered.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<4} {:<6} {:>12}  {}\n", "From", "To", "Rate", "Effective"));
    output.push_str(&"-".repeat(36));
    output.push('\n');

    for (base, target, entry) in rates.iter() {
        output.push_str(&format!(
            "{:<4} {:<6} {:>12}  {}\n",
            base.as_str(),
            target.as_str(),
            entry.rate.to_string(),
            entry.date.format("%Y-%m-%d")
        ));
    }

    output
}
