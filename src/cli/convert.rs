//! Renders the outcome of a conversion.

use anyhow::Result;

use crate::cli::ui::{self, StyleType};
use crate::convert::ConversionService;

/// Converts and prints the result, or a red-styled failure message.
pub fn run(service: &ConversionService<'_>, amount: &str, from: &str, to: &str) -> Result<()> {
    match service.convert(amount, from, to) {
        Ok(result) => {
            println!(
                "{} {} = {}",
                amount.trim(),
                from,
                ui::style_text(&result.to_string(), StyleType::Result)
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", ui::style_text(&e.to_string(), StyleType::Error));
            Err(e.into())
        }
    }
}
