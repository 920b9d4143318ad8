//! Renders the full exchange rate table.

use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

use crate::cli::ui::{self, StyleType};
use crate::currency;
use crate::rates::RateStore;

pub fn run(store: &RateStore) -> Result<()> {
    let rates = store.list_rates()?;
    println!("{}", render(&rates));
    Ok(())
}

fn render(rates: &[(String, String)]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Rate")]);

    for (code, rate) in rates {
        table.add_row(vec![
            Cell::new(code),
            Cell::new(rate).set_alignment(CellAlignment::Right),
        ]);
    }

    format!(
        "Base Rate: {}\n\n{}",
        ui::style_text(currency::BASE_CURRENCY, StyleType::Title),
        table
    )
}
