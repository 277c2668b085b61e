use super::ui;
use crate::core::{Stock, StockDetail, StockHistory};
use comfy_table::Cell;

pub fn stocks_table(stocks: &[Stock]) -> String {
    if stocks.is_empty() {
        return ui::style_text("No matching stocks", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Symbol"), ui::header_cell("Name")]);
    for stock in stocks {
        table.add_row(vec![Cell::new(&stock.symbol), Cell::new(&stock.name)]);
    }
    table.to_string()
}

impl StockDetail {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Date"),
            ui::header_cell("Price"),
            ui::header_cell("Currency"),
        ]);
        table.add_row(vec![
            Cell::new(self.quote.date),
            ui::number_cell(format!("{:.2}", self.quote.price)),
            Cell::new(self.quote.currency),
        ]);

        format!(
            "{} ({})\n\n{}",
            ui::style_text(&self.stock.name, ui::StyleType::Title),
            self.stock.symbol,
            table
        )
    }
}

impl StockHistory {
    pub fn display_as_table(&self) -> String {
        let mut output = format!(
            "{} ({})\n\n",
            ui::style_text(&self.stock.name, ui::StyleType::Title),
            self.stock.symbol
        );

        if self.price_history.is_empty() {
            output.push_str(&ui::style_text(
                "No prices in range",
                ui::StyleType::Subtle,
            ));
            return output;
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Date"),
            ui::header_cell("Close"),
            ui::header_cell("Currency"),
        ]);
        for price in &self.price_history {
            table.add_row(vec![
                Cell::new(price.date),
                ui::number_cell(format!("{:.2}", price.price)),
                Cell::new(price.currency),
            ]);
        }
        output.push_str(&table.to_string());

        if let (Some(first), Some(last)) = (self.price_history.first(), self.price_history.last()) {
            output.push_str(&format!(
                "\n\n{} {:.2} -> {:.2}",
                ui::style_text("Range:", ui::StyleType::Subtle),
                first.price,
                ui::style_text(&format!("{:.2}", last.price), ui::StyleType::Value)
            ));
        }
        output
    }
}
