//! Holdings preview for the `preview` command.

use std::fmt::Write;

use riskdesk_core::format::{format_currency, format_liquidity};
use riskdesk_core::{Portfolio, PortfolioPosition};
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style, Width};
use tabled::{Table, Tabled};

use crate::i18n::I18n;
use crate::theme::Theme;

const NAME_WIDTH: usize = 28;
const SECTOR_WIDTH: usize = 14;

#[derive(Tabled)]
struct HoldingRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Asset Class")]
    asset_class: String,
    #[tabled(rename = "Sector")]
    sector: String,
    #[tabled(rename = "Market Value")]
    market_value: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Liquidity")]
    liquidity: String,
}

impl From<&PortfolioPosition> for HoldingRow {
    fn from(position: &PortfolioPosition) -> Self {
        Self {
            ticker: position.ticker.clone(),
            name: position.name.clone(),
            asset_class: position.asset_class.clone(),
            sector: position.sector.clone(),
            market_value: format_currency(position.market_value),
            rating: position.rating.clone(),
            liquidity: format_liquidity(position.liquidity_score),
        }
    }
}

pub fn render(portfolio: &Portfolio, i18n: &I18n, theme: &Theme) -> String {
    let rows: Vec<HoldingRow> = portfolio.positions.iter().map(HoldingRow::from).collect();
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(1)).with(Width::truncate(NAME_WIDTH).suffix("…")))
        .with(Modify::new(Columns::single(3)).with(Width::truncate(SECTOR_WIDTH).suffix("…")))
        .with(Modify::new(Columns::new(4..)).with(Alignment::right()))
        .to_string();

    let mut out = String::new();
    let _ = writeln!(out, "{}", theme.heading.paint(&i18n.t("preview.title")));
    let _ = writeln!(out, "{}", table);
    let _ = writeln!(
        out,
        "  {}: {}",
        i18n.t("preview.total"),
        theme.accent.paint(&format_currency(portfolio.total_value))
    );
    let _ = writeln!(out, "  {}: {}", i18n.t("preview.as_of"), portfolio.as_of_date);
    out
}
