//! Results view: the analysis report.

use std::fmt::Write;

use riskdesk_core::format::format_percent;
use riskdesk_core::view::{Dashboard, ExposureChart, ScenarioCard};

use crate::i18n::I18n;
use crate::theme::Theme;

const BAR_WIDTH: f64 = 30.0;

pub fn render(dashboard: &Dashboard, i18n: &I18n, theme: &Theme) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", theme.heading.paint(&i18n.t("results.title")));
    let _ = writeln!(out, "{}", theme.text_muted.paint(&i18n.t("results.reset_hint")));
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", theme.heading.paint(&i18n.t("results.risk_assessment")));
    let _ = writeln!(out, "  {}", dashboard.risk_explanation);
    let _ = writeln!(out);

    for card in &dashboard.summary_cards {
        let _ = write!(out, "  {:<16} {}", card.title, theme.accent.paint(&card.value));
        if let Some(subtext) = card.subtext {
            let _ = write!(out, "  {}", theme.text_muted.paint(subtext));
        }
        let _ = writeln!(out);
    }

    for chart in &dashboard.exposure_charts {
        let _ = writeln!(out);
        render_chart(&mut out, chart, i18n, theme);
    }

    if let Some(alerts) = &dashboard.concentration_alerts {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", theme.warning.paint(&i18n.t("results.alerts")));
        for alert in alerts {
            let _ = writeln!(out, "  ! {}", alert);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", theme.heading.paint(&i18n.t("results.scenarios")));
    for card in &dashboard.scenario_cards {
        render_scenario(&mut out, card, i18n, theme);
    }

    out
}

fn render_chart(out: &mut String, chart: &ExposureChart, i18n: &I18n, theme: &Theme) {
    let _ = writeln!(out, "{}", theme.heading.paint(chart.title));

    if chart.series.is_empty() {
        let _ = writeln!(out, "  {}", theme.text_muted.paint(&i18n.t("results.no_exposure")));
        return;
    }

    let label_width = chart
        .series
        .iter()
        .map(|point| point.name.chars().count())
        .max()
        .unwrap_or(0);

    for point in &chart.series {
        let bar = "█".repeat(bar_len(point.percentage));
        let _ = writeln!(
            out,
            "  {:<width$} {} {}",
            point.name,
            theme.primary.paint(&bar),
            format_percent(point.percentage),
            width = label_width
        );
    }
}

fn bar_len(percentage: f64) -> usize {
    // NaN casts to zero
    ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH).round() as usize
}

fn render_scenario(out: &mut String, card: &ScenarioCard, i18n: &I18n, theme: &Theme) {
    let _ = writeln!(out);
    if card.severity.is_severe() {
        let _ = writeln!(
            out,
            "  {} [{}] {}",
            theme.error.paint(&card.name),
            theme.error.paint(&card.loss_badge),
            theme.error.paint(&i18n.t("scenario.severe"))
        );
    } else {
        let _ = writeln!(out, "  {} [{}]", theme.heading.paint(&card.name), card.loss_badge);
    }
    let _ = writeln!(out, "    {}", theme.text_muted.paint(&card.description));
    let _ = writeln!(
        out,
        "    {} {}",
        i18n.t("scenario.projected_impact"),
        card.projected_impact
    );

    let drivers = if card.drivers.is_empty() {
        theme.text_muted.paint(&i18n.t("scenario.no_drivers"))
    } else {
        card.drivers
            .iter()
            .map(|driver| driver.display.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let _ = writeln!(out, "    {} {}", i18n.t("scenario.drivers"), drivers);
}
