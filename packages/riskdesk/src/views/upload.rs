//! Upload view: shown while idle, loading, or after a failed submission.

use std::fmt::Write;

use chrono::Local;

use crate::i18n::I18n;
use crate::state::AnalysisState;
use crate::theme::Theme;

pub fn render(state: &AnalysisState, i18n: &I18n, theme: &Theme) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", theme.heading.paint(&i18n.t("upload.title")));
    let _ = writeln!(out, "{}", theme.text_muted.paint(&i18n.t("upload.subtitle")));
    let _ = writeln!(out);

    match state {
        AnalysisState::Loading { started_at } => {
            let time = started_at.with_timezone(&Local).format("%H:%M:%S").to_string();
            let _ = writeln!(out, "  {}", theme.primary.paint(&i18n.t("upload.loading")));
            let _ = writeln!(
                out,
                "  {}",
                theme
                    .text_muted
                    .paint(&i18n.format("upload.loading_detail", &[("time", &time)]))
            );
        }
        _ => {
            let _ = writeln!(out, "  {}", i18n.t("upload.prompt"));
            let _ = writeln!(out, "  {}", theme.text_muted.paint(&i18n.t("upload.limits")));
            let _ = writeln!(out, "  {}", theme.text_muted.paint(&i18n.t("upload.template")));
        }
    }

    if let Some(message) = state.error() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", theme.error.paint(message));
    }

    out
}
