//! View modules for the riskdesk terminal dashboard

pub mod preview;
pub mod results;
pub mod upload;

use riskdesk_core::Dashboard;

use crate::i18n::I18n;
use crate::state::{ActiveView, AnalysisState};
use crate::theme::Theme;

/// Render whichever top-level view the state calls for
pub fn render(state: &AnalysisState, i18n: &I18n, theme: &Theme) -> String {
    match (state.active_view(), state.response()) {
        (ActiveView::Results, Some(response)) => {
            results::render(&Dashboard::from_response(response), i18n, theme)
        }
        _ => upload::render(state, i18n, theme),
    }
}
