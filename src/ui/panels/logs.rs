// TokenDeck - ui/panels/logs.rs
//
// Usage-log table: keyword search, sortable columns, lazy pagination.
//
// Header clicks and pagination actions are collected during the row loop
// and applied afterwards so we do not mutable-borrow `state` while the
// page window still holds immutable references into the pager.

use crate::app::state::AppState;
use crate::core::model::{format_timestamp, LogSortKey};
use crate::ui::panels::{pagination_row, PagerAction};
use crate::ui::theme;

/// Render the logs panel (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    // -- Search row --
    let mut submit_search = false;
    ui.horizontal(|ui| {
        ui.label("Search:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.log_search_input)
                .desired_width(theme::SEARCH_BOX_WIDTH)
                .hint_text("keyword"),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit_search = true;
        }
        if ui.button("Go").clicked() {
            submit_search = true;
        }
        if !state.logs.search_keyword().is_empty() {
            ui.weak(format!("filtered: \"{}\"", state.logs.search_keyword()));
        }
    });
    if submit_search {
        let keyword = state.log_search_input.clone();
        let plan = state.logs.begin_search(&keyword);
        state.request_logs_plan(plan);
    }

    ui.separator();

    // -- Table --
    let mut sort_clicked: Option<LogSortKey> = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new("logs_table")
                .num_columns(4)
                .striped(true)
                .min_row_height(theme::ROW_HEIGHT)
                .show(ui, |ui| {
                    if ui.button("Time").clicked() {
                        sort_clicked = Some(LogSortKey::CreatedTime);
                    }
                    if ui.button("Type").clicked() {
                        sort_clicked = Some(LogSortKey::Kind);
                    }
                    if ui.button("Detail").clicked() {
                        sort_clicked = Some(LogSortKey::Content);
                    }
                    ui.label("");
                    ui.end_row();

                    for log in state.logs.page_window() {
                        ui.label(format_timestamp(log.created_time));
                        let kind = log.kind();
                        ui.colored_label(theme::log_kind_colour(kind), kind.label());
                        ui.label(&log.content);
                        ui.label("");
                        ui.end_row();
                    }
                });

            if state.logs.page_window().is_empty() && !state.logs.is_loading() {
                ui.add_space(8.0);
                ui.weak("No log entries on this page.");
            }
        });

    if let Some(key) = sort_clicked {
        state.logs.sort_by(key);
    }

    ui.separator();

    // -- Pagination --
    match pagination_row(ui, &state.logs) {
        Some(PagerAction::Refresh) => {
            let plan = state.logs.refresh();
            state.request_logs_plan(plan);
        }
        Some(PagerAction::GoTo(page)) => {
            if let Some(plan) = state.logs.page_change(page) {
                state.request_logs_plan(plan);
            }
        }
        None => {}
    }
}
