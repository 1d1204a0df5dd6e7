// TokenDeck - ui/panels/tokens.rs
//
// Token table: keyword search, sortable columns, lazy pagination, and
// per-row actions (copy key, enable/disable, delete) plus creation.
//
// Row actions and header clicks are collected during the row loop and
// applied afterwards; `page_window()` holds an immutable borrow of the
// pager for the duration of the grid.

use crate::api::worker::ApiRequest;
use crate::app::state::AppState;
use crate::core::model::{format_timestamp, TokenSortKey, TokenStatus};
use crate::ui::panels::{pagination_row, PagerAction};
use crate::ui::theme;
use crate::util::constants;

/// Deferred per-row action, keyed by the token's backend id.
enum RowAction {
    CopyKey(i64),
    SetStatus(i64, i32),
    Delete(i64),
}

/// Render the tokens panel (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    // -- Search + create row --
    let mut submit_search = false;
    let mut submit_create = false;
    ui.horizontal(|ui| {
        ui.label("Search:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.token_search_input)
                .desired_width(theme::SEARCH_BOX_WIDTH)
                .hint_text("name or key"),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit_search = true;
        }
        if ui.button("Go").clicked() {
            submit_search = true;
        }
        if !state.tokens.search_keyword().is_empty() {
            ui.weak(format!("filtered: \"{}\"", state.tokens.search_keyword()));
        }

        ui.separator();
        ui.label("New token:");
        ui.add(
            egui::TextEdit::singleline(&mut state.new_token_name)
                .desired_width(140.0)
                .hint_text("name"),
        );
        let can_create = !state.new_token_name.trim().is_empty();
        if ui.add_enabled(can_create, egui::Button::new("Create")).clicked() {
            submit_create = true;
        }
    });
    if submit_search {
        let keyword = state.token_search_input.clone();
        let plan = state.tokens.begin_search(&keyword);
        state.request_tokens_plan(plan);
    }
    if submit_create {
        let name = state.new_token_name.trim().to_string();
        state.new_token_name.clear();
        state.request(ApiRequest::CreateToken { name });
    }

    ui.separator();

    // -- Table --
    let mut sort_clicked: Option<TokenSortKey> = None;
    let mut row_action: Option<RowAction> = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new("tokens_table")
                .num_columns(7)
                .striped(true)
                .min_row_height(theme::ROW_HEIGHT)
                .show(ui, |ui| {
                    if ui.button("ID").clicked() {
                        sort_clicked = Some(TokenSortKey::Id);
                    }
                    if ui.button("Name").clicked() {
                        sort_clicked = Some(TokenSortKey::Name);
                    }
                    if ui.button("Status").clicked() {
                        sort_clicked = Some(TokenSortKey::Status);
                    }
                    if ui.button("Created").clicked() {
                        sort_clicked = Some(TokenSortKey::CreatedTime);
                    }
                    if ui.button("Last used").clicked() {
                        sort_clicked = Some(TokenSortKey::AccessedTime);
                    }
                    ui.label("Quota");
                    ui.label("Actions");
                    ui.end_row();

                    for token in state.tokens.page_window() {
                        ui.label(token.id.to_string());
                        ui.label(token.display_name());
                        let status = token.status_kind();
                        ui.colored_label(theme::token_status_colour(status), status.label());
                        ui.label(format_timestamp(token.created_time));
                        ui.label(format_timestamp(token.accessed_time));
                        if token.unlimited_quota {
                            ui.label("unlimited");
                        } else {
                            ui.label(token.remain_quota.to_string());
                        }

                        ui.horizontal(|ui| {
                            if ui
                                .small_button("Copy")
                                .on_hover_text("Copy the token key to the clipboard")
                                .clicked()
                            {
                                row_action = Some(RowAction::CopyKey(token.id));
                            }
                            match status {
                                TokenStatus::Enabled => {
                                    if ui.small_button("Disable").clicked() {
                                        row_action = Some(RowAction::SetStatus(
                                            token.id,
                                            constants::TOKEN_STATUS_DISABLED,
                                        ));
                                    }
                                }
                                _ => {
                                    if ui.small_button("Enable").clicked() {
                                        row_action = Some(RowAction::SetStatus(
                                            token.id,
                                            constants::TOKEN_STATUS_ENABLED,
                                        ));
                                    }
                                }
                            }
                            if ui.small_button("Delete").clicked() {
                                row_action = Some(RowAction::Delete(token.id));
                            }
                        });
                        ui.end_row();
                    }
                });

            if state.tokens.page_window().is_empty() && !state.tokens.is_loading() {
                ui.add_space(8.0);
                ui.weak("No tokens on this page.");
            }
        });

    if let Some(key) = sort_clicked {
        state.tokens.sort_by(key);
    }

    match row_action {
        Some(RowAction::CopyKey(id)) => {
            if let Some(payload) = state.copy_token_key(id) {
                ui.ctx().copy_text(payload);
            }
        }
        Some(RowAction::SetStatus(id, status)) => {
            state.request(ApiRequest::SetTokenStatus { id, status });
        }
        Some(RowAction::Delete(id)) => {
            state.request(ApiRequest::DeleteToken { id });
        }
        None => {}
    }

    ui.separator();

    // -- Pagination --
    match pagination_row(ui, &state.tokens) {
        Some(PagerAction::Refresh) => {
            let plan = state.tokens.refresh();
            state.request_tokens_plan(plan);
        }
        Some(PagerAction::GoTo(page)) => {
            if let Some(plan) = state.tokens.page_change(page) {
                state.request_tokens_plan(plan);
            }
        }
        None => {}
    }
}
