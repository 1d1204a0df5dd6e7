// TokenDeck - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the panels, drains staged requests into the background
// worker, and applies completion events back onto the table controllers.

use crate::api::worker::{ApiEvent, ApiRequest, ApiWorker};
use crate::app::state::{AppState, View};
use crate::ui;
use crate::util::constants;

/// The TokenDeck application.
pub struct TokenDeckApp {
    pub state: AppState,
    pub worker: ApiWorker,
}

impl TokenDeckApp {
    /// Create a new application instance with the given state and worker.
    pub fn new(state: AppState, worker: ApiWorker) -> Self {
        Self { state, worker }
    }

    /// Apply one completion event onto the state.
    fn apply_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::LogsLoaded {
                page,
                ticket,
                result,
            } => match result {
                Ok(items) => {
                    let count = items.len();
                    if self.state.logs.complete_load(ticket, page, items) {
                        self.state.status_message = format!("Loaded {count} log entries.");
                    } else {
                        tracing::debug!(page, "Discarding superseded logs page response");
                    }
                }
                Err(e) => {
                    if self.state.logs.fetch_failed(ticket) {
                        tracing::warn!(error = %e, page, "Logs page fetch failed");
                        self.state.status_message = format!("Failed to load logs: {e}");
                    }
                }
            },
            ApiEvent::LogsSearched { ticket, result } => match result {
                Ok(items) => {
                    let count = items.len();
                    if self.state.logs.complete_search(ticket, items) {
                        self.state.status_message = format!("Search matched {count} log entries.");
                    }
                }
                Err(e) => {
                    if self.state.logs.fetch_failed(ticket) {
                        tracing::warn!(error = %e, "Logs search failed");
                        self.state.status_message = format!("Log search failed: {e}");
                    }
                }
            },
            ApiEvent::TokensLoaded {
                page,
                ticket,
                result,
            } => match result {
                Ok(items) => {
                    let count = items.len();
                    if self.state.tokens.complete_load(ticket, page, items) {
                        self.state.status_message = format!("Loaded {count} tokens.");
                    } else {
                        tracing::debug!(page, "Discarding superseded tokens page response");
                    }
                }
                Err(e) => {
                    if self.state.tokens.fetch_failed(ticket) {
                        tracing::warn!(error = %e, page, "Tokens page fetch failed");
                        self.state.status_message = format!("Failed to load tokens: {e}");
                    }
                }
            },
            ApiEvent::TokensSearched { ticket, result } => match result {
                Ok(items) => {
                    let count = items.len();
                    if self.state.tokens.complete_search(ticket, items) {
                        self.state.status_message = format!("Search matched {count} tokens.");
                    }
                }
                Err(e) => {
                    if self.state.tokens.fetch_failed(ticket) {
                        tracing::warn!(error = %e, "Token search failed");
                        self.state.status_message = format!("Token search failed: {e}");
                    }
                }
            },
            ApiEvent::TokenCreated { result } => match result {
                Ok(()) => {
                    self.state.status_message = "Token created.".to_string();
                    // Reload from the first page so the new token appears.
                    let plan = self.state.tokens.refresh();
                    self.state.request_tokens_plan(plan);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Token creation failed");
                    self.state.status_message = format!("Token creation failed: {e}");
                }
            },
            ApiEvent::TokenStatusSet { id, result } => match result {
                Ok(updated) => {
                    let status = updated.status;
                    if self.state.tokens.update_item(id, |t| t.status = status) {
                        self.state.status_message = format!(
                            "Token '{}' is now {}.",
                            updated.name,
                            updated.status_kind().label().to_lowercase()
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, token_id = id, "Token status update failed");
                    self.state.status_message = format!("Status update failed: {e}");
                }
            },
            ApiEvent::TokenDeleted { id, result } => match result {
                Ok(()) => {
                    self.state.tokens.mark_deleted(id);
                    self.state.status_message = "Token deleted.".to_string();
                }
                Err(e) => {
                    tracing::warn!(error = %e, token_id = id, "Token deletion failed");
                    self.state.status_message = format!("Deletion failed: {e}");
                }
            },
            ApiEvent::LoggedOut { result } => match result {
                Ok(()) => {
                    tracing::info!("Signed out");
                    self.state.signed_out = true;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Logout failed");
                    self.state.status_message = format!("Sign out failed: {e}");
                }
            },
        }
    }
}

impl eframe::App for TokenDeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply completion events from the background worker.
        let events = self.worker.poll_events();
        let had_events = !events.is_empty();
        for event in events {
            self.apply_event(event);
        }
        // Repaint while fetches are in flight so completions apply promptly.
        if had_events || self.state.any_loading() {
            ctx.request_repaint();
        }

        if self.state.signed_out {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label("Signed out. You can close this window.");
                });
            });
            return;
        }

        // Top navigation bar
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(constants::APP_NAME);
                ui.separator();
                if ui
                    .selectable_label(self.state.view == View::Logs, "Logs")
                    .clicked()
                {
                    self.state.view = View::Logs;
                }
                if ui
                    .selectable_label(self.state.view == View::Tokens, "Tokens")
                    .clicked()
                {
                    self.state.view = View::Tokens;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Sign out").clicked() {
                        self.state.request(ApiRequest::Logout);
                    }
                    if let Some(ref user) = self.state.user_label {
                        ui.label(user);
                        ui.separator();
                    }
                });
            });
        });

        // Bottom status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(ui::theme::STATUS_BG)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.colored_label(ui::theme::STATUS_TEXT, &self.state.status_message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(format!(
                            "{} logs | {} tokens",
                            self.state.logs.len(),
                            self.state.tokens.len()
                        ));
                    });
                });
            });

        // Central panel: the active table
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Logs => ui::panels::logs::render(ui, &mut self.state),
            View::Tokens => ui::panels::tokens::render(ui, &mut self.state),
        });

        // Dispatch everything the panels staged this frame.
        for request in self.state.take_pending() {
            self.worker.submit(request);
        }
    }
}
