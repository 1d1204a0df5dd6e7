// TokenDeck - ui/panels/mod.rs

pub mod logs;
pub mod tokens;

use crate::core::pager::{ListPager, PagedItem};

/// Pagination control outcome for one frame.
pub(crate) enum PagerAction {
    Refresh,
    GoTo(usize),
}

/// Render the shared pagination row: Refresh, Prev, "Page X of Y", Next,
/// and a spinner while a fetch is in flight. Returns the clicked action,
/// if any; the caller feeds it through the pager and stages the fetch.
pub(crate) fn pagination_row<T: PagedItem>(
    ui: &mut egui::Ui,
    pager: &ListPager<T>,
) -> Option<PagerAction> {
    let mut action = None;
    let page = pager.active_page();
    let total = pager.total_pages();
    let busy = pager.is_loading() || pager.is_searching();

    ui.horizontal(|ui| {
        if ui.button("Refresh").clicked() {
            action = Some(PagerAction::Refresh);
        }
        ui.separator();
        if ui
            .add_enabled(page > 1 && !busy, egui::Button::new("◀ Prev"))
            .clicked()
        {
            action = Some(PagerAction::GoTo(page - 1));
        }
        ui.label(format!("Page {page} of {total}"));
        if ui
            .add_enabled(page < total && !busy, egui::Button::new("Next ▶"))
            .clicked()
        {
            action = Some(PagerAction::GoTo(page + 1));
        }
        if busy {
            ui.spinner();
        }
    });

    action
}
