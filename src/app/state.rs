// TokenDeck - app/state.rs
//
// Application state management. Holds the two paginated table
// controllers, the panel input buffers, and the queue of API requests
// that panels stage for the gui loop to dispatch to the worker.
// Owned by the eframe::App implementation.

use crate::api::worker::ApiRequest;
use crate::core::model::{Log, Token};
use crate::core::pager::{FetchPlan, ListPager};

/// Which table the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Logs,
    Tokens,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Active central-panel view.
    pub view: View,

    /// Usage-log table controller.
    pub logs: ListPager<Log>,

    /// Token table controller.
    pub tokens: ListPager<Token>,

    /// Search box contents (not yet submitted) per table.
    pub log_search_input: String,
    pub token_search_input: String,

    /// Name for the next token to create.
    pub new_token_name: String,

    /// Status message for the status bar.
    pub status_message: String,

    /// Display name of the signed-in operator, if one was provided.
    pub user_label: Option<String>,

    /// Set once logout succeeds; the gui swaps to a signed-out screen.
    pub signed_out: bool,

    /// Requests staged by panels this frame; drained by the gui loop
    /// into the background worker.
    pending: Vec<ApiRequest>,
}

impl AppState {
    /// Create initial state. `page_size` is shared by both tables and
    /// must match the backend's page size.
    pub fn new(page_size: usize, user_label: Option<String>) -> Self {
        Self {
            view: View::Logs,
            logs: ListPager::new(page_size),
            tokens: ListPager::new(page_size),
            log_search_input: String::new(),
            token_search_input: String::new(),
            new_token_name: String::new(),
            status_message: "Loading...".to_string(),
            user_label,
            signed_out: false,
            pending: Vec::new(),
        }
    }

    /// Stage a request for the gui loop to submit this frame.
    pub fn request(&mut self, request: ApiRequest) {
        self.pending.push(request);
    }

    /// Take everything staged so far.
    pub fn take_pending(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.pending)
    }

    /// True while either table has a fetch in flight.
    pub fn any_loading(&self) -> bool {
        self.logs.is_loading()
            || self.logs.is_searching()
            || self.tokens.is_loading()
            || self.tokens.is_searching()
    }

    /// Stage the backend request for a logs-table fetch plan.
    pub fn request_logs_plan(&mut self, plan: FetchPlan) {
        let request = match plan {
            FetchPlan::Page { page, ticket } => ApiRequest::LogsPage { page, ticket },
            FetchPlan::Search { keyword, ticket } => ApiRequest::LogsSearch { keyword, ticket },
        };
        self.request(request);
    }

    /// Stage the backend request for a tokens-table fetch plan.
    pub fn request_tokens_plan(&mut self, plan: FetchPlan) {
        let request = match plan {
            FetchPlan::Page { page, ticket } => ApiRequest::TokensPage { page, ticket },
            FetchPlan::Search { keyword, ticket } => ApiRequest::TokensSearch { keyword, ticket },
        };
        self.request(request);
    }

    /// Clipboard payload for a token's key: the stored key exactly as
    /// the backend holds it, with nothing added. The backend matches
    /// the credential verbatim, so any decoration would make the copied
    /// value unusable. Updates the status bar on success.
    pub fn copy_token_key(&mut self, id: i64) -> Option<String> {
        let token = self.tokens.find(id)?;
        let payload = token.key.clone();
        self.status_message = format!("Copied key for token '{}'", token.display_name());
        Some(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_requests_are_drained_once() {
        let mut state = AppState::new(10, None);
        let plan = state.logs.begin_load(0);
        state.request_logs_plan(plan);
        let plan = state.tokens.begin_load(0);
        state.request_tokens_plan(plan);

        let drained = state.take_pending();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], ApiRequest::LogsPage { page: 0, .. }));
        assert!(matches!(drained[1], ApiRequest::TokensPage { page: 0, .. }));
        assert!(state.take_pending().is_empty());
    }

    #[test]
    fn test_copied_key_is_the_stored_key_verbatim() {
        use crate::util::constants;

        let mut state = AppState::new(10, None);
        let plan = state.tokens.begin_load(0);
        let FetchPlan::Page { page, ticket } = plan else {
            panic!("expected a page plan");
        };
        state.tokens.complete_load(
            ticket,
            page,
            vec![crate::core::model::Token {
                id: 1,
                user_id: 1,
                key: "0123456789abcdef0123456789abcdef".to_string(),
                status: constants::TOKEN_STATUS_ENABLED,
                name: String::new(),
                created_time: 0,
                accessed_time: 0,
                expired_time: constants::TOKEN_NEVER_EXPIRES,
                remain_quota: 0,
                unlimited_quota: true,
                deleted: false,
            }],
        );

        // The backend looks the credential up by exact match, so the
        // clipboard payload must be the key column value with no
        // prefix or suffix.
        let payload = state.copy_token_key(1).expect("token is held");
        assert_eq!(payload, "0123456789abcdef0123456789abcdef");
        assert!(state.copy_token_key(42).is_none());
    }

    #[test]
    fn test_search_plan_maps_to_search_request() {
        let mut state = AppState::new(10, None);
        let plan = state.tokens.begin_search("deploy");
        state.request_tokens_plan(plan);
        let drained = state.take_pending();
        match &drained[0] {
            ApiRequest::TokensSearch { keyword, .. } => assert_eq!(keyword, "deploy"),
            other => panic!("expected a search request, got {other:?}"),
        }
    }
}
