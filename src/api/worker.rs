// TokenDeck - api/worker.rs
//
// Background request execution. Each submitted request runs on its own
// short-lived thread and reports exactly one `ApiEvent` back over an
// mpsc channel that the UI polls once per frame.
//
// Overlapping requests are allowed and never cancelled; ordering is
// resolved downstream by the pager's generation tickets, so a late
// response for a superseded fetch is simply discarded when applied.

use crate::api::client::ApiClient;
use crate::core::model::{Log, Token};
use crate::core::pager::FetchTicket;
use crate::util::error::ApiError;
use std::sync::{mpsc, Arc};

/// A backend call to run off the UI thread.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    LogsPage { page: usize, ticket: FetchTicket },
    LogsSearch { keyword: String, ticket: FetchTicket },
    TokensPage { page: usize, ticket: FetchTicket },
    TokensSearch { keyword: String, ticket: FetchTicket },
    CreateToken { name: String },
    SetTokenStatus { id: i64, status: i32 },
    DeleteToken { id: i64 },
    Logout,
}

/// Completion message for a submitted request.
#[derive(Debug)]
pub enum ApiEvent {
    LogsLoaded {
        page: usize,
        ticket: FetchTicket,
        result: Result<Vec<Log>, ApiError>,
    },
    LogsSearched {
        ticket: FetchTicket,
        result: Result<Vec<Log>, ApiError>,
    },
    TokensLoaded {
        page: usize,
        ticket: FetchTicket,
        result: Result<Vec<Token>, ApiError>,
    },
    TokensSearched {
        ticket: FetchTicket,
        result: Result<Vec<Token>, ApiError>,
    },
    TokenCreated {
        result: Result<(), ApiError>,
    },
    /// Carries the updated token returned by the backend.
    TokenStatusSet {
        id: i64,
        result: Result<Token, ApiError>,
    },
    TokenDeleted {
        id: i64,
        result: Result<(), ApiError>,
    },
    LoggedOut {
        result: Result<(), ApiError>,
    },
}

/// Runs API requests on background threads and collects their events.
pub struct ApiWorker {
    client: Arc<ApiClient>,
    events_tx: mpsc::Sender<ApiEvent>,
    events_rx: mpsc::Receiver<ApiEvent>,
}

impl ApiWorker {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            client,
            events_tx,
            events_rx,
        }
    }

    /// Run `request` on a background thread. The completion event
    /// arrives via `poll_events` on a later frame.
    pub fn submit(&self, request: ApiRequest) {
        tracing::debug!(?request, "Submitting API request");
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        std::thread::spawn(move || {
            let event = run_request(&client, request);
            // Receiver dropped means the UI is gone; exit quietly.
            let _ = tx.send(event);
        });
    }

    /// Drain all pending completion events without blocking.
    pub fn poll_events(&self) -> Vec<ApiEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Execute one request against the client and wrap the outcome.
fn run_request(client: &ApiClient, request: ApiRequest) -> ApiEvent {
    match request {
        ApiRequest::LogsPage { page, ticket } => ApiEvent::LogsLoaded {
            page,
            ticket,
            result: client.logs_page(page),
        },
        ApiRequest::LogsSearch { keyword, ticket } => ApiEvent::LogsSearched {
            ticket,
            result: client.search_logs(&keyword),
        },
        ApiRequest::TokensPage { page, ticket } => ApiEvent::TokensLoaded {
            page,
            ticket,
            result: client.tokens_page(page),
        },
        ApiRequest::TokensSearch { keyword, ticket } => ApiEvent::TokensSearched {
            ticket,
            result: client.search_tokens(&keyword),
        },
        ApiRequest::CreateToken { name } => ApiEvent::TokenCreated {
            result: client.create_token(&name),
        },
        ApiRequest::SetTokenStatus { id, status } => ApiEvent::TokenStatusSet {
            id,
            result: client.update_token_status(id, status),
        },
        ApiRequest::DeleteToken { id } => ApiEvent::TokenDeleted {
            id,
            result: client.delete_token(id),
        },
        ApiRequest::Logout => ApiEvent::LoggedOut {
            result: client.logout(),
        },
    }
}
