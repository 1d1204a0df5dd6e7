// TokenDeck - tests/console_flow.rs
//
// End-to-end tests for the console's table flows.
//
// These tests drive the real table controllers and application state
// through full operator scenarios: initial load, lazy pagination,
// search and clear-search, sort toggling, token deletion, and the
// overlapping-fetch cases. Backend responses are scripted; everything
// between "response arrives" and "table renders" runs the real code.

use tokendeck::api::worker::ApiRequest;
use tokendeck::app::state::AppState;
use tokendeck::core::model::{Log, LogSortKey, Token, TokenSortKey};
use tokendeck::core::pager::FetchPlan;
use tokendeck::util::constants;

// =============================================================================
// Helpers
// =============================================================================

/// A scripted backend log entry.
fn log(id: i64, created_time: i64, content: &str) -> Log {
    Log {
        id,
        user_id: 1,
        created_time,
        log_type: constants::LOG_TYPE_USAGE,
        content: content.to_string(),
        deleted: false,
    }
}

/// A scripted backend token.
fn token(id: i64, name: &str) -> Token {
    Token {
        id,
        user_id: 1,
        key: format!("{id:032x}"),
        status: constants::TOKEN_STATUS_ENABLED,
        name: name.to_string(),
        created_time: 1_700_000_000 + id,
        accessed_time: 0,
        expired_time: constants::TOKEN_NEVER_EXPIRES,
        remain_quota: 500,
        unlimited_quota: false,
        deleted: false,
    }
}

fn logs(ids: std::ops::Range<i64>) -> Vec<Log> {
    ids.map(|id| log(id, 1_700_000_000 + id, &format!("used quota #{id}"))).collect()
}

fn tokens(ids: std::ops::Range<i64>) -> Vec<Token> {
    ids.map(|id| token(id, &format!("token-{id}"))).collect()
}

/// Unpack a page plan or fail the test.
fn page_plan(plan: FetchPlan) -> (usize, tokendeck::core::pager::FetchTicket) {
    match plan {
        FetchPlan::Page { page, ticket } => (page, ticket),
        other => panic!("expected a page plan, got {other:?}"),
    }
}

// =============================================================================
// Startup and lazy pagination
// =============================================================================

/// The startup sequence: both tables stage a page-0 fetch, and applying
/// the scripted responses fills page 1 of each.
#[test]
fn e2e_startup_loads_first_page_of_both_tables() {
    let mut state = AppState::new(10, Some("admin".to_string()));

    let plan = state.logs.begin_load(0);
    state.request_logs_plan(plan);
    let plan = state.tokens.begin_load(0);
    state.request_tokens_plan(plan);

    let staged = state.take_pending();
    assert_eq!(staged.len(), 2);

    // Script the two responses back in.
    for request in staged {
        match request {
            ApiRequest::LogsPage { page, ticket } => {
                assert!(state.logs.complete_load(ticket, page, logs(1..11)));
            }
            ApiRequest::TokensPage { page, ticket } => {
                assert!(state.tokens.complete_load(ticket, page, tokens(1..6)));
            }
            other => panic!("unexpected request at startup: {other:?}"),
        }
    }

    assert_eq!(state.logs.page_window().len(), 10);
    assert_eq!(state.tokens.page_window().len(), 5);
    assert!(!state.any_loading());

    // 10 logs fill the page exactly, so a gateway page is offered; 5
    // tokens leave a partial page, so the collection is complete.
    assert_eq!(state.logs.total_pages(), 2);
    assert_eq!(state.tokens.total_pages(), 1);
}

/// Paging forward through held data is instant; paging one past it
/// fetches exactly the next unseen backend page and appends.
#[test]
fn e2e_lazy_pagination_appends_one_backend_page_at_a_time() {
    let mut state = AppState::new(10, None);
    let (page, ticket) = page_plan(state.logs.begin_load(0));
    state.logs.complete_load(ticket, page, logs(1..21));

    // Pages 1 and 2 are held: no network.
    assert!(state.logs.page_change(2).is_none());
    assert_eq!(state.logs.active_page(), 2);

    // Page 3 is the gateway: backend page 2 is fetched and appended.
    let plan = state.logs.page_change(3).expect("gateway page must fetch");
    let (page, ticket) = page_plan(plan);
    assert_eq!(page, 2);
    assert!(state.logs.is_loading());

    assert!(state.logs.complete_load(ticket, page, logs(21..28)));
    assert_eq!(state.logs.len(), 27);
    assert_eq!(state.logs.active_page(), 3);
    let ids: Vec<i64> = state.logs.page_window().iter().map(|l| l.id).collect();
    assert_eq!(ids, (21..28).collect::<Vec<_>>());

    // 27 items end in a partial page: no further gateway is offered.
    assert_eq!(state.logs.total_pages(), 3);
}

// =============================================================================
// Search
// =============================================================================

/// Search replaces the collection wholesale; clearing the search
/// reloads backend page 0 and returns the cursor to page 1.
#[test]
fn e2e_search_then_clear_restores_paged_browsing() {
    let mut state = AppState::new(10, None);
    let (page, ticket) = page_plan(state.tokens.begin_load(0));
    state.tokens.complete_load(ticket, page, tokens(1..21));
    state.tokens.page_change(2);

    // Submit a search the way the panel does.
    let plan = state.tokens.begin_search("deploy");
    state.request_tokens_plan(plan);
    let staged = state.take_pending();
    let ticket = match staged.into_iter().next() {
        Some(ApiRequest::TokensSearch { keyword, ticket }) => {
            assert_eq!(keyword, "deploy");
            ticket
        }
        other => panic!("expected a token search, got {other:?}"),
    };

    assert!(state.tokens.complete_search(ticket, tokens(7..9)));
    assert_eq!(state.tokens.len(), 2);
    assert_eq!(state.tokens.active_page(), 1);
    assert_eq!(state.tokens.search_keyword(), "deploy");

    // Clearing the keyword exits search mode via a page-0 reload.
    let plan = state.tokens.begin_search("");
    let (page, ticket) = page_plan(plan);
    assert_eq!(page, 0);
    state.tokens.complete_load(ticket, page, tokens(1..21));
    assert_eq!(state.tokens.len(), 20);
    assert_eq!(state.tokens.active_page(), 1);
    assert_eq!(state.tokens.search_keyword(), "");
}

/// A page response that arrives after a newer search was planned must
/// not clobber the search results.
#[test]
fn e2e_stale_page_response_cannot_clobber_search() {
    let mut state = AppState::new(10, None);
    let (page, ticket) = page_plan(state.logs.begin_load(0));
    state.logs.complete_load(ticket, page, logs(1..11));

    // Operator pages forward, then immediately searches while the page
    // fetch is still in flight.
    let (stale_page, stale_ticket) = page_plan(state.logs.page_change(2).unwrap());
    let plan = state.logs.begin_search("quota");
    let FetchPlan::Search { ticket: search_ticket, .. } = plan else {
        panic!("expected a search plan");
    };

    // The search result lands first.
    assert!(state.logs.complete_search(search_ticket, logs(3..6)));
    assert_eq!(state.logs.len(), 3);

    // The superseded page response is discarded outright.
    assert!(!state.logs.complete_load(stale_ticket, stale_page, logs(11..21)));
    assert_eq!(state.logs.len(), 3, "stale page must not touch search results");
    assert_eq!(state.logs.active_page(), 1);
}

// =============================================================================
// Sorting
// =============================================================================

/// Clicking the same column header twice toggles the direction via the
/// head-id heuristic.
#[test]
fn e2e_double_header_click_toggles_sort_direction() {
    let mut state = AppState::new(10, None);
    let (page, ticket) = page_plan(state.logs.begin_load(0));
    state.logs.complete_load(
        ticket,
        page,
        vec![
            log(1, 100, "older"),
            log(2, 50, "newer"),
        ],
    );

    // Stringified "100" < "50": ascending leaves id 1 at the head, which
    // is where it already was, so the order is reversed.
    state.logs.sort_by(LogSortKey::CreatedTime);
    let ids: Vec<i64> = state.logs.items().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![2, 1]);

    state.logs.sort_by(LogSortKey::CreatedTime);
    let ids: Vec<i64> = state.logs.items().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

/// Sorting by name orders tokens lexically across the whole collection,
/// not just the visible page.
#[test]
fn e2e_sort_covers_all_held_pages() {
    let mut state = AppState::new(10, None);
    let (page, ticket) = page_plan(state.tokens.begin_load(0));
    let mut items = tokens(1..13);
    items[0].name = "zeta".to_string();
    items[11].name = "alpha".to_string();
    state.tokens.complete_load(ticket, page, items);

    state.tokens.sort_by(TokenSortKey::Name);
    assert_eq!(state.tokens.items()[0].name, "alpha");
    assert_eq!(state.tokens.items()[11].name, "zeta");
}

// =============================================================================
// Token mutation
// =============================================================================

/// A confirmed delete tombstones the row: it leaves the page window but
/// the page count stays aligned with what was fetched.
#[test]
fn e2e_deleted_token_vanishes_from_window_but_not_from_page_maths() {
    let mut state = AppState::new(10, None);
    let (page, ticket) = page_plan(state.tokens.begin_load(0));
    state.tokens.complete_load(ticket, page, tokens(1..11));

    // Panel stages the delete; the worker's success event applies it.
    state.request(ApiRequest::DeleteToken { id: 4 });
    let staged = state.take_pending();
    assert!(matches!(staged[0], ApiRequest::DeleteToken { id: 4 }));
    assert!(state.tokens.mark_deleted(4));

    let window_ids: Vec<i64> = state.tokens.page_window().iter().map(|t| t.id).collect();
    assert_eq!(window_ids, vec![1, 2, 3, 5, 6, 7, 8, 9, 10]);
    assert_eq!(state.tokens.len(), 10);
    assert_eq!(state.tokens.total_pages(), 2);
}

/// A status update patches the row in place by id, regardless of where
/// sorting has moved it.
#[test]
fn e2e_status_update_finds_row_after_sorting() {
    let mut state = AppState::new(10, None);
    let (page, ticket) = page_plan(state.tokens.begin_load(0));
    let mut items = tokens(1..6);
    items[2].name = "aaa-first".to_string();
    state.tokens.complete_load(ticket, page, items);

    // Sorting moves id 3 to the head.
    state.tokens.sort_by(TokenSortKey::Name);
    assert_eq!(state.tokens.items()[0].id, 3);

    assert!(state
        .tokens
        .update_item(3, |t| t.status = constants::TOKEN_STATUS_DISABLED));
    let updated = state.tokens.find(3).unwrap();
    assert_eq!(updated.status, constants::TOKEN_STATUS_DISABLED);
}

// =============================================================================
// Failure paths
// =============================================================================

/// A failed gateway fetch leaves the collection untouched; the cursor
/// still advances, leaving an empty page until the operator retries.
#[test]
fn e2e_failed_gateway_fetch_leaves_an_empty_page() {
    let mut state = AppState::new(10, None);
    let (page, ticket) = page_plan(state.logs.begin_load(0));
    state.logs.complete_load(ticket, page, logs(1..11));

    let (_, ticket) = page_plan(state.logs.page_change(2).unwrap());
    assert!(state.logs.fetch_failed(ticket));

    assert_eq!(state.logs.len(), 10);
    assert_eq!(state.logs.active_page(), 2);
    assert!(state.logs.page_window().is_empty());
    assert!(!state.any_loading());

    // Retrying the gateway page works: held_pages is still 1, so page 2
    // remains the gateway.
    let plan = state.logs.page_change(2).expect("retry must fetch again");
    let (page, ticket) = page_plan(plan);
    assert_eq!(page, 1);
    assert!(state.logs.complete_load(ticket, page, logs(11..16)));
    assert_eq!(state.logs.page_window().len(), 5);
}
