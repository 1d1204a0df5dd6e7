// TokenDeck - core/pager.rs
//
// Incremental paginated list controller — the shared engine behind the
// logs and tokens tables.
//
// The controller owns a growable in-memory collection fetched
// page-by-page from the backend, a 1-based page cursor, a loading flag,
// and a keyword-search mode that replaces the collection wholesale.
// It performs no I/O itself: operations that need the network return a
// `FetchPlan` describing the request, stamped with a generation ticket,
// and the caller feeds the response back through `complete_*`.
// A completion whose ticket is older than the controller's current
// generation is discarded, so out-of-order responses from overlapping
// requests can never clobber newer state.
//
// Deleted items are retained in the collection (tombstoned, filtered
// out of the rendered page window) so the page maths stay aligned with
// what was fetched.

/// An item manageable by `ListPager`.
pub trait PagedItem {
    /// Per-table enumeration of sortable columns.
    type SortKey: Copy + PartialEq;

    /// Backend-assigned stable identifier.
    fn id(&self) -> i64;

    /// True once the item has been tombstoned locally.
    fn is_deleted(&self) -> bool;

    /// Tombstone the item.
    fn set_deleted(&mut self);

    /// Stringified field used for column sorting. Sorting compares these
    /// byte-wise, so numeric columns order as strings ("100" < "50"),
    /// matching the behaviour the tables have always had.
    fn sort_text(&self, key: Self::SortKey) -> String;
}

/// Opaque stamp tying a fetch completion to the `begin_*` call that
/// planned it. Stale tickets are rejected by the `complete_*` methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// A backend request the caller must run on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    /// Fetch backend page `page` (0-based). Page 0 replaces the
    /// collection; later pages append to its tail.
    Page { page: usize, ticket: FetchTicket },

    /// Fetch the flat keyword-search result list.
    Search { keyword: String, ticket: FetchTicket },
}

/// Paginated, searchable, sortable list controller. One instance per
/// entity table; instances share nothing.
#[derive(Debug)]
pub struct ListPager<T> {
    items: Vec<T>,
    /// Current UI page, 1-based.
    active_page: usize,
    page_size: usize,
    loading: bool,
    search_keyword: String,
    searching: bool,
    /// Bumped by every `begin_*`; completions must match it.
    generation: u64,
    /// UI page to advance to once the in-flight fetch settles.
    pending_page: Option<usize>,
}

impl<T: PagedItem> ListPager<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            active_page: 1,
            page_size,
            loading: false,
            search_keyword: String::new(),
            searching: false,
            generation: 0,
            pending_page: None,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_page(&self) -> usize {
        self.active_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// The keyword of the active search, empty outside search mode.
    pub fn search_keyword(&self) -> &str {
        &self.search_keyword
    }

    /// Look up an item by its backend id.
    pub fn find(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Number of pages fully or partially covered by the local collection.
    pub fn held_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    /// Pages offered to the pagination control. When every held page is
    /// full there may be more data on the server, so one extra page is
    /// offered as the gateway to the next fetch; a partial tail page
    /// means the collection is complete and nothing is added.
    pub fn total_pages(&self) -> usize {
        let extra = usize::from(self.items.len() % self.page_size == 0);
        self.held_pages() + extra
    }

    /// The rows rendered for the current page: the slice
    /// `[(active_page-1)*page_size, active_page*page_size)` with
    /// tombstoned items filtered out.
    pub fn page_window(&self) -> Vec<&T> {
        let start = (self.active_page - 1) * self.page_size;
        if start >= self.items.len() {
            return Vec::new();
        }
        let end = (start + self.page_size).min(self.items.len());
        self.items[start..end]
            .iter()
            .filter(|item| !item.is_deleted())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Fetch planning
    // -------------------------------------------------------------------------

    fn next_ticket(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Plan a fetch of backend page `page`. Page 0 will replace the
    /// collection on completion; later pages append.
    pub fn begin_load(&mut self, page: usize) -> FetchPlan {
        let ticket = self.next_ticket();
        self.loading = true;
        FetchPlan::Page { page, ticket }
    }

    /// Plan a reload of the first backend page without moving the page
    /// cursor (the Refresh button).
    pub fn refresh(&mut self) -> FetchPlan {
        self.begin_load(0)
    }

    /// Move to `new_page`. Pages already covered by the local collection
    /// switch instantly with no network traffic; paging one past the
    /// held data plans a fetch of exactly the next unseen backend page
    /// and defers the cursor move until that fetch settles.
    pub fn page_change(&mut self, new_page: usize) -> Option<FetchPlan> {
        if new_page == 0 {
            return None;
        }
        if new_page == self.held_pages() + 1 {
            self.pending_page = Some(new_page);
            Some(self.begin_load(new_page - 1))
        } else {
            self.active_page = new_page;
            None
        }
    }

    /// Plan a keyword search. An empty (or whitespace) keyword exits
    /// search mode: it reloads backend page 0 and the cursor returns to
    /// page 1 when that load settles.
    pub fn begin_search(&mut self, keyword: &str) -> FetchPlan {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.searching = false;
            self.search_keyword.clear();
            self.pending_page = Some(1);
            return self.begin_load(0);
        }
        self.search_keyword = keyword.to_string();
        self.searching = true;
        let ticket = self.next_ticket();
        FetchPlan::Search {
            keyword: keyword.to_string(),
            ticket,
        }
    }

    // -------------------------------------------------------------------------
    // Fetch completion
    // -------------------------------------------------------------------------

    fn is_stale(&self, ticket: FetchTicket) -> bool {
        ticket.generation != self.generation
    }

    /// Apply a successful page fetch. Returns false (and changes
    /// nothing) when the ticket is stale.
    pub fn complete_load(&mut self, ticket: FetchTicket, page: usize, items: Vec<T>) -> bool {
        if self.is_stale(ticket) {
            return false;
        }
        if page == 0 {
            self.items = items;
        } else {
            self.items.extend(items);
        }
        self.loading = false;
        if let Some(p) = self.pending_page.take() {
            self.active_page = p;
        }
        true
    }

    /// Apply a successful search fetch: the result list replaces the
    /// collection wholesale and the cursor returns to page 1. Search
    /// results are flat and fully loaded; paging over them is purely
    /// client-side. Returns false when the ticket is stale.
    pub fn complete_search(&mut self, ticket: FetchTicket, items: Vec<T>) -> bool {
        if self.is_stale(ticket) {
            return false;
        }
        self.items = items;
        self.active_page = 1;
        self.searching = false;
        self.pending_page = None;
        true
    }

    /// Record a failed fetch: flags are cleared and the collection is
    /// left exactly as it was. The deferred cursor move still happens,
    /// leaving an empty page window until the operator retries.
    /// Returns false when the ticket is stale.
    pub fn fetch_failed(&mut self, ticket: FetchTicket) -> bool {
        if self.is_stale(ticket) {
            return false;
        }
        self.loading = false;
        self.searching = false;
        if let Some(p) = self.pending_page.take() {
            self.active_page = p;
        }
        true
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Sort the whole collection by the stringified column `key`.
    ///
    /// Direction toggling uses the head-id heuristic the tables have
    /// always used: if sorting left the same item at the head, the order
    /// is reversed. This flips an already-ascending column to descending
    /// without explicit direction state, at the cost of being wrong when
    /// an unsorted order coincidentally shares its head with the
    /// ascending one.
    pub fn sort_by(&mut self, key: T::SortKey) {
        if self.items.is_empty() {
            return;
        }
        let previous_head = self.items[0].id();
        self.items
            .sort_by(|a, b| a.sort_text(key).cmp(&b.sort_text(key)));
        if self.items[0].id() == previous_head {
            self.items.reverse();
        }
    }

    // -------------------------------------------------------------------------
    // Mutation (always keyed by stable id, never by row position)
    // -------------------------------------------------------------------------

    /// Patch the item with backend id `id` in place. Returns false when
    /// no such item is held.
    pub fn update_item(&mut self, id: i64, patch: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                patch(item);
                true
            }
            None => false,
        }
    }

    /// Tombstone the item with backend id `id`. The item stays in the
    /// collection for pagination purposes but leaves the page window.
    pub fn mark_deleted(&mut self, id: i64) -> bool {
        self.update_item(id, |item| item.set_deleted())
    }
}

// =============================================================================
// Unit tests
// =============================================================================
