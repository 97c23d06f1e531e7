/// Lifecycle of a page's data slot.
///
/// Every container starts in `Loading`, issues its fetch, and lands in
/// `Ready` (items present), `Empty` (successful fetch, zero items) or
/// `Error` (fetch failed; lists degrade to "no data" rather than a
/// blocking banner). Input changes send the container back to `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Ready,
    Empty,
    Error,
}

/// Stale-response guard for a container's fetches.
///
/// Each issued fetch takes a sequence number; a response is applied only if
/// its number is still the latest issued. A slow superseded response is
/// discarded instead of overwriting newer state.
#[derive(Debug, Default)]
pub struct FetchGate {
    latest: u64,
}

impl FetchGate {
    /// Claim a sequence number for a fetch about to be issued
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether a response tagged with `seq` may still be applied
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

/// Page/offset arithmetic for a fixed-size paginated list.
///
/// Pages are 1-based. `total_pages = ceil(total / page_size)`; navigation is
/// clamped so the current page never leaves `[1, total_pages]`.
#[derive(Debug, Clone)]
pub struct Paginator {
    page: u32,
    page_size: u32,
    total: u64,
}

impl Paginator {
    /// Create a paginator on page 1 with an unknown total
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            total: 0,
        }
    }

    /// Current 1-based page
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Fixed number of items per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Total item count reported by the last successful fetch
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages implied by the current total
    pub fn total_pages(&self) -> u32 {
        self.total.div_ceil(u64::from(self.page_size)) as u32
    }

    /// Offset of the current page's first item
    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.page_size
    }

    /// Record the total item count from a fetch
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// Return to page 1 (filter and sort changes)
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Jump straight to `page` before the total is known. The caller is
    /// expected to clamp with [`Paginator::set_page`] once a fetch has
    /// reported the total.
    pub fn force_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Move to `page`, clamped into range. Returns true if the page changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        let clamped = page.clamp(1, self.total_pages().max(1));
        if clamped == self.page {
            return false;
        }
        self.page = clamped;
        true
    }

    /// Whether the previous-page control is usable
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether the next-page control is usable
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}
