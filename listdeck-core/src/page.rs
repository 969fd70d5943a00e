//! Pagination state.

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// 1-based pagination state. `total` is authoritative from the server and
/// written only by the fetch cycle; `page_num`/`page_size` are UI-driven.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub page_num: u64,
    pub page_size: u64,
    pub total: u64,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            page_num: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
        }
    }

    /// The request-facing part of the state, without `total`.
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            page_num: self.page_num,
            page_size: self.page_size,
        }
    }

    pub fn reset(&mut self) {
        self.page_num = 1;
    }

    pub fn set_page_num(&mut self, page_num: u64) {
        self.page_num = page_num.max(1);
    }

    pub fn set_page_size(&mut self, page_size: u64) {
        self.page_size = page_size.max(1);
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the query merger injects as `pageNum`/`pageSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSnapshot {
    pub page_num: u64,
    pub page_size: u64,
}
