//! Fixed-size pages over a filtered collection

use serde::Serialize;

use crate::error::{Error, Result};

pub const PAGE_SIZES: [usize; 3] = [10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_count: usize,
}

/// `ceil(len / page_size)`; an empty collection has no pages.
pub fn page_count(len: usize, page_size: usize) -> Result<usize> {
    if page_size == 0 {
        return Err(Error::InvalidPageSize);
    }
    Ok(len.div_ceil(page_size))
}

/// Items of the 1-based `page`. Pages past the end are empty.
pub fn paginate<T: Clone>(filtered: &[T], page: usize, page_size: usize) -> Result<Page<T>> {
    let page_count = page_count(filtered.len(), page_size)?;
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(filtered.len());
    let end = start.saturating_add(page_size).min(filtered.len());

    Ok(Page {
        items: filtered[start..end].to_vec(),
        page,
        page_count,
    })
}

/// Current page and page size of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize);
        }
        Ok(Self { page: 1, page_size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Changing the page size always goes back to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize);
        }
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Moves to `page` if it exists for `len` items. Page 1 always exists.
    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        let last = len.div_ceil(self.page_size).max(1);
        if page == 0 || page > last {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next(&mut self, len: usize) -> bool {
        self.go_to(self.page + 1, len)
    }

    pub fn previous(&mut self, len: usize) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.go_to(self.page - 1, len)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.page < len.div_ceil(self.page_size)
    }

    pub fn slice<T: Clone>(&self, filtered: &[T]) -> Page<T> {
        let start = ((self.page - 1) * self.page_size).min(filtered.len());
        let end = (start + self.page_size).min(filtered.len());
        Page {
            items: filtered[start..end].to_vec(),
            page: self.page,
            page_count: filtered.len().div_ceil(self.page_size),
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
