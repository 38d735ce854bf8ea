//! Page slices and the serialised pagination envelope.

use serde::Serialize;
use url::Url;

use crate::PAGE_PARAM;

/// One page of an ordered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    number: usize,
    size: usize,
    count: usize,
}

impl<T> Page<T> {
    pub(crate) fn new(items: Vec<T>, number: usize, size: usize, count: usize) -> Self {
        Self {
            items,
            number,
            size,
            count,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// 1-based page number.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Number of pages; an empty collection still has one (empty) page.
    #[must_use]
    pub fn num_pages(&self) -> usize {
        self.count.div_ceil(self.size).max(1)
    }

    /// Zero-based offset of the first item on this page.
    #[must_use]
    pub const fn start(&self) -> usize {
        (self.number - 1) * self.size
    }

    /// Whether a following page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages()
    }

    /// Whether a preceding page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Transform the items while keeping page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            count: self.count,
        }
    }

    /// Render the envelope, deriving navigation links from `request_url`.
    #[must_use]
    pub fn into_response(self, request_url: &Url) -> PaginatedResponse<T> {
        let next = self
            .has_next()
            .then(|| link_to_page(request_url, self.number + 1));
        let previous = self
            .has_previous()
            .then(|| link_to_page(request_url, self.number - 1));
        PaginatedResponse {
            count: self.count,
            num_pages: self.num_pages(),
            current_page: self.number,
            start: self.start(),
            next,
            previous,
            results: self.items,
        }
    }
}

/// Serialised pagination envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginatedResponse<T> {
    /// Total number of items across all pages.
    pub count: usize,
    /// Number of pages available.
    pub num_pages: usize,
    /// 1-based index of the returned page.
    pub current_page: usize,
    /// Zero-based offset of the first result.
    pub start: usize,
    /// Absolute link to the next page, if any.
    pub next: Option<String>,
    /// Absolute link to the previous page, if any.
    pub previous: Option<String>,
    /// Items on the returned page.
    pub results: Vec<T>,
}

fn link_to_page(request_url: &Url, page: usize) -> String {
    let retained: Vec<(String, String)> = request_url
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut link = request_url.clone();
    link.set_query(None);
    if page > 1 || !retained.is_empty() {
        let mut pairs = link.query_pairs_mut();
        pairs.extend_pairs(retained.iter());
        if page > 1 {
            pairs.append_pair(PAGE_PARAM, &page.to_string());
        }
    }
    link.to_string()
}
