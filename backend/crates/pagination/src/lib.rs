//! Page-number pagination primitives.
//!
//! Endpoints accept `page` and `page_size` query parameters, slice an ordered
//! collection into a [`Page`], and render a [`PaginatedResponse`] envelope
//! carrying the total `count`, page metadata, and absolute `next`/`previous`
//! links derived from the request URL.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageRequest, PageSizeLimits};
//! use url::Url;
//!
//! let limits = PageSizeLimits::new(2, 10);
//! let request = PageRequest::from_query(Some("2"), None, limits).expect("valid page");
//! let page = request.slice(vec!["a", "b", "c"]).expect("page in range");
//!
//! let url = Url::parse("http://localhost/topics/?page=2").expect("valid url");
//! let envelope = page.into_response(&url);
//! assert_eq!(envelope.count, 3);
//! assert_eq!(envelope.results, vec!["c"]);
//! assert_eq!(envelope.previous.as_deref(), Some("http://localhost/topics/"));
//! assert!(envelope.next.is_none());
//! ```

mod envelope;
mod request;

pub use envelope::{Page, PaginatedResponse};
pub use request::{PageNumber, PageRequest, PageSizeLimits};

/// Name of the query parameter selecting the page number.
pub const PAGE_PARAM: &str = "page";

/// Name of the query parameter selecting the page size.
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// Errors raised while resolving a page request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The `page` parameter was not a positive integer or `last`.
    #[error("page must be a positive integer or \"last\", got {value:?}")]
    InvalidPageNumber {
        /// Raw value supplied by the client.
        value: String,
    },
    /// The requested page lies beyond the final page.
    #[error("page {page} is out of range; {num_pages} page(s) available")]
    PageOutOfRange {
        /// Requested page number.
        page: usize,
        /// Number of pages available for the collection.
        num_pages: usize,
    },
}
