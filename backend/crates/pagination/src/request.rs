//! Parsing of `page` / `page_size` query parameters.

use crate::{Page, PaginationError};

/// Default and maximum page sizes applied to incoming requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeLimits {
    default_size: usize,
    max_size: usize,
}

impl PageSizeLimits {
    /// Build limits, clamping both values to at least one item per page and
    /// keeping the default within the maximum.
    #[must_use]
    pub fn new(default_size: usize, max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            default_size: default_size.clamp(1, max_size),
            max_size,
        }
    }

    /// Page size used when the client does not supply a valid one.
    #[must_use]
    pub const fn default_size(&self) -> usize {
        self.default_size
    }

    /// Largest page size a client may request.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    fn resolve(self, raw: Option<&str>) -> usize {
        raw.and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
            .map_or(self.default_size, |size| size.min(self.max_size))
    }
}

impl Default for PageSizeLimits {
    fn default() -> Self {
        Self::new(10, 100)
    }
}

/// Page selector parsed from the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    /// A 1-based page index.
    Number(usize),
    /// The final page of the collection.
    Last,
}

impl PageNumber {
    fn parse(raw: Option<&str>) -> Result<Self, PaginationError> {
        let Some(raw) = raw else {
            return Ok(Self::Number(1));
        };
        let value = raw.trim();
        if value == "last" {
            return Ok(Self::Last);
        }
        match value.parse::<usize>() {
            Ok(number) if number > 0 => Ok(Self::Number(number)),
            _ => Err(PaginationError::InvalidPageNumber {
                value: raw.to_owned(),
            }),
        }
    }
}

/// Validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: PageNumber,
    size: usize,
}

impl PageRequest {
    /// Parse raw query values into a page request.
    ///
    /// An invalid or zero `page_size` falls back to the configured default;
    /// sizes above the maximum are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPageNumber`] when `page` is neither a
    /// positive integer nor `last`.
    pub fn from_query(
        page: Option<&str>,
        page_size: Option<&str>,
        limits: PageSizeLimits,
    ) -> Result<Self, PaginationError> {
        Ok(Self {
            number: PageNumber::parse(page)?,
            size: limits.resolve(page_size),
        })
    }

    /// Requested page selector.
    #[must_use]
    pub const fn number(&self) -> PageNumber {
        self.number
    }

    /// Effective page size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Slice an ordered collection into the requested page.
    ///
    /// The first page of an empty collection is valid and empty.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::PageOutOfRange`] when the page lies beyond
    /// the final page.
    pub fn slice<T>(self, items: Vec<T>) -> Result<Page<T>, PaginationError> {
        let count = items.len();
        let num_pages = count.div_ceil(self.size).max(1);
        let number = match self.number {
            PageNumber::Number(number) => number,
            PageNumber::Last => num_pages,
        };
        if number > num_pages {
            return Err(PaginationError::PageOutOfRange {
                page: number,
                num_pages,
            });
        }

        let start = (number - 1) * self.size;
        let results = items.into_iter().skip(start).take(self.size).collect();
        Ok(Page::new(results, number, self.size, count))
    }
}
