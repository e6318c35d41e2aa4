//! Page-number pagination for list endpoints.

use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::utils::urls;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

/// A validated page position within a collection of `count` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
    pub num_pages: u32,
}

impl PageRequest {
    /// `page` may be a 1-based number or `last`; anything past the end is rejected,
    /// except page 1 of an empty collection.
    pub fn resolve(page: Option<&str>, size: u32, count: i64) -> Result<Self, ApiError> {
        let size = size.max(1);
        let count = count.max(0) as u64;
        let num_pages = (count.div_ceil(size as u64)).max(1) as u32;

        let number = match page.map(str::trim) {
            None | Some("") => 1,
            Some("last") => num_pages,
            Some(raw) => raw.parse::<u32>().map_err(|_| ApiError::InvalidPage)?,
        };

        if number == 0 || number > num_pages {
            return Err(ApiError::InvalidPage);
        }

        Ok(PageRequest { number, size, num_pages })
    }

    pub fn limit(&self) -> i64 {
        self.size as i64
    }

    pub fn offset(&self) -> i64 {
        (self.number as i64 - 1) * self.size as i64
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(req: &HttpRequest, request: PageRequest, count: i64, results: Vec<T>) -> Self {
        let base = urls::absolute(req, req.path());

        let next = request
            .has_next()
            .then(|| format!("{base}?page={}", request.number + 1));

        let previous = request.has_previous().then(|| match request.number - 1 {
            1 => base.clone(),
            n => format!("{base}?page={n}"),
        });

        Page { count, next, previous, results }
    }
}
