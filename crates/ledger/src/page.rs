use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::transaction::TransactionRecord;

/// One-based page request over the transaction log.
///
/// Only constructible through [`PageRequest::new`], so `page` and `items` are
/// always at least 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: usize,
    items: usize,
}

#[derive(Deserialize)]
struct RawPageRequest {
    page: usize,
    items: usize,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = LedgerError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.items)
    }
}

impl PageRequest {
    pub fn new(page: usize, items: usize) -> Result<Self, LedgerError> {
        if page == 0 {
            return Err(LedgerError::InvalidPage("page must be at least 1".to_string()));
        }
        if items == 0 {
            return Err(LedgerError::InvalidPage("items must be at least 1".to_string()));
        }
        Ok(Self { page, items })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn items(&self) -> usize {
        self.items
    }

    /// Index of the first record on this page, or `None` if it overflows.
    pub fn offset(&self) -> Option<usize> {
        self.page.checked_sub(1)?.checked_mul(self.items)
    }
}

/// A slice of the log plus the full log length at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub items: Vec<TransactionRecord>,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
}
