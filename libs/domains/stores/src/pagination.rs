use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{StoreError, StoreResult};

/// Largest LIMIT/OFFSET Postgres accepts (`BIGINT`)
const MAX_WINDOW: u64 = i64::MAX as u64;

/// Offset/limit window for one page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub page: u64,
    pub offset: u64,
}

/// One page of results plus navigation metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub limit: u64,
    pub page: u64,
    /// Next page number, or 0 on the last page
    pub next_page: u64,
    pub total_data: u64,
    pub total_pages: u64,
    pub data: Vec<T>,
}

impl Pagination {
    /// Pages are 1-based; page 0 is treated as page 1.
    ///
    /// Both `limit` and the resulting offset must fit a Postgres `BIGINT`.
    pub fn new(limit: u64, page: u64) -> StoreResult<Self> {
        if limit == 0 {
            return Err(StoreError::BadRequest(
                "limit must be greater than zero".to_string(),
            ));
        }
        if limit > MAX_WINDOW {
            return Err(StoreError::BadRequest("limit is too large".to_string()));
        }

        let page = page.max(1);
        let offset = (page - 1)
            .checked_mul(limit)
            .filter(|offset| *offset <= MAX_WINDOW)
            .ok_or_else(|| StoreError::BadRequest("page is out of range".to_string()))?;

        Ok(Self {
            limit,
            page,
            offset,
        })
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }

    pub fn set_data<T>(&self, data: Vec<T>, total: u64) -> Paginated<T> {
        let total_pages = self.total_pages(total);
        let next_page = if total_pages > self.page { self.page + 1 } else { 0 };

        Paginated {
            limit: self.limit,
            page: self.page,
            next_page,
            total_data: total,
            total_pages,
            data,
        }
    }
}
