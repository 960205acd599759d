use serde::Serialize;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 25;

/// Which page of a result set to return. Pages start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Number of records before this page.
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// Criteria for listing restaurants.
///
/// `names` are OR-combined case-insensitive substrings; `cuisine_type` is a
/// case-insensitive substring. The two groups are AND-ed. An empty `names`
/// list or a missing cuisine means "do not filter on it".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQueryParametersBo {
    pub names: Vec<String>,
    pub cuisine_type: Option<String>,
    pub pagination: Pagination,
}

/// Paging details for a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetaData {
    pub current_page: u64,
    pub page_record_count: u64,
    pub page_size: u64,
    pub total_records: u64,
    pub total_pages: u64,
}

impl PaginationMetaData {
    pub fn new(pagination: Pagination, page_record_count: u64, total_records: u64) -> Self {
        let total_pages = if pagination.page_size == 0 {
            0
        } else {
            total_records.div_ceil(pagination.page_size)
        };
        Self {
            current_page: pagination.page,
            page_record_count,
            page_size: pagination.page_size,
            total_records,
            total_pages,
        }
    }
}

/// One page of results plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PaginationMetaData,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, pagination: Pagination, total_records: u64) -> Self {
        let meta = PaginationMetaData::new(pagination, data.len() as u64, total_records);
        Self { data, meta }
    }
}
