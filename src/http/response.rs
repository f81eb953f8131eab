//! Standard success response envelopes.

use serde::Serialize;

/// Paged list response; `count` is the total number of matching documents,
/// not the length of this page
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub count: usize,
    pub page: usize,
    pub limit: usize,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>, count: usize, page: usize, limit: usize) -> Self {
        Self {
            data,
            count,
            page,
            limit,
        }
    }
}

/// Single record response
#[derive(Debug, Clone, Serialize)]
pub struct SingleResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> SingleResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Delete acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

impl DeleteResponse {
    pub fn success() -> Self {
        Self { deleted: true }
    }
}
