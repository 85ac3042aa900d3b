//! Data transfer objects.

mod request_dto;

pub use request_dto::{DispatchRequest, DownloadRequest, DownloadResponse};
