//! Use case implementations.

mod download_use_case;
mod send_request_use_case;

pub use download_use_case::DownloadUseCase;
pub use send_request_use_case::SendRequestUseCase;
