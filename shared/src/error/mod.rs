//! Error codes and the API envelope shared by server and clients
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::PaintingNotFound).with_detail("id", "7");
//! let body: ApiResponse<()> = err.into();
//! assert_eq!(body.code, 6001);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult, ErrorDetails};
