//! HTTP status for each error code

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::NotFound | Self::PaintingNotFound => StatusCode::NOT_FOUND,
            Self::NotAuthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            // upstream email service
            Self::InquiryDeliveryFailed => StatusCode::BAD_GATEWAY,
            Self::InternalError
            | Self::DatabaseError
            | Self::PaintingImagesWriteFailed
            | Self::PaintingReportWriteFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidFormat
            | Self::RequiredField
            | Self::PaintingInvalidPrice
            | Self::PaintingInvalidId => StatusCode::BAD_REQUEST,
        }
    }
}
