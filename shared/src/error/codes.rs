//! Numeric error codes
//!
//! Ranges:
//! - 0xxx: General (validation, rate limiting)
//! - 1xxx: Admin authentication
//! - 6xxx: Painting catalog
//! - 7xxx: Inquiries
//! - 9xxx: System

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code carried in every API error body.
///
/// Serialized as a bare number so clients can switch on it without parsing
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Success = 0,
    NotFound = 3,
    InvalidFormat = 6,
    RequiredField = 7,
    TooManyRequests = 9,

    NotAuthenticated = 1001,
    InvalidCredentials = 1002,

    PaintingNotFound = 6001,
    /// Price is negative or not a number
    PaintingInvalidPrice = 6002,
    /// Id does not match the store key format
    PaintingInvalidId = 6003,
    /// Painting row stored, image rows failed
    PaintingImagesWriteFailed = 6004,
    /// Painting row stored, report row failed
    PaintingReportWriteFailed = 6005,

    /// Email service rejected or failed to deliver the inquiry
    InquiryDeliveryFailed = 7001,

    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    const ALL: [ErrorCode; 15] = [
        ErrorCode::Success,
        ErrorCode::NotFound,
        ErrorCode::InvalidFormat,
        ErrorCode::RequiredField,
        ErrorCode::TooManyRequests,
        ErrorCode::NotAuthenticated,
        ErrorCode::InvalidCredentials,
        ErrorCode::PaintingNotFound,
        ErrorCode::PaintingInvalidPrice,
        ErrorCode::PaintingInvalidId,
        ErrorCode::PaintingImagesWriteFailed,
        ErrorCode::PaintingReportWriteFailed,
        ErrorCode::InquiryDeliveryFailed,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message when no specific one is given
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "OK",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::TooManyRequests => "Too many requests, try again later",

            ErrorCode::NotAuthenticated => "Please sign in to continue",
            ErrorCode::InvalidCredentials => "Invalid email or password",

            ErrorCode::PaintingNotFound => "Painting not found",
            ErrorCode::PaintingInvalidPrice => "Price must be a non-negative number within the allowed maximum",
            ErrorCode::PaintingInvalidId => "Invalid painting id",
            ErrorCode::PaintingImagesWriteFailed => "Painting saved but images could not be stored",
            ErrorCode::PaintingReportWriteFailed => "Painting saved but report could not be stored",

            ErrorCode::InquiryDeliveryFailed => "Error sending message. Please try again.",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A number that is not one of the known codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|code| code.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
