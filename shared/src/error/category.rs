//! Error categories by code range

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// 0xxx and anything unassigned
    General,
    /// 1xxx
    Auth,
    /// 6xxx
    Painting,
    /// 7xxx
    Inquiry,
    /// 9xxx
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            1000..2000 => Self::Auth,
            6000..7000 => Self::Painting,
            7000..8000 => Self::Inquiry,
            9000.. => Self::System,
            _ => Self::General,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
