use std::io;

/// Rejection of a due-date string at the input boundary.
///
/// An empty input is not an error; it means "no schedule".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("expected a date in YYYY-MM-DD form, got '{input}'")]
    Malformed { input: String },

    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid milestone '{title}': {reason}")]
    InvalidRule { title: String, reason: String },
}

pub type TableResult<T> = Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_echoes_input() {
        let err = InputError::Malformed {
            input: "next tuesday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "expected a date in YYYY-MM-DD form, got 'next tuesday'"
        );
    }

    #[test]
    fn invalid_date_is_zero_padded() {
        let err = InputError::InvalidDate {
            year: 2026,
            month: 2,
            day: 30,
        };
        assert_eq!(err.to_string(), "2026-02-30 is not a calendar date");
    }

    #[test]
    fn table_error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<TableError>();
        assert_impl::<InputError>();
    }
}
