//! Error type for table requests.

use thiserror::Error;

/// Errors returned when requesting a lightness table.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A table parameter was zero. Both the output range and the input range
    /// must be positive.
    #[error("{name} must be a positive integer, got {value}")]
    InvalidArgument {
        /// Parameter name (`max_output` or `max_input`).
        name: &'static str,
        /// The rejected value.
        value: u32,
    },
}

/// Result alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::string::ToString;

    #[test]
    fn test_invalid_argument_message() {
        let err = Error::InvalidArgument {
            name: "max_input",
            value: 0,
        };
        assert_eq!(err.to_string(), "max_input must be a positive integer, got 0");
    }
}
