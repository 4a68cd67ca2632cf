use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MissingVar { name: &'static str },
    TooManyRecipients { max: usize, actual: usize },
    InvalidPhoneNumber { input: String },
    InvalidTemplateParam { reason: String },
    InvalidSendDate { input: String },
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        actual: u32,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MissingVar { name } => write!(f, "environment variable {name} is not set"),
            Self::TooManyRecipients { max, actual } => {
                write!(f, "too many recipients: {actual} (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidTemplateParam { reason } => {
                write!(f, "invalid template parameters: {reason}")
            }
            Self::InvalidSendDate { input } => {
                write!(f, "invalid send date: {input} (expected yyyyMMdd)")
            }
            Self::OutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(
                f,
                "{field} out of range: {actual} (expected {min}..={max})"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "SignName" };
        assert_eq!(err.to_string(), "SignName must not be empty");

        let err = ValidationError::MissingVar {
            name: "DYSMS_ACCESS_KEY_ID",
        };
        assert_eq!(
            err.to_string(),
            "environment variable DYSMS_ACCESS_KEY_ID is not set"
        );

        let err = ValidationError::TooManyRecipients {
            max: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "too many recipients: 3 (max 2)");

        let err = ValidationError::InvalidSendDate {
            input: "2017-07-18".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid send date: 2017-07-18 (expected yyyyMMdd)"
        );

        let err = ValidationError::OutOfRange {
            field: "PageSize",
            min: 1,
            max: 50,
            actual: 51,
        };
        assert_eq!(err.to_string(), "PageSize out of range: 51 (expected 1..=50)");
    }
}
