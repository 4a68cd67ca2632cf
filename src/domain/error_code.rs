/// Message returned by [`code_to_message`] for codes missing from the table.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Error codes documented by the SMS API.
///
/// Unknown codes stay as plain strings on the error and return `None` from
/// [`KnownErrorCode::from_code`].
pub enum KnownErrorCode {
    OutOfService,
    ProductUnsubscribed,
    AccountNotExists,
    AccountAbnormal,
    TemplateIllegal,
    SignatureIllegal,
    MobileNumberIllegal,
    MobileCountOverLimit,
    TemplateMissingParameters,
    InvalidParameters,
    BusinessLimitControl,
    DayLimitControl,
    MonthLimitControl,
    InvalidJsonParam,
    BlackKeyControlLimit,
    ParamNotSupportUrl,
    ParamLengthLimit,
    AmountNotEnough,
    SystemError,
    RamPermissionDenied,
    SignatureDoesNotMatch,
    SignatureNonceUsed,
    TimestampExpired,
    AccessKeyIdNotFound,
}

impl KnownErrorCode {
    const ALL: [Self; 24] = [
        Self::OutOfService,
        Self::ProductUnsubscribed,
        Self::AccountNotExists,
        Self::AccountAbnormal,
        Self::TemplateIllegal,
        Self::SignatureIllegal,
        Self::MobileNumberIllegal,
        Self::MobileCountOverLimit,
        Self::TemplateMissingParameters,
        Self::InvalidParameters,
        Self::BusinessLimitControl,
        Self::DayLimitControl,
        Self::MonthLimitControl,
        Self::InvalidJsonParam,
        Self::BlackKeyControlLimit,
        Self::ParamNotSupportUrl,
        Self::ParamLengthLimit,
        Self::AmountNotEnough,
        Self::SystemError,
        Self::RamPermissionDenied,
        Self::SignatureDoesNotMatch,
        Self::SignatureNonceUsed,
        Self::TimestampExpired,
        Self::AccessKeyIdNotFound,
    ];

    /// Map a provider code string onto a known variant.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|known| known.code() == code)
    }

    /// Provider code string.
    pub fn code(self) -> &'static str {
        match self {
            Self::OutOfService => "isv.OUT_OF_SERVICE",
            Self::ProductUnsubscribed => "isv.PRODUCT_UNSUBSCRIBE",
            Self::AccountNotExists => "isv.ACCOUNT_NOT_EXISTS",
            Self::AccountAbnormal => "isv.ACCOUNT_ABNORMAL",
            Self::TemplateIllegal => "isv.SMS_TEMPLATE_ILLEGAL",
            Self::SignatureIllegal => "isv.SMS_SIGNATURE_ILLEGAL",
            Self::MobileNumberIllegal => "isv.MOBILE_NUMBER_ILLEGAL",
            Self::MobileCountOverLimit => "isv.MOBILE_COUNT_OVER_LIMIT",
            Self::TemplateMissingParameters => "isv.TEMPLATE_MISSING_PARAMETERS",
            Self::InvalidParameters => "isv.INVALID_PARAMETERS",
            Self::BusinessLimitControl => "isv.BUSINESS_LIMIT_CONTROL",
            Self::DayLimitControl => "isv.DAY_LIMIT_CONTROL",
            Self::MonthLimitControl => "isv.MONTH_LIMIT_CONTROL",
            Self::InvalidJsonParam => "isv.INVALID_JSON_PARAM",
            Self::BlackKeyControlLimit => "isv.BLACK_KEY_CONTROL_LIMIT",
            Self::ParamNotSupportUrl => "isv.PARAM_NOT_SUPPORT_URL",
            Self::ParamLengthLimit => "isv.PARAM_LENGTH_LIMIT",
            Self::AmountNotEnough => "isv.AMOUNT_NOT_ENOUGH",
            Self::SystemError => "isp.SYSTEM_ERROR",
            Self::RamPermissionDenied => "isp.RAM_PERMISSION_DENY",
            Self::SignatureDoesNotMatch => "SignatureDoesNotMatch",
            Self::SignatureNonceUsed => "SignatureNonceUsed",
            Self::TimestampExpired => "InvalidTimeStamp.Expired",
            Self::AccessKeyIdNotFound => "InvalidAccessKeyId.NotFound",
        }
    }

    /// Human-readable description.
    pub fn message(self) -> &'static str {
        match self {
            Self::OutOfService => "service suspended",
            Self::ProductUnsubscribed => "product not subscribed",
            Self::AccountNotExists => "account does not exist",
            Self::AccountAbnormal => "account is abnormal",
            Self::TemplateIllegal => "illegal SMS template",
            Self::SignatureIllegal => "illegal SMS signature",
            Self::MobileNumberIllegal => "invalid mobile number format",
            Self::MobileCountOverLimit => "too many mobile numbers",
            Self::TemplateMissingParameters => "template variables are missing parameters",
            Self::InvalidParameters => "invalid parameters",
            Self::BusinessLimitControl => "sending frequency limit reached",
            Self::DayLimitControl => "daily sending limit reached",
            Self::MonthLimitControl => "monthly sending limit reached",
            Self::InvalidJsonParam => "JSON parameter is invalid",
            Self::BlackKeyControlLimit => "template variables contain a blacklisted keyword",
            Self::ParamNotSupportUrl => "URLs are not supported as template variables",
            Self::ParamLengthLimit => "template variable exceeds the length limit",
            Self::AmountNotEnough => "insufficient account balance",
            Self::SystemError => "provider system error",
            Self::RamPermissionDenied => "RAM permission denied",
            Self::SignatureDoesNotMatch => "request signature does not match",
            Self::SignatureNonceUsed => "signature nonce was already used",
            Self::TimestampExpired => "request timestamp expired",
            Self::AccessKeyIdNotFound => "access key id not found",
        }
    }

    /// Whether the failure is likely transient and the call could be repeated later.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::BusinessLimitControl | Self::SystemError | Self::SignatureNonceUsed
        )
    }

    /// Whether the failure points at credentials or signing.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self,
            Self::SignatureDoesNotMatch
                | Self::AccessKeyIdNotFound
                | Self::RamPermissionDenied
                | Self::TimestampExpired
        )
    }
}

/// Look up the human-readable message for a provider error code.
///
/// Codes outside the table map to [`UNKNOWN_ERROR_MESSAGE`].
pub fn code_to_message(code: &str) -> &'static str {
    KnownErrorCode::from_code(code)
        .map(KnownErrorCode::message)
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn known_codes_map_to_messages() {
        assert_eq!(
            code_to_message("isv.AMOUNT_NOT_ENOUGH"),
            "insufficient account balance"
        );
        assert_eq!(
            code_to_message("isv.MOBILE_NUMBER_ILLEGAL"),
            "invalid mobile number format"
        );
        assert_eq!(code_to_message("isv.OUT_OF_SERVICE"), "service suspended");
    }

    #[test]
    fn unknown_codes_fall_back_to_default() {
        assert_eq!(code_to_message("unknown.code"), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(code_to_message(""), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(code_to_message("isv.amount_not_enough"), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn codes_round_trip_and_are_unique() {
        let mut seen = HashSet::new();
        for known in KnownErrorCode::ALL {
            assert!(seen.insert(known.code()), "duplicate code {}", known.code());
            assert_eq!(KnownErrorCode::from_code(known.code()), Some(known));
            assert_ne!(known.message(), UNKNOWN_ERROR_MESSAGE);
        }
        let business = seen.iter().filter(|code| code.starts_with("isv.")).count();
        assert_eq!(business, 18);
    }

    #[test]
    fn helpers_classify_codes() {
        assert!(KnownErrorCode::BusinessLimitControl.is_retryable());
        assert!(!KnownErrorCode::AmountNotEnough.is_retryable());
        assert!(KnownErrorCode::SignatureDoesNotMatch.is_auth_error());
        assert!(!KnownErrorCode::MobileNumberIllegal.is_auth_error());
    }
}
