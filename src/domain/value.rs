use std::fmt;

use chrono::NaiveDate;
use phonenumber::country;

use crate::domain::validation::ValidationError;

/// Declares a trimmed, non-empty string newtype bound to one API parameter.
macro_rules! trimmed_string {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Parameter name used by the API (`", $field, "`).")]
            pub const FIELD: &'static str = $field;

            #[doc = concat!("Create a validated [`", stringify!($name), "`].")]
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::Empty { field: Self::FIELD });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Borrow the validated value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

trimmed_string!(
    /// Access key id identifying the calling account.
    ///
    /// Invariant: non-empty after trimming.
    AccessKeyId,
    "AccessKeyId"
);

trimmed_string!(
    /// Approved SMS signature name shown to recipients.
    SignName,
    "SignName"
);

trimmed_string!(
    /// Approved SMS template code, e.g. `SMS_0000001`.
    TemplateCode,
    "TemplateCode"
);

trimmed_string!(
    /// Caller-defined correlation id echoed back in delivery receipts.
    OutId,
    "OutId"
);

trimmed_string!(
    /// Upstream extension code.
    SmsUpExtendCode,
    "SmsUpExtendCode"
);

trimmed_string!(
    /// Send receipt id (`BizId`) returned by `SendSms`.
    BizId,
    "BizId"
);

#[derive(Clone, PartialEq, Eq, Hash)]
/// Shared secret used to sign requests.
///
/// Invariant: must not be empty (whitespace is preserved). `Debug` never prints the value.
pub struct AccessKeySecret(String);

impl AccessKeySecret {
    /// Create a validated [`AccessKeySecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty {
                field: "AccessKeySecret",
            });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessKeySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessKeySecret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to the API.
///
/// Invariant: non-empty after trimming. This type does not normalize; if you want E.164
/// normalization, parse into [`PhoneNumber`] and convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Parameter name used by `SendSms` (`PhoneNumbers`).
    pub const FIELD: &'static str = "PhoneNumbers";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the API.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix,
    /// typically `Some(country::Id::CN)` for mainland numbers.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;
        if !phonenumber::is_valid(&parsed) {
            return Err(ValidationError::InvalidPhoneNumber { input: raw });
        }

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Template variables (`TemplateParam`), sent as a JSON object.
pub struct TemplateParam(serde_json::Map<String, serde_json::Value>);

impl TemplateParam {
    /// Parameter name used by `SendSms` (`TemplateParam`).
    pub const FIELD: &'static str = "TemplateParam";

    /// Build template variables from key/value pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), serde_json::Value::String(v.into())))
                .collect(),
        )
    }

    /// Accept pre-rendered JSON, rejecting anything that is not an object.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|err| ValidationError::InvalidTemplateParam {
                reason: err.to_string(),
            })?;
        match value {
            serde_json::Value::Object(object) => Ok(Self(object)),
            _ => Err(ValidationError::InvalidTemplateParam {
                reason: "expected a JSON object".to_owned(),
            }),
        }
    }

    /// Borrow the variables.
    pub fn as_object(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.0
    }

    /// JSON text as sent to the API.
    pub fn to_json(&self) -> String {
        serde_json::Value::Object(self.0.clone()).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Day to query delivery details for (`SendDate`, `yyyyMMdd`).
pub struct SendDate(NaiveDate);

impl SendDate {
    /// Parameter name used by `QuerySendDetails` (`SendDate`).
    pub const FIELD: &'static str = "SendDate";

    /// Wrap an already-known calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse `yyyyMMdd`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.len() != 8 {
            return Err(ValidationError::InvalidSendDate {
                input: input.to_owned(),
            });
        }
        NaiveDate::parse_from_str(trimmed, "%Y%m%d")
            .map(Self)
            .map_err(|_| ValidationError::InvalidSendDate {
                input: input.to_owned(),
            })
    }

    /// The wrapped date.
    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// Wire representation (`yyyyMMdd`).
    pub fn to_wire(self) -> String {
        self.0.format("%Y%m%d").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Page size for `QuerySendDetails`.
///
/// Invariant: `1..=50`.
pub struct PageSize(u32);

impl PageSize {
    /// Parameter name used by `QuerySendDetails` (`PageSize`).
    pub const FIELD: &'static str = "PageSize";

    /// Minimum allowed page size.
    pub const MIN: u32 = 1;
    /// Maximum allowed page size.
    pub const MAX: u32 = 50;

    /// Create a validated page size.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying value.
    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// One-based page index for `QuerySendDetails`.
pub struct CurrentPage(u32);

impl CurrentPage {
    /// Parameter name used by `QuerySendDetails` (`CurrentPage`).
    pub const FIELD: &'static str = "CurrentPage";

    /// Create a validated page index (must be at least 1).
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: 1,
                max: u32::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for CurrentPage {
    fn default() -> Self {
        Self(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let id = AccessKeyId::new("  LTAI0000 ").unwrap();
        assert_eq!(id.as_str(), "LTAI0000");
        assert!(AccessKeyId::new("  ").is_err());

        let sign = SignName::new(" Acme ").unwrap();
        assert_eq!(sign.as_str(), "Acme");

        let template = TemplateCode::new("SMS_0000001").unwrap();
        assert_eq!(template.as_str(), "SMS_0000001");
        assert!(matches!(
            TemplateCode::new(""),
            Err(ValidationError::Empty {
                field: TemplateCode::FIELD
            })
        ));

        let biz = BizId::new(" 134523^4351232 ").unwrap();
        assert_eq!(biz.as_str(), "134523^4351232");
    }

    #[test]
    fn secret_preserves_whitespace_and_hides_debug() {
        let secret = AccessKeySecret::new(" s3cret ").unwrap();
        assert_eq!(secret.as_str(), " s3cret ");
        assert_eq!(format!("{secret:?}"), "AccessKeySecret(***)");
        assert!(AccessKeySecret::new("").is_err());
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(Some(country::Id::CN), "13800138000").unwrap();
        let p2 = PhoneNumber::parse(None, "+86 138 0013 8000").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+8613800138000");
        assert_eq!(p1.raw(), "13800138000");

        let raw: RawPhoneNumber = p1.into();
        assert_eq!(raw.raw(), "+8613800138000");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
    }

    #[test]
    fn template_param_renders_json_object() {
        let param = TemplateParam::from_pairs([("code", "1234")]);
        assert_eq!(param.to_json(), r#"{"code":"1234"}"#);

        let parsed = TemplateParam::from_json(r#"{ "name": "Bob" }"#).unwrap();
        assert_eq!(parsed.to_json(), r#"{"name":"Bob"}"#);
        assert_eq!(parsed.as_object().len(), 1);

        assert!(TemplateParam::from_json("[1, 2]").is_err());
        assert!(TemplateParam::from_json("{ nope").is_err());
    }

    #[test]
    fn send_date_uses_compact_format() {
        let date = SendDate::parse("20170718").unwrap();
        assert_eq!(date.to_wire(), "20170718");
        assert!(SendDate::parse("2017-07-18").is_err());
        assert!(SendDate::parse("20171332").is_err());
    }

    #[test]
    fn paging_values_enforce_range() {
        assert!(PageSize::new(PageSize::MIN).is_ok());
        assert!(PageSize::new(PageSize::MAX).is_ok());
        assert!(PageSize::new(0).is_err());
        assert!(PageSize::new(PageSize::MAX + 1).is_err());

        assert_eq!(CurrentPage::default().value(), 1);
        assert!(CurrentPage::new(0).is_err());
    }
}
