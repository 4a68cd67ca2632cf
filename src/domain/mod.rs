//! Domain layer: strong types with validation and invariants (no I/O).

mod error_code;
mod request;
mod response;
mod validation;
mod value;

pub use error_code::{KnownErrorCode, UNKNOWN_ERROR_MESSAGE, code_to_message};
pub use request::{
    BatchEntry, ParameterSet, QuerySendDetails, Request, SEND_BATCH_SMS_MAX_RECIPIENTS,
    SEND_SMS_MAX_RECIPIENTS, SendBatchSms, SendOptions, SendSms,
};
pub use response::Receipt;
pub use validation::ValidationError;
pub use value::{
    AccessKeyId, AccessKeySecret, BizId, CurrentPage, OutId, PageSize, PhoneNumber,
    RawPhoneNumber, SendDate, SignName, SmsUpExtendCode, TemplateCode, TemplateParam,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_key_id_rejects_empty() {
        assert!(matches!(
            AccessKeyId::new("   "),
            Err(ValidationError::Empty {
                field: AccessKeyId::FIELD
            })
        ));
    }

    #[test]
    fn phone_number_parses_with_region_and_trims() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::CN), " 13800138000 ").unwrap();
        assert_eq!(pn.raw(), "13800138000");
    }

    #[test]
    fn caller_defined_requests_plug_into_the_trait() {
        struct QuerySmsSign {
            sign_name: SignName,
        }

        impl Request for QuerySmsSign {
            fn action(&self) -> &str {
                "QuerySmsSign"
            }

            fn params(&self) -> ParameterSet {
                ParameterSet::from([(
                    SignName::FIELD.to_owned(),
                    self.sign_name.as_str().to_owned(),
                )])
            }
        }

        let request: &dyn Request = &QuerySmsSign {
            sign_name: SignName::new("Acme").unwrap(),
        };
        assert_eq!(request.action(), "QuerySmsSign");
        assert_eq!(request.params()["SignName"], "Acme");
    }

    #[test]
    fn send_sms_one_has_single_recipient() {
        let request = SendSms::one(
            RawPhoneNumber::new("13800138000").unwrap(),
            SignName::new("Acme").unwrap(),
            TemplateCode::new("SMS_0000001").unwrap(),
            SendOptions::default(),
        );
        assert_eq!(request.recipients().len(), 1);
        assert_eq!(request.params()["PhoneNumbers"], "13800138000");
    }
}
