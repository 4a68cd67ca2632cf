use chrono::{DateTime, Utc};

use crate::domain::{AccessKeyId, ParameterSet};

pub const API_VERSION: &str = "2017-05-25";
pub const REGION_ID: &str = "cn-hangzhou";
pub const FORMAT: &str = "json";
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const SIGNATURE_VERSION: &str = "1.0";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Assemble the unsigned parameter set for one call.
///
/// Public parameters come first, then `Action`, then the action-specific parameters, each
/// layer overriding keys from the previous one. `Signature` is never part of the result.
pub fn build_params(
    access_key_id: &AccessKeyId,
    action: &str,
    request_params: ParameterSet,
    timestamp: DateTime<Utc>,
    nonce: &str,
) -> ParameterSet {
    let mut params = ParameterSet::from([
        (
            AccessKeyId::FIELD.to_owned(),
            access_key_id.as_str().to_owned(),
        ),
        (
            "Timestamp".to_owned(),
            timestamp.format(TIMESTAMP_FORMAT).to_string(),
        ),
        ("Format".to_owned(), FORMAT.to_owned()),
        ("SignatureMethod".to_owned(), SIGNATURE_METHOD.to_owned()),
        ("SignatureVersion".to_owned(), SIGNATURE_VERSION.to_owned()),
        ("SignatureNonce".to_owned(), nonce.to_owned()),
        ("Version".to_owned(), API_VERSION.to_owned()),
        ("RegionId".to_owned(), REGION_ID.to_owned()),
    ]);
    params.insert("Action".to_owned(), action.to_owned());
    params.extend(request_params);
    params.remove(crate::transport::sign::SIGNATURE_FIELD);
    params
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 7, 12, 2, 42, 19).unwrap()
    }

    #[test]
    fn public_parameters_are_present() {
        let id = AccessKeyId::new("testId").unwrap();
        let params = build_params(&id, "SendSms", ParameterSet::new(), fixed_time(), "nonce-1");

        assert_eq!(
            params.into_iter().collect::<Vec<_>>(),
            vec![
                ("AccessKeyId".to_owned(), "testId".to_owned()),
                ("Action".to_owned(), "SendSms".to_owned()),
                ("Format".to_owned(), "json".to_owned()),
                ("RegionId".to_owned(), "cn-hangzhou".to_owned()),
                ("SignatureMethod".to_owned(), "HMAC-SHA1".to_owned()),
                ("SignatureNonce".to_owned(), "nonce-1".to_owned()),
                ("SignatureVersion".to_owned(), "1.0".to_owned()),
                ("Timestamp".to_owned(), "2017-07-12T02:42:19Z".to_owned()),
                ("Version".to_owned(), "2017-05-25".to_owned()),
            ]
        );
    }

    #[test]
    fn request_parameters_win_on_collision() {
        let id = AccessKeyId::new("testId").unwrap();
        let request = ParameterSet::from([
            ("RegionId".to_owned(), "cn-shanghai".to_owned()),
            ("PhoneNumbers".to_owned(), "13800138000".to_owned()),
        ]);
        let params = build_params(&id, "SendSms", request, fixed_time(), "n");

        assert_eq!(params["RegionId"], "cn-shanghai");
        assert_eq!(params["PhoneNumbers"], "13800138000");
        assert_eq!(params["Action"], "SendSms");
    }

    #[test]
    fn signature_is_never_included() {
        let id = AccessKeyId::new("testId").unwrap();
        let request = ParameterSet::from([("Signature".to_owned(), "forged".to_owned())]);
        let params = build_params(&id, "SendSms", request, fixed_time(), "n");
        assert!(!params.contains_key("Signature"));
    }
}
