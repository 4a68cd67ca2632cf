use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::domain::ParameterSet;
use crate::transport::percent::percent_encode;

type HmacSha1 = Hmac<Sha1>;

/// Name of the parameter carrying the computed signature.
pub const SIGNATURE_FIELD: &str = "Signature";

/// Canonical string the signature is computed over.
///
/// `METHOD&%2F&encode(k1=v1&k2=v2...)`, with every key and value percent-encoded and the
/// pairs in byte order of their keys.
pub fn string_to_sign(params: &ParameterSet, http_method: &str) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{http_method}&{}&{}",
        percent_encode("/"),
        percent_encode(&query)
    )
}

/// HMAC-SHA1 signature of `params`, base64-encoded.
///
/// The key is the secret followed by `&`.
pub fn sign(params: &ParameterSet, http_method: &str, secret: &str) -> String {
    let key = format!("{secret}&");
    // HMAC pads or hashes the key to the block size, so no key length is rejected.
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(string_to_sign(params, http_method).as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ParameterSet {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn matches_published_send_sms_example() {
        let params = params(&[
            ("AccessKeyId", "testId"),
            ("Action", "SendSms"),
            ("Format", "XML"),
            ("OutId", "123"),
            ("PhoneNumbers", "15300000001"),
            ("RegionId", "cn-hangzhou"),
            ("SignName", "阿里云短信测试专用"),
            ("SignatureMethod", "HMAC-SHA1"),
            ("SignatureNonce", "45e25e9b-0a6f-4070-8c85-2956eda1b466"),
            ("SignatureVersion", "1.0"),
            ("TemplateCode", "SMS_71390007"),
            ("TemplateParam", r#"{"customer":"test"}"#),
            ("Timestamp", "2017-07-12T02:42:19Z"),
            ("Version", "2017-05-25"),
        ]);

        assert_eq!(
            sign(&params, "GET", "testSecret"),
            "zJDF+Lrzhj/ThnlvIToysFRq6t4="
        );
    }

    #[test]
    fn keys_are_processed_in_sorted_order() {
        let mut forward = ParameterSet::new();
        forward.insert("A".to_owned(), "1".to_owned());
        forward.insert("B".to_owned(), "2".to_owned());

        let mut reverse = ParameterSet::new();
        reverse.insert("B".to_owned(), "2".to_owned());
        reverse.insert("A".to_owned(), "1".to_owned());

        assert_eq!(string_to_sign(&reverse, "POST"), "POST&%2F&A%3D1%26B%3D2");
        assert_eq!(sign(&forward, "POST", "secret"), sign(&reverse, "POST", "secret"));
        assert_eq!(
            sign(&reverse, "POST", "secret"),
            "DI8AMsvXZGVag1dhACF+9Jxg0T0="
        );
    }

    #[test]
    fn signing_is_deterministic() {
        let p = params(&[("Action", "SendSms"), ("PhoneNumbers", "13800138000")]);
        assert_eq!(sign(&p, "POST", "s"), sign(&p, "POST", "s"));
    }

    #[test]
    fn any_single_change_alters_the_signature() {
        let base = params(&[
            ("Action", "SendSms"),
            ("PhoneNumbers", "13800138000"),
            ("SignName", "Acme"),
        ]);
        let original = sign(&base, "POST", "secret");

        let mut value_changed = base.clone();
        value_changed.insert("PhoneNumbers".to_owned(), "13800138001".to_owned());
        assert_ne!(sign(&value_changed, "POST", "secret"), original);

        let mut key_changed = base.clone();
        let value = key_changed.remove("SignName").unwrap();
        key_changed.insert("Signname".to_owned(), value);
        assert_ne!(sign(&key_changed, "POST", "secret"), original);

        assert_ne!(sign(&base, "GET", "secret"), original);
        assert_ne!(sign(&base, "POST", "secret2"), original);
    }

    #[test]
    fn empty_inputs_are_signed() {
        let signature = sign(&ParameterSet::new(), "POST", "");
        assert_eq!(signature.len(), 28);
        assert!(signature.ends_with('='));
    }
}
