//! Typed Rust client for the Aliyun Dysms (SMS) HTTP API.
//!
//! Every call is signed with HMAC-SHA1 over the canonical, percent-encoded parameter set.
//! The crate is split into a domain layer of strong types, a transport layer for signing
//! and wire-format quirks, and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use dysms::{Credentials, RawPhoneNumber, SendOptions, SendSms, SignName, SmsClient, TemplateCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dysms::DysmsError> {
//!     let client = SmsClient::new(Credentials::new("access-key-id", "access-key-secret")?);
//!     let request = SendSms::one(
//!         RawPhoneNumber::new("13800138000")?,
//!         SignName::new("Acme")?,
//!         TemplateCode::new("SMS_0000001")?,
//!         SendOptions::default(),
//!     );
//!     client.execute(&request).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ClientRegistry, Credentials, DysmsError, HttpResponse, HttpTransport, SmsClient,
    SmsClientBuilder,
};
pub use domain::{
    AccessKeyId, AccessKeySecret, BatchEntry, BizId, KnownErrorCode, ParameterSet, PhoneNumber,
    QuerySendDetails, RawPhoneNumber, Receipt, Request, SendBatchSms, SendDate, SendOptions,
    SendSms, SignName, TemplateCode, TemplateParam, ValidationError, code_to_message,
};
pub use transport::{
    MalformedResponse, ResponseError, WireFormat, build_params, interpret, percent_encode, sign,
    string_to_sign,
};
