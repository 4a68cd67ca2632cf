//! Client layer: signs requests, dispatches them, and maps transport results to errors.

mod registry;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{
    AccessKeyId, AccessKeySecret, KnownErrorCode, Receipt, Request, ValidationError,
};
use crate::transport::{MalformedResponse, ResponseError, SIGNATURE_FIELD, WireFormat};

pub use registry::ClientRegistry;

const DEFAULT_ENDPOINT: &str = "http://dysmsapi.aliyuncs.com/";
const HTTP_METHOD: &str = "POST";

pub const ACCESS_KEY_ID_VAR: &str = "DYSMS_ACCESS_KEY_ID";
pub const ACCESS_KEY_SECRET_VAR: &str = "DYSMS_ACCESS_KEY_SECRET";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Raw HTTP result handed back by an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// The one network operation the client needs: POST a form and read the reply.
///
/// The default implementation uses `reqwest`; supply your own through
/// [`SmsClientBuilder::transport`] to route calls through another HTTP stack.
pub trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Access key pair used to sign every call.
pub struct Credentials {
    access_key_id: AccessKeyId,
    access_key_secret: AccessKeySecret,
}

impl Credentials {
    /// Validate both parts up front so a misconfigured client fails before any call.
    pub fn new(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            access_key_id: AccessKeyId::new(access_key_id)?,
            access_key_secret: AccessKeySecret::new(access_key_secret)?,
        })
    }

    /// Read `DYSMS_ACCESS_KEY_ID` and `DYSMS_ACCESS_KEY_SECRET`.
    pub fn from_env() -> Result<Self, ValidationError> {
        let access_key_id = std::env::var(ACCESS_KEY_ID_VAR).map_err(|_| {
            ValidationError::MissingVar {
                name: ACCESS_KEY_ID_VAR,
            }
        })?;
        let access_key_secret = std::env::var(ACCESS_KEY_SECRET_VAR).map_err(|_| {
            ValidationError::MissingVar {
                name: ACCESS_KEY_SECRET_VAR,
            }
        })?;
        Self::new(access_key_id, access_key_secret)
    }

    pub fn access_key_id(&self) -> &AccessKeyId {
        &self.access_key_id
    }

    pub fn access_key_secret(&self) -> &AccessKeySecret {
        &self.access_key_secret
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsClient`].
///
/// The client never retries; use [`DysmsError::is_retryable`] to drive your own policy.
pub enum DysmsError {
    /// HTTP client / transport failure (DNS, TLS, connect, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway answered with a status other than 200.
    #[error("unexpected HTTP status: {status}")]
    Gateway { status: u16, body: Option<String> },

    /// HTTP 200, but the provider reported a failure code.
    #[error("business error {code}: {message} ({localized_message})")]
    Business {
        code: String,
        message: String,
        localized_message: &'static str,
    },

    /// HTTP 200, but the body was not the expected JSON.
    #[error("parse error: {0}")]
    Parse(#[source] MalformedResponse),

    /// The caller-supplied deadline elapsed before the call finished.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl DysmsError {
    /// Provider error code for [`DysmsError::Business`].
    pub fn business_code(&self) -> Option<&str> {
        match self {
            Self::Business { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether repeating the same call later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Gateway { status, .. } => *status >= 500,
            Self::Business { code, .. } => {
                KnownErrorCode::from_code(code).is_some_and(KnownErrorCode::is_retryable)
            }
            Self::Parse(_) | Self::Validation(_) => false,
        }
    }
}

impl From<ResponseError> for DysmsError {
    fn from(value: ResponseError) -> Self {
        match value {
            ResponseError::Gateway { status, body } => Self::Gateway { status, body },
            ResponseError::Business {
                code,
                message,
                localized_message,
            } => Self::Business {
                code,
                message,
                localized_message,
            },
            ResponseError::Malformed(err) => Self::Parse(err),
        }
    }
}

#[derive(Clone)]
/// Builder for [`SmsClient`].
///
/// Use this when you need to customize the endpoint, timeout, user-agent, response format,
/// or HTTP transport.
pub struct SmsClientBuilder {
    credentials: Credentials,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    wire_format: WireFormat,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl SmsClientBuilder {
    /// Create a builder with the default endpoint and flat response format.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
            wire_format: WireFormat::default(),
            transport: None,
        }
    }

    /// Override the API endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to every request.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Select how response bodies are interpreted.
    pub fn wire_format(mut self, wire_format: WireFormat) -> Self {
        self.wire_format = wire_format;
        self
    }

    /// Use a custom HTTP transport instead of the built-in `reqwest` one.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`SmsClient`].
    pub fn build(self) -> Result<SmsClient, DysmsError> {
        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| DysmsError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(SmsClient {
            credentials: self.credentials,
            endpoint: self.endpoint,
            wire_format: self.wire_format,
            http,
        })
    }
}

#[derive(Clone)]
/// High-level SMS client.
///
/// Every call builds the public parameters, signs them with the access key secret, POSTs the
/// form to the endpoint (`http://dysmsapi.aliyuncs.com/` by default) and interprets the reply.
/// The client holds only immutable configuration, so clones can be used concurrently.
pub struct SmsClient {
    credentials: Credentials,
    endpoint: String,
    wire_format: WireFormat,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for SmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsClient")
            .field("credentials", &self.credentials)
            .field("endpoint", &self.endpoint)
            .field("wire_format", &self.wire_format)
            .finish_non_exhaustive()
    }
}

impl SmsClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`SmsClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            wire_format: WireFormat::default(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> SmsClientBuilder {
        SmsClientBuilder::new(credentials)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Run `request` and discard the receipt.
    ///
    /// Errors:
    /// - [`DysmsError::Gateway`] for non-200 HTTP responses,
    /// - [`DysmsError::Business`] when the provider reports a failure code,
    /// - [`DysmsError::Parse`] when the body is not the expected JSON,
    /// - [`DysmsError::Transport`] when the HTTP call itself fails.
    pub async fn execute<R>(&self, request: &R) -> Result<(), DysmsError>
    where
        R: Request + ?Sized,
    {
        self.send(request).await.map(|_| ())
    }

    /// Like [`SmsClient::execute`], bounded by `timeout`.
    ///
    /// On expiry the in-flight HTTP call is dropped and [`DysmsError::Timeout`] is returned.
    pub async fn execute_with_timeout<R>(
        &self,
        request: &R,
        timeout: Duration,
    ) -> Result<(), DysmsError>
    where
        R: Request + ?Sized,
    {
        tokio::time::timeout(timeout, self.execute(request))
            .await
            .map_err(|_| DysmsError::Timeout(timeout))?
    }

    /// Run `request` and return the provider's receipt (`RequestId`, `BizId`, full body).
    pub async fn send<R>(&self, request: &R) -> Result<Receipt, DysmsError>
    where
        R: Request + ?Sized,
    {
        let action = request.action();
        let nonce = Uuid::new_v4().to_string();
        let mut params = crate::transport::build_params(
            self.credentials.access_key_id(),
            action,
            request.params(),
            Utc::now(),
            &nonce,
        );
        let signature = crate::transport::sign(
            &params,
            HTTP_METHOD,
            self.credentials.access_key_secret().as_str(),
        );
        params.insert(SIGNATURE_FIELD.to_owned(), signature);

        debug!(action, nonce = %nonce, endpoint = %self.endpoint, "sending signed request");
        let response = self
            .http
            .post_form(&self.endpoint, params.into_iter().collect())
            .await
            .map_err(|err| {
                warn!(action, error = %err, "transport failure");
                DysmsError::Transport(err)
            })?;

        match crate::transport::interpret(self.wire_format, response.status, &response.body) {
            Ok(receipt) => {
                debug!(
                    action,
                    request_id = receipt.request_id.as_deref().unwrap_or_default(),
                    "request succeeded"
                );
                Ok(receipt)
            }
            Err(err) => {
                warn!(action, status = response.status, error = %err, "request failed");
                Err(err.into())
            }
        }
    }
}
