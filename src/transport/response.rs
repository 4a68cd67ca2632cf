use serde::Deserialize;

use crate::domain::{Receipt, code_to_message};

const SUCCESS_CODE: &str = "OK";

/// Shape of the response body returned by the API deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    /// `{"Code": "...", "Message": "...", "RequestId": "..."}`, success when `Code == "OK"`.
    #[default]
    Flat,
    /// `{"error_response": {"code": ..., "msg": "...", "sub_code": "...", "sub_msg": "..."}}`,
    /// success when `error_response` is absent or empty.
    Nested,
}

#[derive(Debug, thiserror::Error)]
pub enum MalformedResponse {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response body is not a JSON object")]
    NotAnObject,

    #[error("response is missing field `{0}`")]
    MissingField(&'static str),

    #[error("response field `{0}` has an unexpected type")]
    InvalidField(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("unexpected HTTP status: {status}")]
    Gateway { status: u16, body: Option<String> },

    #[error("business error {code}: {message} ({localized_message})")]
    Business {
        code: String,
        message: String,
        localized_message: &'static str,
    },

    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FlatResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    request_id: Option<String>,
    #[serde(default)]
    biz_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NestedError {
    #[serde(default)]
    code: Option<TransportCode>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    sub_code: Option<TransportCode>,
    #[serde(default)]
    sub_msg: Option<TransportCode>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TransportCode {
    String(String),
    Number(serde_json::Number),
}

impl TransportCode {
    fn into_string(self) -> String {
        match self {
            Self::String(value) => value,
            Self::Number(value) => value.to_string(),
        }
    }
}

/// Turn an HTTP status and body into a [`Receipt`] or a classified failure.
pub fn interpret(format: WireFormat, status: u16, body: &[u8]) -> Result<Receipt, ResponseError> {
    if status != 200 {
        let text = String::from_utf8_lossy(body);
        let body = if text.trim().is_empty() {
            None
        } else {
            Some(text.into_owned())
        };
        return Err(ResponseError::Gateway { status, body });
    }

    let value: serde_json::Value = serde_json::from_slice(body).map_err(MalformedResponse::from)?;
    if !value.is_object() {
        return Err(MalformedResponse::NotAnObject.into());
    }

    match format {
        WireFormat::Flat => interpret_flat(value),
        WireFormat::Nested => interpret_nested(value),
    }
}

const FLAT_STRING_FIELDS: [&str; 4] = ["Code", "Message", "RequestId", "BizId"];

fn interpret_flat(value: serde_json::Value) -> Result<Receipt, ResponseError> {
    if let Some(field) = FLAT_STRING_FIELDS
        .into_iter()
        .find(|field| value.get(*field).is_some_and(|it| !it.is_string() && !it.is_null()))
    {
        return Err(MalformedResponse::InvalidField(field).into());
    }

    let parsed = FlatResponse::deserialize(&value).map_err(MalformedResponse::from)?;
    let code = parsed.code.ok_or(MalformedResponse::MissingField("Code"))?;

    if code != SUCCESS_CODE {
        let localized_message = code_to_message(&code);
        return Err(ResponseError::Business {
            message: parsed.message.unwrap_or_default(),
            code,
            localized_message,
        });
    }

    Ok(Receipt {
        request_id: parsed.request_id,
        biz_id: parsed.biz_id,
        message: parsed.message,
        body: value,
    })
}

fn interpret_nested(value: serde_json::Value) -> Result<Receipt, ResponseError> {
    let error = value.get("error_response").filter(|it| !is_empty(it));
    let Some(error) = error else {
        let request_id = ["RequestId", "request_id"]
            .iter()
            .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
            .map(str::to_owned);
        return Ok(Receipt {
            request_id,
            biz_id: None,
            message: None,
            body: value,
        });
    };

    if !error.is_object() {
        return Err(MalformedResponse::NotAnObject.into());
    }
    let parsed = NestedError::deserialize(error).map_err(MalformedResponse::from)?;
    let code = parsed
        .code
        .map(TransportCode::into_string)
        .ok_or(MalformedResponse::MissingField("error_response.code"))?;

    let mut message = parsed.msg.unwrap_or_default();
    for part in [parsed.sub_code, parsed.sub_msg]
        .into_iter()
        .flatten()
        .map(TransportCode::into_string)
    {
        if !part.is_empty() && part != "0" {
            message.push('-');
            message.push_str(&part);
        }
    }

    let localized_message = code_to_message(&code);
    Err(ResponseError::Business {
        code,
        message,
        localized_message,
    })
}

/// Values the nested format treats as "no error reported".
fn is_empty(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(flag) => !flag,
        serde_json::Value::Number(number) => number.as_f64() == Some(0.0),
        serde_json::Value::String(text) => text.is_empty() || text == "0",
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::Object(fields) => fields.is_empty(),
    }
}
