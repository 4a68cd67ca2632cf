/// Successful API call.
///
/// `RequestId` and `BizId` are lifted out when present; the full body is kept so callers can
/// decode action-specific payloads such as `SmsSendDetailDTOs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub request_id: Option<String>,
    pub biz_id: Option<String>,
    pub message: Option<String>,
    pub body: serde_json::Value,
}
