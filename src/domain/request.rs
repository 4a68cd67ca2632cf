use std::collections::BTreeMap;

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    BizId, CurrentPage, OutId, PageSize, RawPhoneNumber, SendDate, SignName, SmsUpExtendCode,
    TemplateCode, TemplateParam,
};

/// Request parameters keyed by name.
///
/// A `BTreeMap` keeps keys unique and iterates them in byte order, which is the order the
/// signature is computed over.
pub type ParameterSet = BTreeMap<String, String>;

pub const SEND_SMS_MAX_RECIPIENTS: usize = 1000;
pub const SEND_BATCH_SMS_MAX_RECIPIENTS: usize = 100;

/// One remote operation: an action name plus its action-specific parameters.
///
/// The client adds the public parameters and the signature; implementations only describe
/// what is specific to the action.
pub trait Request {
    /// Action name, e.g. `SendSms`.
    fn action(&self) -> &str;

    /// Action-specific parameters.
    fn params(&self) -> ParameterSet;
}

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub template_param: Option<TemplateParam>,
    pub sms_up_extend_code: Option<SmsUpExtendCode>,
    pub out_id: Option<OutId>,
}

/// `SendSms`: one template, one signature, one or many recipients.
#[derive(Debug, Clone)]
pub struct SendSms {
    recipients: Vec<RawPhoneNumber>,
    sign_name: SignName,
    template_code: TemplateCode,
    options: SendOptions,
}

impl SendSms {
    pub const ACTION: &'static str = "SendSms";

    pub fn one(
        recipient: RawPhoneNumber,
        sign_name: SignName,
        template_code: TemplateCode,
        options: SendOptions,
    ) -> Self {
        Self {
            recipients: vec![recipient],
            sign_name,
            template_code,
            options,
        }
    }

    pub fn to_many(
        recipients: Vec<RawPhoneNumber>,
        sign_name: SignName,
        template_code: TemplateCode,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        if recipients.len() > SEND_SMS_MAX_RECIPIENTS {
            return Err(ValidationError::TooManyRecipients {
                max: SEND_SMS_MAX_RECIPIENTS,
                actual: recipients.len(),
            });
        }
        Ok(Self {
            recipients,
            sign_name,
            template_code,
            options,
        })
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn sign_name(&self) -> &SignName {
        &self.sign_name
    }

    pub fn template_code(&self) -> &TemplateCode {
        &self.template_code
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

impl Request for SendSms {
    fn action(&self) -> &str {
        Self::ACTION
    }

    fn params(&self) -> ParameterSet {
        let mut params = ParameterSet::new();
        let to = self
            .recipients
            .iter()
            .map(RawPhoneNumber::raw)
            .collect::<Vec<_>>()
            .join(",");
        params.insert(RawPhoneNumber::FIELD.to_owned(), to);
        params.insert(
            SignName::FIELD.to_owned(),
            self.sign_name.as_str().to_owned(),
        );
        params.insert(
            TemplateCode::FIELD.to_owned(),
            self.template_code.as_str().to_owned(),
        );
        if let Some(template_param) = self.options.template_param.as_ref() {
            params.insert(TemplateParam::FIELD.to_owned(), template_param.to_json());
        }
        if let Some(code) = self.options.sms_up_extend_code.as_ref() {
            params.insert(SmsUpExtendCode::FIELD.to_owned(), code.as_str().to_owned());
        }
        if let Some(out_id) = self.options.out_id.as_ref() {
            params.insert(OutId::FIELD.to_owned(), out_id.as_str().to_owned());
        }
        params
    }
}

/// One recipient of a [`SendBatchSms`] call with its own signature and variables.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub phone: RawPhoneNumber,
    pub sign_name: SignName,
    pub template_param: Option<TemplateParam>,
    pub sms_up_extend_code: Option<SmsUpExtendCode>,
}

impl BatchEntry {
    pub fn new(phone: RawPhoneNumber, sign_name: SignName) -> Self {
        Self {
            phone,
            sign_name,
            template_param: None,
            sms_up_extend_code: None,
        }
    }

    pub fn with_template_param(mut self, template_param: TemplateParam) -> Self {
        self.template_param = Some(template_param);
        self
    }
}

/// `SendBatchSms`: one template, per-recipient signatures and variables.
///
/// The API takes parallel JSON arrays; keeping entries together makes mismatched lengths
/// unrepresentable.
#[derive(Debug, Clone)]
pub struct SendBatchSms {
    entries: Vec<BatchEntry>,
    template_code: TemplateCode,
}

impl SendBatchSms {
    pub const ACTION: &'static str = "SendBatchSms";

    pub fn new(
        entries: Vec<BatchEntry>,
        template_code: TemplateCode,
    ) -> Result<Self, ValidationError> {
        if entries.is_empty() {
            return Err(ValidationError::Empty {
                field: "PhoneNumberJson",
            });
        }
        if entries.len() > SEND_BATCH_SMS_MAX_RECIPIENTS {
            return Err(ValidationError::TooManyRecipients {
                max: SEND_BATCH_SMS_MAX_RECIPIENTS,
                actual: entries.len(),
            });
        }
        Ok(Self {
            entries,
            template_code,
        })
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn template_code(&self) -> &TemplateCode {
        &self.template_code
    }
}

impl Request for SendBatchSms {
    fn action(&self) -> &str {
        Self::ACTION
    }

    fn params(&self) -> ParameterSet {
        let mut params = ParameterSet::new();
        params.insert(
            "PhoneNumberJson".to_owned(),
            json_array(self.entries.iter().map(|e| serde_json::Value::from(e.phone.raw()))),
        );
        params.insert(
            "SignNameJson".to_owned(),
            json_array(
                self.entries
                    .iter()
                    .map(|e| serde_json::Value::from(e.sign_name.as_str())),
            ),
        );
        params.insert(
            TemplateCode::FIELD.to_owned(),
            self.template_code.as_str().to_owned(),
        );

        // Arrays must line up with PhoneNumberJson, so entries without a value get a filler.
        if self.entries.iter().any(|e| e.template_param.is_some()) {
            let values = self.entries.iter().map(|e| {
                e.template_param
                    .as_ref()
                    .map(|p| serde_json::Value::Object(p.as_object().clone()))
                    .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()))
            });
            params.insert("TemplateParamJson".to_owned(), json_array(values));
        }
        if self.entries.iter().any(|e| e.sms_up_extend_code.is_some()) {
            let values = self.entries.iter().map(|e| {
                serde_json::Value::from(
                    e.sms_up_extend_code
                        .as_ref()
                        .map(SmsUpExtendCode::as_str)
                        .unwrap_or_default(),
                )
            });
            params.insert("SmsUpExtendCodeJson".to_owned(), json_array(values));
        }
        params
    }
}

fn json_array(values: impl Iterator<Item = serde_json::Value>) -> String {
    serde_json::Value::Array(values.collect()).to_string()
}

/// `QuerySendDetails`: delivery records for one number on one day.
#[derive(Debug, Clone)]
pub struct QuerySendDetails {
    phone: RawPhoneNumber,
    send_date: SendDate,
    page_size: PageSize,
    current_page: CurrentPage,
    biz_id: Option<BizId>,
}

impl QuerySendDetails {
    pub const ACTION: &'static str = "QuerySendDetails";

    pub fn new(phone: RawPhoneNumber, send_date: SendDate, page_size: PageSize) -> Self {
        Self {
            phone,
            send_date,
            page_size,
            current_page: CurrentPage::default(),
            biz_id: None,
        }
    }

    pub fn page(mut self, current_page: CurrentPage) -> Self {
        self.current_page = current_page;
        self
    }

    pub fn biz_id(mut self, biz_id: BizId) -> Self {
        self.biz_id = Some(biz_id);
        self
    }
}

impl Request for QuerySendDetails {
    fn action(&self) -> &str {
        Self::ACTION
    }

    fn params(&self) -> ParameterSet {
        let mut params = ParameterSet::new();
        params.insert("PhoneNumber".to_owned(), self.phone.raw().to_owned());
        params.insert(SendDate::FIELD.to_owned(), self.send_date.to_wire());
        params.insert(
            PageSize::FIELD.to_owned(),
            self.page_size.value().to_string(),
        );
        params.insert(
            CurrentPage::FIELD.to_owned(),
            self.current_page.value().to_string(),
        );
        if let Some(biz_id) = self.biz_id.as_ref() {
            params.insert(BizId::FIELD.to_owned(), biz_id.as_str().to_owned());
        }
        params
    }
}
