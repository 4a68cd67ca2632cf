use std::io;
use std::time::Duration;

use dysms::{
    Credentials, RawPhoneNumber, SendOptions, SendSms, SignName, SmsClient, TemplateCode,
    TemplateParam,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let phone_raw = std::env::var("DYSMS_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "DYSMS_PHONE environment variable is required",
        )
    })?;
    let sign_name = std::env::var("DYSMS_SIGN_NAME").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "DYSMS_SIGN_NAME environment variable is required",
        )
    })?;
    let template_code =
        std::env::var("DYSMS_TEMPLATE_CODE").unwrap_or_else(|_| "SMS_0000001".to_owned());
    let code = std::env::var("DYSMS_CODE").unwrap_or_else(|_| "123456".to_owned());

    let client = SmsClient::builder(Credentials::from_env()?)
        .timeout(Duration::from_secs(10))
        .build()?;
    let request = SendSms::one(
        RawPhoneNumber::new(phone_raw)?,
        SignName::new(sign_name)?,
        TemplateCode::new(template_code)?,
        SendOptions {
            template_param: Some(TemplateParam::from_pairs([("code", code)])),
            ..Default::default()
        },
    );

    let receipt = client.send(&request).await?;
    println!(
        "request_id: {:?}, biz_id: {:?}",
        receipt.request_id, receipt.biz_id
    );

    Ok(())
}
