use std::io;

use esputnik::{EsputnikClient, PhoneNumber, SendSms};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let phone_raw = std::env::var("ESPUTNIK_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "ESPUTNIK_PHONE environment variable is required",
        )
    })?;
    let sender = std::env::var("ESPUTNIK_SENDER").unwrap_or_else(|_| "esputnik".to_owned());
    let message = std::env::var("ESPUTNIK_MESSAGE")
        .unwrap_or_else(|_| "Hello from the esputnik demo.".to_owned());

    let client = EsputnikClient::from_env()?;
    let phone = PhoneNumber::parse(None, phone_raw)?;
    let request = SendSms::to_numbers(sender, message, vec![phone])?;

    for result in client.send_sms(&request).await? {
        println!(
            "locator: {:?}, status: {:?}, message: {:?}",
            result.locator, result.status, result.message
        );
    }

    Ok(())
}
