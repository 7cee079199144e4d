use serde::Serialize;
use serde_json::Value;

use super::TransportError;
use super::shape::decode_one_or_many;
use crate::domain::{EmailMessage, SmsMessage};

/// Serialize a typed payload; `None` fields are omitted by the payload types themselves.
pub fn encode_json_payload<T: Serialize>(payload: &T) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(payload)?)
}

/// JSON payload for creating or updating a stored email.
///
/// The id travels in the URL path, so it is stripped from the body.
pub fn encode_email_payload(message: &EmailMessage) -> Result<Value, TransportError> {
    let message = EmailMessage {
        id: None,
        ..message.clone()
    };
    encode_json_payload(&message)
}

pub fn decode_email_message(body: Value) -> Result<EmailMessage, TransportError> {
    Ok(serde_json::from_value(body)?)
}

pub fn decode_email_messages(body: Value) -> Result<Vec<EmailMessage>, TransportError> {
    decode_one_or_many(body)
}

pub fn decode_sms_message(body: Value) -> Result<SmsMessage, TransportError> {
    Ok(serde_json::from_value(body)?)
}

pub fn decode_sms_messages(body: Value) -> Result<Vec<SmsMessage>, TransportError> {
    decode_one_or_many(body)
}
