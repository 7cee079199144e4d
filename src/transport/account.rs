use serde::Deserialize;
use serde_json::Value;

use super::TransportError;
use super::money::TransportMoney;
use super::shape::{decode_one_or_many, decode_wrapped_list};
use crate::domain::{AddressBook, Balance, CallOut, InterfaceDto, Version};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceJsonResponse {
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    balance: Option<TransportMoney>,
    #[serde(default)]
    bonus_emails: Option<TransportCount>,
    #[serde(default)]
    bonus_sms: Option<TransportCount>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportCount {
    Int(i64),
    String(String),
}

impl TransportCount {
    fn into_i64(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::String(value) => value.trim().parse::<i64>().ok(),
        }
    }
}

/// Decode the balance from the undecoded body text so numeric amounts keep their token.
pub fn decode_balance(text: &str) -> Result<Balance, TransportError> {
    let parsed: BalanceJsonResponse = serde_json::from_str(text)?;
    Ok(Balance {
        currency: parsed.currency,
        balance: parsed.balance.map(TransportMoney::into_string),
        bonus_emails: parsed.bonus_emails.and_then(TransportCount::into_i64),
        bonus_sms: parsed.bonus_sms.and_then(TransportCount::into_i64),
    })
}

pub fn decode_version(body: Value) -> Result<Version, TransportError> {
    Ok(serde_json::from_value(body)?)
}

pub fn decode_address_books(body: Value) -> Result<Vec<AddressBook>, TransportError> {
    decode_wrapped_list(body, "addressBook")
}

pub fn decode_interfaces(body: Value) -> Result<Vec<InterfaceDto>, TransportError> {
    decode_one_or_many(body)
}

pub fn decode_call_outs(body: Value) -> Result<Vec<CallOut>, TransportError> {
    decode_one_or_many(body)
}
