use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::value::{AddressBookId, ContactId, GroupId, ImportSessionId, MessageId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// A contact stored in an address book.
///
/// `id` is absent until the contact has been created on the server. Attributes this type
/// does not model are kept in [`Contact::extra`] so that a contact read from the API can be
/// sent back in an update without losing fields.
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub channels: Vec<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<ContactAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_book_id: Option<AddressBookId>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub fields: Vec<ContactField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_key: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub groups: Vec<Group>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Contact {
    /// Returns the first channel value of the given type (`email`, `sms`, ...).
    pub fn channel(&self, kind: &str) -> Option<&str> {
        self.channels
            .iter()
            .find(|channel| channel.kind.as_deref() == Some(kind))
            .and_then(|channel| channel.value.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// A delivery channel of a contact, e.g. `{"type": "email", "value": "a@b.c"}`.
pub struct Channel {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Channel {
    pub const EMAIL: &'static str = "email";
    pub const SMS: &'static str = "sms";

    pub fn email(value: impl Into<String>) -> Self {
        Self {
            kind: Some(Self::EMAIL.to_owned()),
            value: Some(value.into()),
        }
    }

    pub fn sms(value: impl Into<String>) -> Self {
        Self {
            kind: Some(Self::SMS.to_owned()),
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Value of an additional address-book field, referenced by field id.
pub struct ContactField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
/// One page of contacts plus the total number of matches reported by the server.
pub struct Contacts {
    pub total_count: u64,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<GroupId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressBook {
    pub address_book_id: Option<AddressBookId>,
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub field_groups: Vec<FieldGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldGroup {
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDefinition {
    pub id: Option<u64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub required: Option<bool>,
    #[serde(deserialize_with = "null_as_empty")]
    pub possible_values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// A stored email message (template).
pub struct EmailMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MessageId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// A stored SMS message (template).
pub struct SmsMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MessageId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Outcome of submitting one outbound message.
pub struct SendMessageResultDto {
    pub locator: Option<String>,
    pub request_id: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Delivery status of an instant email/SMS.
pub struct InstantMessageStatusDto {
    pub request_id: Option<String>,
    pub locator: Option<String>,
    pub status: Option<String>,
    pub status_description: Option<String>,
    pub send_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Account balance. Amounts keep the exact decimal text returned by the server.
pub struct Balance {
    pub currency: Option<String>,
    pub balance: Option<String>,
    pub bonus_emails: Option<i64>,
    pub bonus_sms: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// A campaign send (call-out) with its aggregate state.
pub struct CallOut {
    pub id: Option<u64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub send_date: Option<String>,
    pub recipients_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Version {
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// A configured sending interface (email domain, SMS sender name, ...).
pub struct InterfaceDto {
    pub id: Option<u64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportSessionStatus {
    pub status: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Handle of an asynchronous bulk contact import.
pub struct AsyncSession {
    pub async_session_id: Option<ImportSessionId>,
}

/// Lists may arrive as `null`; read that as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
