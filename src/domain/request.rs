use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::response::Contact;
use crate::domain::validation::ValidationError;
use crate::domain::value::{GroupId, PhoneNumber};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filters for `GET v1/contacts`. Unset filters are not sent.
pub struct ContactSearch {
    pub email: Option<String>,
    pub sms: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub external_customer_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filters for `GET v1/groups`.
pub struct GroupSearch {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filters for the stored email/SMS message listings.
pub struct MessageSearch {
    pub search: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Instant email to a list of addresses.
pub struct SendEmail {
    from: String,
    subject: String,
    html_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    plain_text: Option<String>,
    emails: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

impl SendEmail {
    /// Create an instant email. `from`, `subject` and the recipient list must not be empty.
    pub fn new(
        from: impl Into<String>,
        subject: impl Into<String>,
        html_text: impl Into<String>,
        emails: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let from = non_empty(from.into(), "from")?;
        let subject = non_empty(subject.into(), "subject")?;
        if emails.iter().all(|email| email.trim().is_empty()) {
            return Err(ValidationError::Empty { field: "emails" });
        }
        Ok(Self {
            from,
            subject,
            html_text: html_text.into(),
            plain_text: None,
            emails,
            tags: Vec::new(),
        })
    }

    pub fn with_plain_text(mut self, plain_text: impl Into<String>) -> Self {
        self.plain_text = Some(plain_text.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Instant SMS, either to explicit phone numbers or to a contact group.
pub struct SendSms {
    from: String,
    text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    phone_numbers: Vec<PhoneNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_id: Option<GroupId>,
}

impl SendSms {
    /// Send `text` to each of `phone_numbers` (sent in E.164 form).
    pub fn to_numbers(
        from: impl Into<String>,
        text: impl Into<String>,
        phone_numbers: Vec<PhoneNumber>,
    ) -> Result<Self, ValidationError> {
        if phone_numbers.is_empty() {
            return Err(ValidationError::Empty {
                field: PhoneNumber::FIELD,
            });
        }
        Ok(Self {
            from: non_empty(from.into(), "from")?,
            text: non_empty(text.into(), "text")?,
            phone_numbers,
            group_id: None,
        })
    }

    /// Send `text` to every contact of a group.
    pub fn to_group(
        from: impl Into<String>,
        text: impl Into<String>,
        group_id: GroupId,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            from: non_empty(from.into(), "from")?,
            text: non_empty(text.into(), "text")?,
            phone_numbers: Vec::new(),
            group_id: Some(group_id),
        })
    }

    pub fn phone_numbers(&self) -> &[PhoneNumber] {
        &self.phone_numbers
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Substitution parameter of a prepared message.
pub struct MessageParam {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Recipients and substitutions for sending a prepared (stored) message.
///
/// With `email = true` the recipients are email addresses, otherwise phone numbers.
pub struct MessageParams {
    pub recipients: Vec<String>,
    pub email: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<MessageParam>,
}

impl MessageParams {
    pub fn emails(recipients: Vec<String>) -> Self {
        Self {
            recipients,
            email: true,
            ..Default::default()
        }
    }

    pub fn phones(recipients: Vec<String>) -> Self {
        Self {
            recipients,
            email: false,
            ..Default::default()
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(MessageParam {
            key: key.into(),
            value: value.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParam {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A custom event that may trigger workflows for the contact identified by `key_value`.
pub struct EventDto {
    pub event_type_key: String,
    pub key_value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<EventParam>,
}

impl EventDto {
    pub fn new(
        event_type_key: impl Into<String>,
        key_value: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            event_type_key: non_empty(event_type_key.into(), "eventTypeKey")?,
            key_value: non_empty(key_value.into(), "keyValue")?,
            params: Vec::new(),
        })
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(EventParam {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Subscription of a contact, optionally into named groups.
pub struct SubscribeContact {
    pub contact: Contact,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
/// Free-form JSON payload, passed through as-is.
///
/// Only bulk contact updates accept this; every other operation takes typed input.
pub struct RawJson(Value);

impl RawJson {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for RawJson {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(value)
}
