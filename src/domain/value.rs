use std::fmt;

use phonenumber::country;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Account login used for HTTP basic authentication.
///
/// Invariant: non-empty after trimming.
pub struct Login(String);

impl Login {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "login";

    /// Create a validated [`Login`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated login.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
/// Account password (or API key) used for HTTP basic authentication.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
/// The value is redacted from `Debug` output.
pub struct Password(SecretString);

impl Password {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(SecretString::new(value)))
    }

    /// Expose the password for the authorization header.
    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a server-assigned numeric id.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the underlying numeric id.
            pub fn value(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

numeric_id!(
    /// Server-assigned contact id.
    ContactId
);
numeric_id!(
    /// Address book id. Contacts are stored in exactly one address book.
    AddressBookId
);
numeric_id!(
    /// Contact group (segment) id.
    GroupId
);
numeric_id!(
    /// Stored email/SMS message (template) id, also used for prepared sends.
    MessageId
);
numeric_id!(
    /// Asynchronous import session id returned by bulk contact updates.
    ImportSessionId
);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Opaque id of one submitted outbound message, used to query its delivery status.
///
/// Invariant: non-empty after trimming.
pub struct RequestId(String);

impl RequestId {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "ids";

    /// Create a validated [`RequestId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
}

impl PhoneNumber {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "phoneNumbers";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164 })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation, as sent on the wire.
    pub fn e164(&self) -> &str {
        &self.e164
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.e164)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Zero-based window over a paginated listing.
///
/// The API counts rows from 1 (`startindex`), so `offset` 0 is sent as `startindex=1`.
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    /// Query parameter carrying the 1-based first row.
    pub const START_INDEX: &'static str = "startindex";
    /// Query parameter carrying the page size.
    pub const MAX_ROWS: &'static str = "maxrows";
    /// Largest page size accepted by the API.
    pub const MAX_LIMIT: u32 = 500;

    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// 1-based index of the first row in this page.
    pub fn start_index(self) -> u64 {
        u64::from(self.offset) + 1
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Self::MAX_LIMIT,
        }
    }
}
