use serde::Deserialize;
use serde::de::Error as DeError;

/// Amount returned either as a JSON string or as a JSON number.
///
/// Numbers keep their raw token, so `10.50` stays `"10.50"`. Requires a text deserializer
/// (`serde_json::from_str`); a `serde_json::Value` has already lost the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportMoney(String);

impl TransportMoney {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportMoney {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get().trim();

        match token.as_bytes().first() {
            Some(b'"') => serde_json::from_str::<String>(token)
                .map(Self)
                .map_err(D::Error::custom),
            Some(b'-' | b'0'..=b'9') => Ok(Self(token.to_owned())),
            _ => Err(D::Error::custom("amount must be a JSON string or number")),
        }
    }
}
