//! Account-level endpoints: version, balance, address books, interfaces, call-outs, events.

use reqwest::Method;
use tracing::instrument;

use super::{EsputnikClient, EsputnikError, parse_error};
use crate::domain::{AddressBook, Balance, CallOut, EventDto, InterfaceDto, Page, Version};
use crate::transport;

impl EsputnikClient {
    /// API version (`GET v1/version`).
    #[instrument(skip(self))]
    pub async fn version(&self) -> Result<Version, EsputnikError> {
        let response = self.get("v1/version", Vec::new()).await?;
        transport::decode_version(response.body).map_err(parse_error)
    }

    /// Account balance (`GET v1/balance`).
    #[instrument(skip(self))]
    pub async fn balance(&self) -> Result<Balance, EsputnikError> {
        let response = self.get("v1/balance", Vec::new()).await?;
        transport::decode_balance(&response.text).map_err(parse_error)
    }

    /// Address books with their field definitions (`GET v1/addressbooks`).
    #[instrument(skip(self))]
    pub async fn address_books(&self) -> Result<Vec<AddressBook>, EsputnikError> {
        let response = self.get("v1/addressbooks", Vec::new()).await?;
        transport::decode_address_books(response.body).map_err(parse_error)
    }

    /// Configured sending interfaces (`GET v1/interfaces`).
    #[instrument(skip(self))]
    pub async fn interfaces(&self) -> Result<Vec<InterfaceDto>, EsputnikError> {
        let response = self.get("v1/interfaces", Vec::new()).await?;
        transport::decode_interfaces(response.body).map_err(parse_error)
    }

    /// Campaign sends (`GET v1/callouts`).
    #[instrument(skip(self))]
    pub async fn call_outs(&self, page: Page) -> Result<Vec<CallOut>, EsputnikError> {
        let response = self.get("v1/callouts", transport::encode_page(page)).await?;
        transport::decode_call_outs(response.body).map_err(parse_error)
    }

    /// Register a custom event (`POST v1/event`).
    ///
    /// The endpoint answers with an empty body on success, so any 2xx counts as accepted.
    #[instrument(skip(self, event), fields(event_type = %event.event_type_key))]
    pub async fn add_event(&self, event: &EventDto) -> Result<bool, EsputnikError> {
        let body = transport::encode_json_payload(event).map_err(parse_error)?;
        let response = self.call(Method::POST, "v1/event", Vec::new(), Some(body)).await?;
        Ok(response.body.is_null() || transport::is_truthy(&response.body))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::tests::{FakeTransport, make_client};
    use super::*;

    #[tokio::test]
    async fn balance_uses_balance_endpoint() {
        let transport = FakeTransport::new(
            200,
            r#"{"currency": "UAH", "balance": "99.90", "bonusEmails": 5, "bonusSms": 0}"#,
        );
        let client = make_client(transport.clone());

        let balance = client.balance().await.unwrap();
        assert_eq!(balance.balance.as_deref(), Some("99.90"));
        assert_eq!(balance.bonus_sms, Some(0));
        assert_eq!(transport.last_path().as_deref(), Some("/api/v1/balance"));
        assert_eq!(transport.last_method(), Some(Method::GET));
    }

    #[tokio::test]
    async fn numeric_balance_keeps_server_formatting() {
        let client = make_client(FakeTransport::new(200, r#"{"balance": 10.50}"#));

        let balance = client.balance().await.unwrap();
        assert_eq!(balance.balance.as_deref(), Some("10.50"));
    }

    #[tokio::test]
    async fn version_and_address_books() {
        let client = make_client(FakeTransport::new(200, r#"{"version": "1.2"}"#));
        assert_eq!(client.version().await.unwrap().version.as_deref(), Some("1.2"));

        let client = make_client(FakeTransport::new(
            200,
            r#"{"addressBook": {"addressBookId": 7, "name": "Main"}}"#,
        ));
        let books = client.address_books().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name.as_deref(), Some("Main"));
    }

    #[tokio::test]
    async fn call_outs_translate_page() {
        let transport = FakeTransport::new(200, r#"[{"id": 1, "name": "Spring"}]"#);
        let client = make_client(transport.clone());

        let call_outs = client.call_outs(Page::new(10, 5)).await.unwrap();
        assert_eq!(call_outs.len(), 1);

        let query = transport.last_query();
        assert_eq!(query.get("startindex").map(String::as_str), Some("11"));
        assert_eq!(query.get("maxrows").map(String::as_str), Some("5"));
    }

    #[tokio::test]
    async fn interfaces_accept_empty_list() {
        let client = make_client(FakeTransport::new(200, "[]"));
        assert!(client.interfaces().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_event_posts_payload_and_accepts_empty_body() {
        let transport = FakeTransport::new(200, "");
        let client = make_client(transport.clone());
        let event = EventDto::new("purchase", "ann@example.com")
            .unwrap()
            .param("sum", "12");

        assert!(client.add_event(&event).await.unwrap());
        assert_eq!(transport.last_method(), Some(Method::POST));
        assert_eq!(transport.last_path().as_deref(), Some("/api/v1/event"));
        assert_eq!(
            transport.last_body(),
            Some(json!({
                "eventTypeKey": "purchase",
                "keyValue": "ann@example.com",
                "params": [{"name": "sum", "value": "12"}]
            }))
        );
    }

    #[tokio::test]
    async fn add_event_surfaces_bad_request() {
        let client = make_client(FakeTransport::new(400, "unknown event type"));
        let event = EventDto::new("nope", "ann@example.com").unwrap();
        let err = client.add_event(&event).await.unwrap_err();
        assert_eq!(err.api_error().map(|api| api.code()), Some(400));
    }
}
