//! Contact, group and import endpoints.

use reqwest::Method;
use tracing::instrument;

use super::{EsputnikClient, EsputnikError, acknowledged, found, parse_error};
use crate::domain::{
    AsyncSession, Contact, ContactId, ContactSearch, Contacts, Group, GroupId, GroupSearch,
    ImportSessionId, ImportSessionStatus, Page, RawJson, SubscribeContact, ValidationError,
};
use crate::transport;

impl EsputnikClient {
    /// Create a contact (`POST v1/contact`).
    ///
    /// The client's default address book is used when the contact has none. On success the
    /// server-assigned id is stored in `contact.id` and `true` is returned; a response
    /// without an id yields `false` and leaves the contact untouched.
    #[instrument(skip_all)]
    pub async fn add_contact(&self, contact: &mut Contact) -> Result<bool, EsputnikError> {
        let body = transport::encode_contact_payload(contact, self.default_address_book_id)
            .map_err(parse_error)?;
        let response = self
            .call(Method::POST, "v1/contact", Vec::new(), Some(body))
            .await?;

        match transport::decode_created_id(&response.body) {
            Some(id) => {
                tracing::debug!(id, status = response.status, "contact created");
                contact.id = Some(ContactId::new(id));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fetch one contact (`GET v1/contact/{id}`); `None` when it does not exist.
    #[instrument(skip(self))]
    pub async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, EsputnikError> {
        let response = found(self.get(&format!("v1/contact/{id}"), Vec::new()).await)?;
        response
            .map(|response| transport::decode_contact(response.body).map_err(parse_error))
            .transpose()
    }

    /// Replace a contact (`PUT v1/contact/{id}`).
    ///
    /// Returns `false` when the contact does not exist or the server did not acknowledge.
    #[instrument(skip_all, fields(id = ?contact.id))]
    pub async fn update_contact(&self, contact: &Contact) -> Result<bool, EsputnikError> {
        let id = contact.id.ok_or(ValidationError::Empty { field: "id" })?;
        let body = transport::encode_contact_payload(contact, self.default_address_book_id)
            .map_err(parse_error)?;
        acknowledged(
            self.call(Method::PUT, &format!("v1/contact/{id}"), Vec::new(), Some(body))
                .await,
        )
    }

    /// Delete a contact (`DELETE v1/contact/{id}`); `false` when it does not exist.
    #[instrument(skip(self))]
    pub async fn delete_contact(&self, id: ContactId) -> Result<bool, EsputnikError> {
        acknowledged(
            self.call(Method::DELETE, &format!("v1/contact/{id}"), Vec::new(), None)
                .await,
        )
    }

    /// Search contacts (`GET v1/contacts`); the total is read from the `TotalCount` header.
    #[instrument(skip(self, search))]
    pub async fn search_contacts(
        &self,
        search: &ContactSearch,
        page: Page,
    ) -> Result<Contacts, EsputnikError> {
        let query = transport::encode_contact_search_query(search, page);
        let response = self.get("v1/contacts", query).await?;
        transport::decode_contacts_page(response.body, &response.headers).map_err(parse_error)
    }

    /// Bulk create/update contacts (`POST v1/contacts`) with a free-form payload.
    ///
    /// The import runs asynchronously; poll [`EsputnikClient::import_status`] with the
    /// returned session id.
    #[instrument(skip_all)]
    pub async fn update_contacts(&self, payload: RawJson) -> Result<AsyncSession, EsputnikError> {
        let body = transport::encode_json_payload(&payload).map_err(parse_error)?;
        let response = self
            .call(Method::POST, "v1/contacts", Vec::new(), Some(body))
            .await?;
        transport::decode_async_session(response.body).map_err(parse_error)
    }

    /// State of an asynchronous import (`GET v1/importstatus/{id}`).
    #[instrument(skip(self))]
    pub async fn import_status(
        &self,
        session: ImportSessionId,
    ) -> Result<Option<ImportSessionStatus>, EsputnikError> {
        let response = found(
            self.get(&format!("v1/importstatus/{session}"), Vec::new())
                .await,
        )?;
        response
            .map(|response| transport::decode_import_status(response.body).map_err(parse_error))
            .transpose()
    }

    /// Subscribe a contact (`POST v1/contact/subscribe`), storing the assigned id on success.
    #[instrument(skip_all)]
    pub async fn subscribe_contact(
        &self,
        request: &mut SubscribeContact,
    ) -> Result<bool, EsputnikError> {
        let body = transport::encode_subscribe_payload(request, self.default_address_book_id)
            .map_err(parse_error)?;
        let response = self
            .call(Method::POST, "v1/contact/subscribe", Vec::new(), Some(body))
            .await?;

        match transport::decode_created_id(&response.body) {
            Some(id) => {
                request.contact.id = Some(ContactId::new(id));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Search contact groups (`GET v1/groups`).
    #[instrument(skip(self, search))]
    pub async fn search_groups(
        &self,
        search: &GroupSearch,
        page: Page,
    ) -> Result<Vec<Group>, EsputnikError> {
        let query = transport::encode_group_search_query(search, page);
        let response = self.get("v1/groups", query).await?;
        transport::decode_groups(response.body).map_err(parse_error)
    }

    /// Contacts of a group (`GET v1/group/{id}/contacts`), with the `TotalCount` total.
    #[instrument(skip(self))]
    pub async fn group_contacts(
        &self,
        group: GroupId,
        page: Page,
    ) -> Result<Contacts, EsputnikError> {
        let response = self
            .get(
                &format!("v1/group/{group}/contacts"),
                transport::encode_page(page),
            )
            .await?;
        transport::decode_contacts_page(response.body, &response.headers).map_err(parse_error)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reqwest::header::{HeaderMap, HeaderValue};
    use serde_json::json;

    use super::super::tests::{FakeTransport, make_client, make_client_with_book};
    use super::*;
    use crate::domain::{AddressBookId, Channel};

    fn new_contact() -> Contact {
        Contact {
            first_name: Some("Ann".to_owned()),
            channels: vec![Channel::email("ann@example.com")],
            ..Default::default()
        }
    }

    fn total_count_headers(total: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("totalcount", HeaderValue::from_static(total));
        headers
    }

    #[tokio::test]
    async fn add_contact_injects_default_book_and_records_id() {
        let transport = FakeTransport::new(200, r#"{"id": 501}"#);
        let client = make_client_with_book(transport.clone(), Some(AddressBookId::new(7)));
        let mut contact = new_contact();

        assert!(client.add_contact(&mut contact).await.unwrap());
        assert_eq!(contact.id, Some(ContactId::new(501)));
        assert_eq!(contact.address_book_id, None);

        assert_eq!(transport.last_method(), Some(Method::POST));
        assert_eq!(transport.last_path().as_deref(), Some("/api/v1/contact"));
        assert_eq!(
            transport.last_body().map(|body| body["addressBookId"].clone()),
            Some(json!(7))
        );
    }

    #[tokio::test]
    async fn add_contact_keeps_explicit_book() {
        let transport = FakeTransport::new(200, r#"{"id": 1}"#);
        let client = make_client_with_book(transport.clone(), Some(AddressBookId::new(7)));
        let mut contact = Contact {
            address_book_id: Some(AddressBookId::new(3)),
            ..new_contact()
        };

        client.add_contact(&mut contact).await.unwrap();
        assert_eq!(
            transport.last_body().map(|body| body["addressBookId"].clone()),
            Some(json!(3))
        );
    }

    #[tokio::test]
    async fn add_contact_without_id_in_response_returns_false() {
        let client = make_client(FakeTransport::new(200, "{}"));
        let mut contact = new_contact();
        assert!(!client.add_contact(&mut contact).await.unwrap());
        assert_eq!(contact.id, None);
    }

    #[tokio::test]
    async fn get_contact_maps_not_found_to_none() {
        let client = make_client(FakeTransport::new(404, ""));
        assert_eq!(client.get_contact(ContactId::new(9)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn get_contact_reraises_other_errors() {
        for status in [400, 401] {
            let client = make_client(FakeTransport::new(status, "boom"));
            let err = client.get_contact(ContactId::new(9)).await.unwrap_err();
            assert_eq!(err.api_error().map(|api| api.code()), Some(status));
        }

        let client = make_client(FakeTransport::new(500, "boom"));
        let err = client.get_contact(ContactId::new(9)).await.unwrap_err();
        assert!(matches!(err, EsputnikError::HttpStatus(_)));
    }

    #[tokio::test]
    async fn get_contact_decodes_body() {
        let transport = FakeTransport::new(200, r#"{"id": 9, "firstName": "Ann"}"#);
        let client = make_client(transport.clone());
        let contact = client.get_contact(ContactId::new(9)).await.unwrap().unwrap();
        assert_eq!(contact.first_name.as_deref(), Some("Ann"));
        assert_eq!(transport.last_path().as_deref(), Some("/api/v1/contact/9"));
    }

    #[tokio::test]
    async fn update_and_delete_report_not_found_as_false() {
        let contact = Contact {
            id: Some(ContactId::new(9)),
            ..new_contact()
        };

        let client = make_client(FakeTransport::new(404, ""));
        assert!(!client.update_contact(&contact).await.unwrap());
        assert!(!client.delete_contact(ContactId::new(9)).await.unwrap());
    }

    #[tokio::test]
    async fn update_and_delete_follow_body_truthiness() {
        let contact = Contact {
            id: Some(ContactId::new(9)),
            ..new_contact()
        };

        for (body, expected) in [("true", true), (r#"{"id": 9}"#, true), ("", false), ("[]", false)]
        {
            let transport = FakeTransport::new(200, body);
            let client = make_client(transport.clone());
            assert_eq!(client.update_contact(&contact).await.unwrap(), expected);
            assert_eq!(transport.last_method(), Some(Method::PUT));

            let transport = FakeTransport::new(200, body);
            let client = make_client(transport.clone());
            assert_eq!(client.delete_contact(ContactId::new(9)).await.unwrap(), expected);
            assert_eq!(transport.last_method(), Some(Method::DELETE));
            assert_eq!(transport.last_path().as_deref(), Some("/api/v1/contact/9"));
        }
    }

    #[tokio::test]
    async fn update_and_delete_propagate_other_errors() {
        let contact = Contact {
            id: Some(ContactId::new(9)),
            ..new_contact()
        };
        let client = make_client(FakeTransport::new(401, ""));
        assert!(client.update_contact(&contact).await.is_err());
        assert!(client.delete_contact(ContactId::new(9)).await.is_err());
    }

    #[tokio::test]
    async fn update_contact_requires_id() {
        let client = make_client(FakeTransport::new(200, "true"));
        let err = client.update_contact(&new_contact()).await.unwrap_err();
        assert!(matches!(err, EsputnikError::Validation(_)));
    }

    #[tokio::test]
    async fn read_then_update_sends_back_unmodelled_fields() {
        let stored = json!({
            "id": 9,
            "firstName": "Ann",
            "addressBookId": 3,
            "ordersInfo": {"count": 2}
        });
        let client = make_client(FakeTransport::new(200, stored.to_string()));
        let contact = client.get_contact(ContactId::new(9)).await.unwrap().unwrap();

        let transport = FakeTransport::new(200, "true");
        let client = make_client(transport.clone());
        client.update_contact(&contact).await.unwrap();
        assert_eq!(transport.last_path().as_deref(), Some("/api/v1/contact/9"));
        assert_eq!(
            transport.last_body(),
            Some(json!({
                "firstName": "Ann",
                "addressBookId": 3,
                "ordersInfo": {"count": 2}
            }))
        );
    }

    #[tokio::test]
    async fn search_contacts_translates_page_and_reads_total() {
        let transport = FakeTransport::with_headers(
            200,
            r#"[{"id": 1}, {"id": 2}]"#,
            total_count_headers("42"),
        );
        let client = make_client(transport.clone());
        let search = ContactSearch {
            sms: Some("380501234567".to_owned()),
            ..Default::default()
        };

        let page = client
            .search_contacts(&search, Page::new(0, 2))
            .await
            .unwrap();
        assert_eq!(page.total_count, 42);
        assert_eq!(page.contacts.len(), 2);

        let query = transport.last_query();
        assert_eq!(query.get("startindex").map(String::as_str), Some("1"));
        assert_eq!(query.get("maxrows").map(String::as_str), Some("2"));
        assert_eq!(query.get("sms").map(String::as_str), Some("380501234567"));
        assert_eq!(transport.last_path().as_deref(), Some("/api/v1/contacts"));
    }

    #[tokio::test]
    async fn group_contacts_reads_total() {
        let transport =
            FakeTransport::with_headers(200, r#"[{"id": 1}]"#, total_count_headers("300"));
        let client = make_client(transport.clone());

        let page = client
            .group_contacts(GroupId::new(12), Page::new(100, 100))
            .await
            .unwrap();
        assert_eq!(page.total_count, 300);
        assert_eq!(
            transport.last_path().as_deref(),
            Some("/api/v1/group/12/contacts")
        );
        assert_eq!(
            transport.last_query().get("startindex").map(String::as_str),
            Some("101")
        );
    }

    #[tokio::test]
    async fn search_groups_maps_each_group() {
        let transport = FakeTransport::new(
            200,
            r#"[{"id": 1, "name": "vip", "type": "Static"}, {"id": 2, "name": "new"}]"#,
        );
        let client = make_client(transport.clone());
        let search = GroupSearch {
            name: Some("v".to_owned()),
        };

        let groups = client
            .search_groups(&search, Page::default())
            .await
            .unwrap();
        assert_eq!(
            groups.iter().map(|g| g.name.as_deref()).collect::<Vec<_>>(),
            vec![Some("vip"), Some("new")]
        );
        assert_eq!(
            transport.last_query().get("name").map(String::as_str),
            Some("v")
        );
    }

    #[tokio::test]
    async fn update_contacts_passes_raw_payload_through() {
        let transport = FakeTransport::new(200, r#"{"asyncSessionId": 77}"#);
        let client = make_client(transport.clone());
        let payload = json!({
            "contacts": [{"channels": [{"type": "email", "value": "a@b.c"}]}],
            "dedupeOn": "email",
            "restoreDeleted": false
        });

        let session = client
            .update_contacts(RawJson::new(payload.clone()))
            .await
            .unwrap();
        assert_eq!(session.async_session_id, Some(ImportSessionId::new(77)));
        assert_eq!(transport.last_body(), Some(payload));
        assert_eq!(transport.last_path().as_deref(), Some("/api/v1/contacts"));
    }

    #[tokio::test]
    async fn import_status_maps_not_found_to_none() {
        let client = make_client(FakeTransport::new(404, ""));
        assert_eq!(
            client.import_status(ImportSessionId::new(1)).await.unwrap(),
            None
        );

        let transport = FakeTransport::new(200, r#"{"status": "FINISHED"}"#);
        let client = make_client(transport.clone());
        let status = client
            .import_status(ImportSessionId::new(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(status.status.as_deref(), Some("FINISHED"));
        assert_eq!(
            transport.last_path().as_deref(),
            Some("/api/v1/importstatus/1")
        );
    }

    #[tokio::test]
    async fn subscribe_contact_records_id() {
        let transport = FakeTransport::new(200, r#"{"id": 88}"#);
        let client = make_client_with_book(transport.clone(), Some(AddressBookId::new(7)));
        let mut request = SubscribeContact {
            contact: new_contact(),
            groups: vec!["news".to_owned()],
            form_type: Some("popup".to_owned()),
        };

        assert!(client.subscribe_contact(&mut request).await.unwrap());
        assert_eq!(request.contact.id, Some(ContactId::new(88)));
        let body = transport.last_body().unwrap();
        assert_eq!(body["contact"]["addressBookId"], json!(7));
        assert_eq!(body["formType"], json!("popup"));
    }
}
