//! Stored messages, instant sends and delivery status.

use reqwest::Method;
use tracing::instrument;

use super::{EsputnikClient, EsputnikError, acknowledged, found, parse_error};
use crate::domain::{
    EmailMessage, InstantMessageStatusDto, MessageId, MessageParams, MessageSearch, Page,
    RequestId, SendEmail, SendMessageResultDto, SendSms, SmsMessage, ValidationError,
};
use crate::transport;

impl EsputnikClient {
    /// Search stored emails (`GET v1/messages/email`).
    #[instrument(skip(self, search))]
    pub async fn search_emails(
        &self,
        search: &MessageSearch,
        page: Page,
    ) -> Result<Vec<EmailMessage>, EsputnikError> {
        let query = transport::encode_message_search_query(search, page);
        let response = self.get("v1/messages/email", query).await?;
        transport::decode_email_messages(response.body).map_err(parse_error)
    }

    /// Fetch one stored email (`GET v1/messages/email/{id}`); `None` when it does not exist.
    #[instrument(skip(self))]
    pub async fn get_email(&self, id: MessageId) -> Result<Option<EmailMessage>, EsputnikError> {
        let response = found(
            self.get(&format!("v1/messages/email/{id}"), Vec::new())
                .await,
        )?;
        response
            .map(|response| transport::decode_email_message(response.body).map_err(parse_error))
            .transpose()
    }

    /// Store a new email (`POST v1/messages/email`), recording the assigned id in `message.id`.
    #[instrument(skip_all)]
    pub async fn add_email(&self, message: &mut EmailMessage) -> Result<bool, EsputnikError> {
        let body = transport::encode_email_payload(message).map_err(parse_error)?;
        let response = self
            .call(Method::POST, "v1/messages/email", Vec::new(), Some(body))
            .await?;

        match transport::decode_created_id(&response.body) {
            Some(id) => {
                tracing::debug!(id, status = response.status, "email created");
                message.id = Some(MessageId::new(id));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace a stored email (`PUT v1/messages/email/{id}`); `false` when it does not exist.
    #[instrument(skip_all, fields(id = ?message.id))]
    pub async fn update_message(&self, message: &EmailMessage) -> Result<bool, EsputnikError> {
        let id = message.id.ok_or(ValidationError::Empty { field: "id" })?;
        let body = transport::encode_email_payload(message).map_err(parse_error)?;
        acknowledged(
            self.call(
                Method::PUT,
                &format!("v1/messages/email/{id}"),
                Vec::new(),
                Some(body),
            )
            .await,
        )
    }

    /// Delete a stored email (`DELETE v1/messages/email/{id}`); `false` when it does not exist.
    #[instrument(skip(self))]
    pub async fn delete_email(&self, id: MessageId) -> Result<bool, EsputnikError> {
        acknowledged(
            self.call(
                Method::DELETE,
                &format!("v1/messages/email/{id}"),
                Vec::new(),
                None,
            )
            .await,
        )
    }

    /// Search stored SMS messages (`GET v1/messages/sms`).
    #[instrument(skip(self, search))]
    pub async fn search_sms_messages(
        &self,
        search: &MessageSearch,
        page: Page,
    ) -> Result<Vec<SmsMessage>, EsputnikError> {
        let query = transport::encode_message_search_query(search, page);
        let response = self.get("v1/messages/sms", query).await?;
        transport::decode_sms_messages(response.body).map_err(parse_error)
    }

    /// Fetch one stored SMS (`GET v1/messages/sms/{id}`); `None` when it does not exist.
    #[instrument(skip(self))]
    pub async fn get_sms_message(
        &self,
        id: MessageId,
    ) -> Result<Option<SmsMessage>, EsputnikError> {
        let response = found(self.get(&format!("v1/messages/sms/{id}"), Vec::new()).await)?;
        response
            .map(|response| transport::decode_sms_message(response.body).map_err(parse_error))
            .transpose()
    }

    /// Send an instant email (`POST v1/message/email`).
    ///
    /// Returns one result per submitted message; see [`EsputnikClient::send_sms`] for the
    /// accepted response shapes.
    #[instrument(skip_all, fields(recipients = request.emails().len()))]
    pub async fn send_email(
        &self,
        request: &SendEmail,
    ) -> Result<Vec<SendMessageResultDto>, EsputnikError> {
        self.send("v1/message/email", transport::encode_json_payload(request))
            .await
    }

    /// Send an instant SMS (`POST v1/message/sms`).
    ///
    /// The server may answer with a bare result, a single result under `results`, or a list
    /// under `results`; all three are returned as a list.
    #[instrument(skip_all, fields(recipients = request.phone_numbers().len()))]
    pub async fn send_sms(
        &self,
        request: &SendSms,
    ) -> Result<Vec<SendMessageResultDto>, EsputnikError> {
        self.send("v1/message/sms", transport::encode_json_payload(request))
            .await
    }

    /// Send a prepared (stored) message with substitutions (`POST v1/message/{id}/send`).
    #[instrument(skip(self, params))]
    pub async fn send_prepared_message(
        &self,
        id: MessageId,
        params: &MessageParams,
    ) -> Result<Vec<SendMessageResultDto>, EsputnikError> {
        self.send(
            &format!("v1/message/{id}/send"),
            transport::encode_json_payload(params),
        )
        .await
    }

    async fn send(
        &self,
        path: &str,
        payload: Result<serde_json::Value, transport::TransportError>,
    ) -> Result<Vec<SendMessageResultDto>, EsputnikError> {
        let body = payload.map_err(parse_error)?;
        let response = self.call(Method::POST, path, Vec::new(), Some(body)).await?;
        transport::decode_send_results(response.body).map_err(parse_error)
    }

    /// Delivery status of instant emails (`GET v1/message/status?ids=...`).
    #[instrument(skip(self))]
    pub async fn instant_messages_status(
        &self,
        ids: &[RequestId],
    ) -> Result<Vec<InstantMessageStatusDto>, EsputnikError> {
        self.statuses("v1/message/status", ids).await
    }

    /// Delivery status of instant SMS (`GET v1/message/sms/status?ids=...`).
    #[instrument(skip(self))]
    pub async fn instant_sms_status(
        &self,
        ids: &[RequestId],
    ) -> Result<Vec<InstantMessageStatusDto>, EsputnikError> {
        self.statuses("v1/message/sms/status", ids).await
    }

    async fn statuses(
        &self,
        path: &str,
        ids: &[RequestId],
    ) -> Result<Vec<InstantMessageStatusDto>, EsputnikError> {
        if ids.is_empty() {
            return Err(ValidationError::Empty {
                field: RequestId::FIELD,
            }
            .into());
        }
        let response = self.get(path, transport::encode_ids_query(ids)).await?;
        transport::decode_statuses(response.body).map_err(parse_error)
    }
}
