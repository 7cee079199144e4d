//! Transport layer: wire-format details (query encoding, payloads, response shapes).

mod account;
mod contacts;
mod messages;
mod money;
mod query;
mod shape;

pub use account::{
    decode_address_books, decode_balance, decode_call_outs, decode_interfaces, decode_version,
};
pub use contacts::{
    decode_async_session, decode_contact, decode_contacts_page, decode_groups,
    decode_import_status, encode_contact_payload, encode_subscribe_payload,
};
pub use messages::{
    decode_email_message, decode_email_messages, decode_sms_message, decode_sms_messages,
    encode_email_payload, encode_json_payload,
};
pub use query::{
    encode_contact_search_query, encode_group_search_query, encode_ids_query,
    encode_message_search_query, encode_page,
};
pub use shape::{decode_created_id, decode_send_results, decode_statuses, is_truthy};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("unexpected JSON shape: {0}")]
    Json(#[from] serde_json::Error),
}
