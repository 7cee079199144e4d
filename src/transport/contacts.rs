use reqwest::header::HeaderMap;
use serde_json::Value;

use super::TransportError;
use super::shape::decode_one_or_many;
use crate::domain::{
    AddressBookId, AsyncSession, Contact, Contacts, Group, ImportSessionStatus, SubscribeContact,
};

/// Response header carrying the total number of rows matched by a paginated listing.
pub const TOTAL_COUNT_HEADER: &str = "TotalCount";

/// JSON payload for creating or updating a contact.
///
/// When the contact has no address book, `default_book` is filled in; an explicit one is kept.
/// The id travels in the URL path, so it is stripped from the body.
pub fn encode_contact_payload(
    contact: &Contact,
    default_book: Option<AddressBookId>,
) -> Result<Value, TransportError> {
    let contact = Contact {
        id: None,
        ..with_default_book(contact, default_book)
    };
    Ok(serde_json::to_value(contact)?)
}

pub fn encode_subscribe_payload(
    request: &SubscribeContact,
    default_book: Option<AddressBookId>,
) -> Result<Value, TransportError> {
    let request = SubscribeContact {
        contact: with_default_book(&request.contact, default_book),
        ..request.clone()
    };
    Ok(serde_json::to_value(request)?)
}

fn with_default_book(contact: &Contact, default_book: Option<AddressBookId>) -> Contact {
    let mut contact = contact.clone();
    if contact.address_book_id.is_none() {
        contact.address_book_id = default_book;
    }
    contact
}

pub fn decode_contact(body: Value) -> Result<Contact, TransportError> {
    Ok(serde_json::from_value(body)?)
}

/// Decode a page of contacts; the total comes from [`TOTAL_COUNT_HEADER`], not the body.
pub fn decode_contacts_page(body: Value, headers: &HeaderMap) -> Result<Contacts, TransportError> {
    let contacts: Vec<Contact> = decode_one_or_many(body)?;
    let total_count = parse_total_count(headers).unwrap_or(contacts.len() as u64);
    Ok(Contacts {
        total_count,
        contacts,
    })
}

pub fn parse_total_count(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

pub fn decode_groups(body: Value) -> Result<Vec<Group>, TransportError> {
    decode_one_or_many(body)
}

pub fn decode_async_session(body: Value) -> Result<AsyncSession, TransportError> {
    Ok(serde_json::from_value(body)?)
}

pub fn decode_import_status(body: Value) -> Result<ImportSessionStatus, TransportError> {
    Ok(serde_json::from_value(body)?)
}
