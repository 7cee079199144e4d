//! Typed Rust client for the eSputnik marketing-automation HTTP API.
//!
//! The crate is split into a domain layer of strong types and DTOs, a transport layer
//! for wire-format quirks (pagination, polymorphic response shapes), and a small client
//! layer issuing one HTTP request per method.
//!
//! ```rust,no_run
//! use esputnik::{Auth, Contact, Channel, EsputnikClient, AddressBookId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), esputnik::EsputnikError> {
//!     let client = EsputnikClient::builder(Auth::basic("user@example.com", "...")?)
//!         .default_address_book_id(AddressBookId::new(7))
//!         .build()?;
//!
//!     let mut contact = Contact {
//!         first_name: Some("Ann".to_owned()),
//!         channels: vec![Channel::email("ann@example.com")],
//!         ..Default::default()
//!     };
//!     if client.add_contact(&mut contact).await? {
//!         println!("created contact {:?}", contact.id);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ApiError, Auth, EsputnikClient, EsputnikClientBuilder, EsputnikError, HttpStatusError,
};
pub use domain::{
    AddressBook, AddressBookId, AsyncSession, Balance, CallOut, Channel, Contact, ContactId,
    ContactSearch, Contacts, EmailMessage, EventDto, Group, GroupId, GroupSearch,
    ImportSessionId, ImportSessionStatus, InstantMessageStatusDto, InterfaceDto, MessageId,
    MessageParams, MessageSearch, Page, PhoneNumber, RawJson, RequestId, SendEmail,
    SendMessageResultDto, SendSms, SmsMessage, SubscribeContact, ValidationError, Version,
};
