//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    ContactSearch, EventDto, EventParam, GroupSearch, MessageParam, MessageParams, MessageSearch,
    RawJson, SendEmail, SendSms, SubscribeContact,
};
pub use response::{
    AddressBook, AsyncSession, Balance, CallOut, Channel, Contact, ContactAddress, ContactField,
    Contacts, EmailMessage, FieldDefinition, FieldGroup, Group, ImportSessionStatus,
    InstantMessageStatusDto, InterfaceDto, SendMessageResultDto, SmsMessage, Version,
};
pub use validation::ValidationError;
pub use value::{
    AddressBookId, ContactId, GroupId, ImportSessionId, Login, MessageId, Page, Password,
    PhoneNumber, RequestId,
};
