//! Domain types and wire payloads

pub mod contact;
pub mod event;
pub mod http;
pub mod session;
pub mod transaction;

pub use contact::{ContactRecord, ListFolder, ListMergeRequest, MergeRule, Record, RecordData};
pub use event::{
    CustomEvent, CustomEventRequest, EventName, ListName, OptionalData, Recipient, RecipientData,
};
pub use http::{HttpMethod, RequestHeaders};
pub use session::{AuthToken, Credentials};
pub use transaction::TransactionRecord;
