//! Protocol Module
//!
//! Defines the SNP wire protocol spoken with the notification daemon.
//!
//! ## Request Format
//! ```text
//! type=SNP#?version=1.0#?action=<action>#?<name>=<value>#?...\r\n
//! ```
//!
//! ### Actions
//! - `register`:     app
//! - `add_class`:    app, class, title
//! - `notification`: app, class, title, text, timeout
//! - `unregister`:   app
//!
//! ## Response Format
//! ```text
//! SNP/<version>/<code>/<description>[/<extra>...]
//! ```
//!
//! ### Status Codes
//! - 0:      OK
//! - 1-299:  failure reply to the last request
//! - >= 300: asynchronous event, not a reply

mod request;
mod response;
mod codec;

pub use request::{Action, Request};
pub use response::{Response, EVENT_CODE_THRESHOLD};
pub use codec::{
    check_field_value, decode_response, encode_request, read_line, read_response,
    write_request, FIELD_DELIMITER, LINE_TERMINATOR, PROTOCOL_HEADER, RESPONSE_DELIMITER,
};
