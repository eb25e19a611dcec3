//! A mail transport for the SendGrid v3 Mail Send API
//!
//! This crate adapts a pluggable mail [`Transport`] contract to SendGrid:
//! it translates a [`Message`] into the vendor request shape, invokes an
//! injected [`client::SendGridClient`] and maps the response status back
//! into the transport's success/failure/event semantics.
//!
//! Features:
//!
//! * Builder for messages with alternative body parts
//! * Synchronous send events with listener veto
//! * The vendor client behind a trait, so tests run against a recording
//!   stub and applications plug in their own HTTP client
//!
//! ## Example
//!
//! ```rust
//! use sendgrid_transport::{client::StubClient, Message, SendGridTransport, Transport};
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let email = Message::builder()
//!     .from("John Doe <john@doe.com>".parse()?)
//!     .to("receiver@domain.org".parse()?)
//!     .to("A name <other@domain.org>".parse()?)
//!     .subject("Your subject")
//!     .body("Here is the message itself")
//!     .build()?;
//!
//! let mut sender = SendGridTransport::new(StubClient::new_accepted());
//! let mut failed = Vec::new();
//! let accepted = sender.send(&email, &mut failed)?;
//! assert_eq!(accepted, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Optional features
//!
//! * **tracing**: logging of the send path with `tracing`

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod address;
pub mod client;
pub mod event;
pub mod message;
pub mod transport;

pub use crate::{
    address::Address,
    event::{EventDispatcher, EventListener},
    message::Message,
    transport::{sendgrid::SendGridTransport, Transport},
};

/// Type-erased error, as produced by vendor clients
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
