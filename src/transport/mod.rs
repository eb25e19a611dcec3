//! ### Sending Messages
//!
//! Transports are pluggable mail-delivery backends sharing a common
//! contract: an advisory start/stop lifecycle, a liveness probe, listener
//! registration and a blocking `send`.
//!
//! The following transports are available:
//!
//! * The [`sendgrid::SendGridTransport`] hands messages to the SendGrid v3
//!   Mail Send API through an injected [`SendGridClient`].
//!
//! [`SendGridClient`]: crate::client::SendGridClient

use crate::{address::Address, event::EventListener, message::Message};

pub mod sendgrid;

/// Blocking Transport method for emails
pub trait Transport {
    /// Response produced by the Transport
    type Ok;
    /// Error produced by the Transport
    type Error;

    /// Returns the advisory started flag
    ///
    /// The flag never gates [`send`](Transport::send), there is no real
    /// connection lifecycle behind it.
    fn is_started(&self) -> bool;

    /// Sets the advisory started flag
    fn start(&mut self);

    /// Clears the advisory started flag
    fn stop(&mut self);

    /// Probes the transport for liveness
    fn ping(&mut self) -> bool;

    /// Registers a listener to be notified during [`send`](Transport::send)
    fn register_listener(&mut self, listener: Box<dyn EventListener>);

    /// Sends the email
    ///
    /// Recipients the backend did not accept are appended to
    /// `failed_recipients`.
    fn send(
        &mut self,
        message: &Message,
        failed_recipients: &mut Vec<Address>,
    ) -> Result<Self::Ok, Self::Error>;
}
