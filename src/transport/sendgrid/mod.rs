//! The SendGrid transport sends emails through the SendGrid v3 Mail Send API.
//!
//! It translates a [`Message`] into the vendor request shape, hands it to an
//! injected [`SendGridClient`] and maps the response status back onto the
//! [`Transport`] contract. The client owns HTTP, authentication and
//! serialization; the transport performs one blocking client call per send.
//!
//! Listeners bound to the transport observe every send and may veto it: a
//! cancelled before-send event aborts the send without contacting the
//! service, a cancelled exception event swallows a send failure.
//!
//! #### Simple example
//!
//! ```rust
//! use sendgrid_transport::{
//!     client::StubClient, Message, SendGridTransport, Transport,
//! };
//!
//! let email = Message::builder()
//!     .from("NoBody <nobody@domain.tld>".parse().unwrap())
//!     .to("Hei <hei@domain.tld>".parse().unwrap())
//!     .subject("Happy new year")
//!     .body("Be happy!")
//!     .build()
//!     .unwrap();
//!
//! // Replace the stub with a client talking to the real API
//! let mut sender = SendGridTransport::new(StubClient::new_accepted());
//! let mut failed = Vec::new();
//! let result = sender.send(&email, &mut failed);
//!
//! assert_eq!(result.unwrap(), 1);
//! ```

use crate::{
    address::Address,
    client::{Mail, SendGridClient},
    event::{DeliveryResult, EventDispatcher, EventListener},
    message::Message,
    transport::Transport,
};

use self::error::Kind;
pub use self::error::Error;

mod error;

/// Sends emails using the SendGrid v3 API
#[derive(Debug)]
pub struct SendGridTransport<C> {
    client: C,
    started: bool,
    event_dispatcher: EventDispatcher,
}

impl<C: SendGridClient> SendGridTransport<C> {
    /// Creates a new transport around the given client
    ///
    /// The transport starts without listeners, bind them through
    /// [`Transport::register_listener`] or inject a prepared dispatcher with
    /// [`SendGridTransport::with_event_dispatcher`].
    pub fn new(client: C) -> Self {
        Self::with_event_dispatcher(client, EventDispatcher::new())
    }

    /// Creates a new transport with the given event dispatcher
    pub fn with_event_dispatcher(client: C, event_dispatcher: EventDispatcher) -> Self {
        SendGridTransport {
            client,
            started: false,
            event_dispatcher,
        }
    }

    /// Borrows the underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Routes a send failure through the exception-event chain
    ///
    /// Listeners may cancel the bubble, in which case the error is swallowed
    /// and the send reports zero accepted recipients.
    fn dispatch_error(&mut self, error: Error) -> Result<usize, Error> {
        match self.event_dispatcher.create_exception_event(&error) {
            Some(mut event) => {
                self.event_dispatcher.exception_thrown(&mut event);
                if event.bubble_cancelled() {
                    Ok(0)
                } else {
                    Err(error)
                }
            }
            None => Err(error),
        }
    }
}

impl<C: SendGridClient> Transport for SendGridTransport<C> {
    type Ok = usize;
    type Error = Error;

    fn is_started(&self) -> bool {
        self.started
    }

    fn start(&mut self) {
        self.started = true;
    }

    fn stop(&mut self) {
        self.started = false;
    }

    fn ping(&mut self) -> bool {
        true
    }

    fn register_listener(&mut self, listener: Box<dyn EventListener>) {
        self.event_dispatcher.bind(listener);
    }

    /// Sends an email, returning the number of recipients handed to the API
    ///
    /// The count spans To, Cc and Bcc. Only the first `From` mailbox is
    /// honored, further ones are silently ignored.
    fn send(
        &mut self,
        message: &Message,
        failed_recipients: &mut Vec<Address>,
    ) -> Result<usize, Error> {
        let mut event = self.event_dispatcher.create_send_event(message);
        if let Some(event) = &mut event {
            self.event_dispatcher.before_send(event);
            if event.bubble_cancelled() {
                return Ok(0);
            }
        }

        let mut mail = Mail::new();
        mail.set_from(&message.from()[0]);

        let mut count = 0;
        for to in message.to() {
            mail.add_to(to);
            count += 1;
        }
        for cc in message.cc() {
            mail.add_cc(cc);
            count += 1;
        }
        for bcc in message.bcc() {
            mail.add_bcc(bcc);
            count += 1;
        }

        mail.set_subject(message.subject());
        mail.add_content(message.content_type().to_string(), message.body());
        for part in message.parts() {
            mail.add_content(part.content_type().to_string(), part.body());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("sending email to {count} recipients");

        let response = match self.client.send(&mail) {
            Ok(response) => response,
            Err(source) => return self.dispatch_error(Error::new(Kind::Client, Some(source))),
        };

        if response.is_accepted() {
            if let Some(event) = &mut event {
                event.set_result(DeliveryResult::Success);
                event.set_failed_recipients(failed_recipients.clone());
                self.event_dispatcher.send_performed(event);
            }

            return Ok(count);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("email rejected with status {}", response.status_code());

        self.dispatch_error(Error::new(Kind::Response(response), None))
    }
}
