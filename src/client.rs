//! SendGrid v3 API boundary
//!
//! The transport hands a [`Mail`] to a [`SendGridClient`] and interprets the
//! returned [`Response`]. Everything behind the trait is owned by the client
//! implementation: HTTP, authentication and serialization of the request
//! body ([`Mail`] serializes to the [v3 Mail Send] JSON shape with serde).
//!
//! [v3 Mail Send]: https://docs.sendgrid.com/api-reference/mail-send/mail-send

use serde::Serialize;

use crate::{message::Mailbox, BoxError};

/// Sends a constructed [`Mail`] to the mail service
///
/// Implementations own network I/O, authentication and retry behavior, if
/// any. The transport performs exactly one `send` call per message.
pub trait SendGridClient {
    /// Sends the mail, returning the service response
    ///
    /// An `Err` means no response was obtained at all; a rejection by the
    /// service is an `Ok` response with a non-202 status code.
    fn send(&mut self, mail: &Mail) -> Result<Response, BoxError>;
}

/// An email address with an optional display name, in the vendor's shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl EmailAddress {
    /// Creates an address from its raw parts
    pub fn new<E: Into<String>>(email: E, name: Option<String>) -> Self {
        EmailAddress {
            email: email.into(),
            name,
        }
    }

    /// The address itself
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The display name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl From<&Mailbox> for EmailAddress {
    fn from(mailbox: &Mailbox) -> Self {
        EmailAddress {
            email: mailbox.email.to_string(),
            name: mailbox.name.clone(),
        }
    }
}

/// One representation of the message content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

impl Content {
    /// MIME type of this block
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Body of this block
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Per-message recipient lists
///
/// The v3 API supports several personalizations per mail, the transport
/// only ever fills the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
struct Personalization {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    to: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cc: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<EmailAddress>,
}

/// Outbound v3 Mail Send request, built fresh for every send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mail {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<EmailAddress>,
    subject: String,
    personalizations: Vec<Personalization>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    content: Vec<Content>,
}

impl Mail {
    /// Creates an empty mail
    pub fn new() -> Self {
        Mail {
            from: None,
            subject: String::new(),
            personalizations: vec![Personalization::default()],
            content: Vec::new(),
        }
    }

    /// Sets the sender
    pub fn set_from<A: Into<EmailAddress>>(&mut self, from: A) {
        self.from = Some(from.into());
    }

    /// Appends a `To` recipient
    pub fn add_to<A: Into<EmailAddress>>(&mut self, to: A) {
        self.personalizations[0].to.push(to.into());
    }

    /// Appends a `Cc` recipient
    pub fn add_cc<A: Into<EmailAddress>>(&mut self, cc: A) {
        self.personalizations[0].cc.push(cc.into());
    }

    /// Appends a `Bcc` recipient
    pub fn add_bcc<A: Into<EmailAddress>>(&mut self, bcc: A) {
        self.personalizations[0].bcc.push(bcc.into());
    }

    /// Sets the subject
    pub fn set_subject<S: Into<String>>(&mut self, subject: S) {
        self.subject = subject.into();
    }

    /// Appends a content block
    pub fn add_content<T: Into<String>, V: Into<String>>(&mut self, content_type: T, value: V) {
        self.content.push(Content {
            content_type: content_type.into(),
            value: value.into(),
        });
    }

    /// The sender, if set
    pub fn from(&self) -> Option<&EmailAddress> {
        self.from.as_ref()
    }

    /// The subject
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// `To` recipients in the order they were added
    pub fn to(&self) -> &[EmailAddress] {
        &self.personalizations[0].to
    }

    /// `Cc` recipients in the order they were added
    pub fn cc(&self) -> &[EmailAddress] {
        &self.personalizations[0].cc
    }

    /// `Bcc` recipients in the order they were added
    pub fn bcc(&self) -> &[EmailAddress] {
        &self.personalizations[0].bcc
    }

    /// Content blocks in the order they were added
    pub fn content(&self) -> &[Content] {
        &self.content
    }
}

impl Default for Mail {
    fn default() -> Self {
        Self::new()
    }
}

/// Response of the mail service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    body: String,
}

impl Response {
    /// Status the service answers with when it accepted a message
    pub const ACCEPTED: u16 = 202;

    /// Creates a response from its raw parts
    pub fn new<B: Into<String>>(status_code: u16, body: B) -> Self {
        Response {
            status_code,
            body: body.into(),
        }
    }

    /// HTTP status code of the response
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Raw response body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the service accepted the message
    ///
    /// Only status 202 counts, any other status is a failure.
    pub fn is_accepted(&self) -> bool {
        self.status_code == Self::ACCEPTED
    }
}

/// Client that answers with a fixed response and records every mail
///
/// It can be useful for testing purposes.
#[derive(Debug, Clone)]
pub struct StubClient {
    response: Result<Response, String>,
    sent: Vec<Mail>,
}

impl StubClient {
    /// Creates a client that always returns the given response
    pub fn new(response: Result<Response, String>) -> Self {
        StubClient {
            response,
            sent: Vec::new(),
        }
    }

    /// Creates a client that always accepts
    pub fn new_accepted() -> Self {
        Self::new(Ok(Response::new(Response::ACCEPTED, "")))
    }

    /// The mails this client was asked to send, in order
    pub fn sent(&self) -> &[Mail] {
        &self.sent
    }
}

impl SendGridClient for StubClient {
    fn send(&mut self, mail: &Mail) -> Result<Response, BoxError> {
        self.sent.push(mail.clone());
        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(error) => Err(error.clone().into()),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{EmailAddress, Mail};

    #[test]
    fn serialize_mail_send_request() {
        let mut mail = Mail::new();
        mail.set_from(EmailAddress::new("john@doe.com", Some("John Doe".into())));
        mail.add_to(EmailAddress::new("receiver@domain.org", None));
        mail.add_cc(EmailAddress::new("other@domain.org", Some("A name".into())));
        mail.set_subject("Your subject");
        mail.add_content("text/plain; charset=utf-8", "Here is the message itself");

        assert_eq!(
            serde_json::to_value(&mail).unwrap(),
            json!({
                "from": { "email": "john@doe.com", "name": "John Doe" },
                "subject": "Your subject",
                "personalizations": [{
                    "to": [{ "email": "receiver@domain.org" }],
                    "cc": [{ "email": "other@domain.org", "name": "A name" }],
                }],
                "content": [{
                    "type": "text/plain; charset=utf-8",
                    "value": "Here is the message itself",
                }],
            })
        );
    }

    #[test]
    fn serialize_empty_lists_are_skipped() {
        let mut mail = Mail::new();
        mail.set_subject("Your subject");

        assert_eq!(
            serde_json::to_value(&mail).unwrap(),
            json!({
                "subject": "Your subject",
                "personalizations": [{}],
            })
        );
    }
}
