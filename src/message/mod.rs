//! Provides a strongly typed way to build emails
//!
//! # Usage
//!
//! This section demonstrates how to build messages.
//!
//! ## Plain body
//!
//! The easiest way of creating a message is with the [`MessageBuilder`]:
//!
//! ```rust
//! use sendgrid_transport::Message;
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let m = Message::builder()
//!     .from("NoBody <nobody@domain.tld>".parse()?)
//!     .to("Hei <hei@domain.tld>".parse()?)
//!     .subject("Happy new year")
//!     .body("Be happy!")
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Alternative bodies
//!
//! Messages with several representations of the same content carry one
//! primary body plus additional [`Part`]s, each with its own content type:
//!
//! ```rust
//! use sendgrid_transport::{message::Part, Message};
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let m = Message::builder()
//!     .from("NoBody <nobody@domain.tld>".parse()?)
//!     .to("Hei <hei@domain.tld>".parse()?)
//!     .subject("Happy new year")
//!     .body("Be happy!")
//!     .part(Part::html("<p>Be happy!</p>"))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use mime::Mime;

pub use self::mailbox::Mailbox;

mod mailbox;

/// Content type of a message body or part
///
/// Defined in [RFC2045](https://tools.ietf.org/html/rfc2045#section-5)
#[derive(Debug, Clone, PartialEq)]
pub struct ContentType(Mime);

impl ContentType {
    /// A `ContentType` of type `text/plain; charset=utf-8`
    pub const TEXT_PLAIN: ContentType = Self::from_mime(mime::TEXT_PLAIN_UTF_8);

    /// A `ContentType` of type `text/html; charset=utf-8`
    pub const TEXT_HTML: ContentType = Self::from_mime(mime::TEXT_HTML_UTF_8);

    /// Parse `s` into `ContentType`
    pub fn parse(s: &str) -> Result<ContentType, ContentTypeErr> {
        Ok(Self::from_mime(s.parse().map_err(ContentTypeErr)?))
    }

    pub(crate) const fn from_mime(mime: Mime) -> Self {
        Self(mime)
    }
}

impl FromStr for ContentType {
    type Err = ContentTypeErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// An error occurred while trying to [`ContentType::parse`].
#[derive(Debug)]
pub struct ContentTypeErr(mime::FromStrError);

impl StdError for ContentTypeErr {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.0)
    }
}

impl Display for ContentTypeErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// One alternative representation of the message content
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    content_type: ContentType,
    body: String,
}

impl Part {
    /// Creates a part from a content type and a body
    pub fn new<S: Into<String>>(content_type: ContentType, body: S) -> Self {
        Part {
            content_type,
            body: body.into(),
        }
    }

    /// Creates a `text/plain` part
    pub fn plain<S: Into<String>>(body: S) -> Self {
        Self::new(ContentType::TEXT_PLAIN, body)
    }

    /// Creates a `text/html` part
    pub fn html<S: Into<String>>(body: S) -> Self {
        Self::new(ContentType::TEXT_HTML, body)
    }

    /// Content type of this part
    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// Body of this part
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Email message with sender, recipients, subject and content
///
/// Recipient lists keep their insertion order.
#[derive(Debug, Clone)]
pub struct Message {
    from: Vec<Mailbox>,
    to: Vec<Mailbox>,
    cc: Vec<Mailbox>,
    bcc: Vec<Mailbox>,
    subject: String,
    content_type: ContentType,
    body: String,
    parts: Vec<Part>,
}

impl Message {
    /// Create a new message builder without headers
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// Sender mailboxes, in insertion order
    ///
    /// There is always at least one.
    pub fn from(&self) -> &[Mailbox] {
        &self.from
    }

    /// `To` recipients, in insertion order
    pub fn to(&self) -> &[Mailbox] {
        &self.to
    }

    /// `Cc` recipients, in insertion order
    pub fn cc(&self) -> &[Mailbox] {
        &self.cc
    }

    /// `Bcc` recipients, in insertion order
    pub fn bcc(&self) -> &[Mailbox] {
        &self.bcc
    }

    /// Message subject
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Content type of the primary body
    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// Primary body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Alternative parts, in insertion order
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }
}

/// A builder for messages
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    from: Vec<Mailbox>,
    to: Vec<Mailbox>,
    cc: Vec<Mailbox>,
    bcc: Vec<Mailbox>,
    subject: String,
    content_type: Option<ContentType>,
    body: Option<String>,
    parts: Vec<Part>,
}

impl MessageBuilder {
    /// Creates a new default message builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mailbox to the `From` header
    pub fn from(mut self, mbox: Mailbox) -> Self {
        self.from.push(mbox);
        self
    }

    /// Add a mailbox to the `To` header
    pub fn to(mut self, mbox: Mailbox) -> Self {
        self.to.push(mbox);
        self
    }

    /// Add a mailbox to the `Cc` header
    pub fn cc(mut self, mbox: Mailbox) -> Self {
        self.cc.push(mbox);
        self
    }

    /// Add a mailbox to the `Bcc` header
    pub fn bcc(mut self, mbox: Mailbox) -> Self {
        self.bcc.push(mbox);
        self
    }

    /// Set the subject
    pub fn subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the content type of the primary body
    ///
    /// Defaults to `text/plain; charset=utf-8`.
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Set the primary body
    pub fn body<S: Into<String>>(mut self, body: S) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Append an alternative part
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Create the message, failing if the sender or the body is missing
    pub fn build(self) -> Result<Message, Error> {
        if self.from.is_empty() {
            return Err(Error::MissingFrom);
        }
        let body = self.body.ok_or(Error::MissingBody)?;

        Ok(Message {
            from: self.from,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            subject: self.subject,
            content_type: self.content_type.unwrap_or(ContentType::TEXT_PLAIN),
            body,
            parts: self.parts,
        })
    }
}

/// Error type for message construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Missing sender address
    MissingFrom,
    /// Missing message body
    MissingBody,
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        fmt.write_str(match self {
            Error::MissingFrom => "missing source address, invalid message",
            Error::MissingBody => "missing body, invalid message",
        })
    }
}

impl StdError for Error {}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{ContentType, Error, Message, Part};

    #[test]
    fn build_message() {
        let message = Message::builder()
            .from("NoBody <nobody@domain.tld>".parse().unwrap())
            .to("hei@domain.tld".parse().unwrap())
            .cc("Copy <copy@domain.tld>".parse().unwrap())
            .subject("Happy new year")
            .body("Be happy!")
            .build()
            .unwrap();

        assert_eq!(message.from().len(), 1);
        assert_eq!(message.to().len(), 1);
        assert_eq!(message.cc().len(), 1);
        assert_eq!(message.bcc().len(), 0);
        assert_eq!(message.subject(), "Happy new year");
        assert_eq!(message.body(), "Be happy!");
        assert_eq!(message.content_type(), &ContentType::TEXT_PLAIN);
    }

    #[test]
    fn build_message_requires_from() {
        let err = Message::builder()
            .to("hei@domain.tld".parse().unwrap())
            .body("Be happy!")
            .build()
            .unwrap_err();
        assert_eq!(err, Error::MissingFrom);
    }

    #[test]
    fn build_message_requires_body() {
        let err = Message::builder()
            .from("nobody@domain.tld".parse().unwrap())
            .to("hei@domain.tld".parse().unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err, Error::MissingBody);
    }

    #[test]
    fn parts_keep_order_and_content_type() {
        let message = Message::builder()
            .from("nobody@domain.tld".parse().unwrap())
            .body("plain")
            .part(Part::html("<p>html</p>"))
            .part(Part::new(
                ContentType::parse("text/calendar").unwrap(),
                "BEGIN:VCALENDAR",
            ))
            .build()
            .unwrap();

        assert_eq!(message.parts().len(), 2);
        assert_eq!(message.parts()[0].content_type(), &ContentType::TEXT_HTML);
        assert_eq!(
            message.parts()[1].content_type().to_string(),
            "text/calendar"
        );
    }

    #[test]
    fn multiple_from_are_kept() {
        let message = Message::builder()
            .from("first@domain.tld".parse().unwrap())
            .from("second@domain.tld".parse().unwrap())
            .body("hi")
            .build()
            .unwrap();
        assert_eq!(message.from().len(), 2);
    }
}
