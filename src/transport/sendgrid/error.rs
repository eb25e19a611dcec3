//! Error and result type for the SendGrid transport

use std::{error::Error as StdError, fmt};

use crate::{client::Response, BoxError};

// Inspired by https://github.com/seanmonstar/reqwest/blob/a8566383168c0ef06c21f38cbc9213af6ff6db31/src/error.rs

/// The Errors that may occur when sending an email through the SendGrid API
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    source: Option<BoxError>,
}

impl Error {
    pub(crate) fn new(kind: Kind, source: Option<BoxError>) -> Error {
        Error {
            inner: Box::new(Inner { kind, source }),
        }
    }

    /// Returns true if the mail service answered with a non-202 status
    pub fn is_response(&self) -> bool {
        matches!(self.inner.kind, Kind::Response(_))
    }

    /// Returns true if the error comes from the client itself
    pub fn is_client(&self) -> bool {
        matches!(self.inner.kind, Kind::Client)
    }

    /// Returns the status code, if the error was generated from a response
    pub fn status(&self) -> Option<u16> {
        match &self.inner.kind {
            Kind::Response(response) => Some(response.status_code()),
            Kind::Client => None,
        }
    }

    /// Returns the raw response, if the error was generated from one
    pub fn response(&self) -> Option<&Response> {
        match &self.inner.kind {
            Kind::Response(response) => Some(response),
            Kind::Client => None,
        }
    }
}

#[derive(Debug)]
pub(crate) enum Kind {
    /// The mail service rejected the message, any status other than 202
    Response(Response),
    /// The client failed before obtaining a response
    Client,
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("sendgrid_transport::transport::sendgrid::Error");

        builder.field("kind", &self.inner.kind);

        if let Some(source) = &self.inner.source {
            builder.field("source", source);
        }

        builder.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            Kind::Response(response) => write!(f, "response error: {}", response.status_code())?,
            Kind::Client => f.write_str("internal client error")?,
        }

        if let Some(source) = &self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|e| &**e as &(dyn StdError + 'static))
    }
}
