use std::{
    convert::TryFrom,
    fmt::{Display, Formatter, Result as FmtResult, Write},
    str::FromStr,
};

use crate::address::{Address, AddressError};

/// Represents an email address with an optional name for the sender/recipient.
///
/// This type contains email address and the sender/recipient name
/// (_Some Name \<user@domain.tld\>_ or _withoutname@domain.tld_).
///
/// # Examples
///
/// You can create a `Mailbox` from a string and an [`Address`]:
///
/// ```
/// # use sendgrid_transport::{message::Mailbox, Address};
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let address = Address::new("example", "email.com")?;
/// let mailbox = Mailbox::new(None, address);
/// # Ok(())
/// # }
/// ```
///
/// You can also create one from a string literal:
///
/// ```
/// # use sendgrid_transport::message::Mailbox;
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let mailbox: Mailbox = "John Smith <example@email.com>".parse()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Mailbox {
    /// The name associated with the address.
    pub name: Option<String>,

    /// The email address itself.
    pub email: Address,
}

impl Mailbox {
    /// Creates a new `Mailbox` using an email address and the name of the
    /// recipient if there is one.
    pub fn new(name: Option<String>, email: Address) -> Self {
        Mailbox { name, email }
    }
}

impl Display for Mailbox {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(name) = &self.name {
            let name = name.trim();
            if !name.is_empty() {
                f.write_str(name)?;
                f.write_str(" <")?;
                self.email.fmt(f)?;
                return f.write_char('>');
            }
        }
        self.email.fmt(f)
    }
}

impl From<Address> for Mailbox {
    fn from(email: Address) -> Self {
        Mailbox { name: None, email }
    }
}

impl<S: Into<String>, T: AsRef<str>> TryFrom<(S, T)> for Mailbox {
    type Error = AddressError;

    fn try_from(header: (S, T)) -> Result<Self, Self::Error> {
        let (name, address) = header;
        Ok(Mailbox::new(Some(name.into()), address.as_ref().parse()?))
    }
}

impl FromStr for Mailbox {
    type Err = AddressError;

    fn from_str(src: &str) -> Result<Mailbox, Self::Err> {
        let src = src.trim();
        match (src.rfind('<'), src.ends_with('>')) {
            (Some(open), true) => {
                let name = src[..open].trim().trim_matches('"');
                let email = src[open + 1..src.len() - 1].parse()?;
                let name = if name.is_empty() {
                    None
                } else {
                    Some(name.to_owned())
                };
                Ok(Mailbox::new(name, email))
            }
            _ => Ok(Mailbox::new(None, src.parse()?)),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::Mailbox;

    #[test]
    fn parse_address_only() {
        let mailbox: Mailbox = "kayo@example.com".parse().unwrap();
        assert_eq!(mailbox.name, None);
        assert_eq!(mailbox.email.as_ref(), "kayo@example.com");
    }

    #[test]
    fn parse_with_name() {
        let mailbox: Mailbox = "K. <kayo@example.com>".parse().unwrap();
        assert_eq!(mailbox.name.as_deref(), Some("K."));
        assert_eq!(mailbox.email.as_ref(), "kayo@example.com");
    }

    #[test]
    fn parse_with_quoted_name() {
        let mailbox: Mailbox = "\"K.\" <kayo@example.com>".parse().unwrap();
        assert_eq!(mailbox.name.as_deref(), Some("K."));
    }

    #[test]
    fn display() {
        let with_name: Mailbox = "K. <kayo@example.com>".parse().unwrap();
        assert_eq!(with_name.to_string(), "K. <kayo@example.com>");

        let without_name: Mailbox = "kayo@example.com".parse().unwrap();
        assert_eq!(without_name.to_string(), "kayo@example.com");
    }
}
