//! Representation of an email address

use std::{
    convert::{TryFrom, TryInto},
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Represents an email address with a user and a domain name.
///
/// This type contains email in canonical form (_user@domain.tld_).
///
/// # Examples
///
/// You can create an `Address` from a user and a domain:
///
/// ```
/// # use sendgrid_transport::Address;
/// let address = Address::new("example", "email.com").unwrap();
/// ```
///
/// You can also create an `Address` from a string literal by parsing it:
///
/// ```
/// use std::str::FromStr;
/// # use sendgrid_transport::Address;
/// let address = Address::from_str("example@email.com").unwrap();
/// ```
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Address {
    /// Complete address
    serialized: String,
    /// Index into `serialized` before the '@'
    at_start: usize,
}

impl Address {
    /// Creates a new email address from a user and domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use sendgrid_transport::Address;
    ///
    /// let address = Address::new("example", "email.com").unwrap();
    /// let expected: Address = "example@email.com".parse().unwrap();
    /// assert_eq!(expected, address);
    /// ```
    pub fn new<U: AsRef<str>, D: AsRef<str>>(user: U, domain: D) -> Result<Self, AddressError> {
        (user, domain).try_into()
    }

    /// Gets the user portion of the `Address`.
    pub fn user(&self) -> &str {
        &self.serialized[..self.at_start]
    }

    /// Gets the domain portion of the `Address`.
    pub fn domain(&self) -> &str {
        &self.serialized[self.at_start + 1..]
    }

    fn check_user(user: &str) -> Result<(), AddressError> {
        if user.is_empty() {
            return Err(AddressError::MissingLocalPart);
        }
        Ok(())
    }

    fn check_domain(domain: &str) -> Result<(), AddressError> {
        if domain.is_empty() {
            return Err(AddressError::MissingDomain);
        }
        Ok(())
    }
}

impl<U, D> TryFrom<(U, D)> for Address
where
    U: AsRef<str>,
    D: AsRef<str>,
{
    type Error = AddressError;

    fn try_from((user, domain): (U, D)) -> Result<Self, Self::Error> {
        let user = user.as_ref();
        Address::check_user(user)?;

        let domain = domain.as_ref();
        Address::check_domain(domain)?;

        let serialized = format!("{user}@{domain}");
        Ok(Address {
            serialized,
            at_start: user.len(),
        })
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(val: &str) -> Result<Self, AddressError> {
        // the local part of a quoted address may itself contain an '@'
        let at_start = val.rfind('@').ok_or(AddressError::MissingAt)?;
        Address::check_user(&val[..at_start])?;
        Address::check_domain(&val[at_start + 1..])?;

        Ok(Address {
            serialized: val.into(),
            at_start,
        })
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.serialized)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.serialized
    }
}

/// Errors in email addresses parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressError {
    /// Missing @ in email address
    MissingAt,
    /// Missing local part in email address
    MissingLocalPart,
    /// Missing domain in email address
    MissingDomain,
}

impl StdError for AddressError {}

impl Display for AddressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AddressError::MissingAt => f.write_str("missing @ in email address"),
            AddressError::MissingLocalPart => f.write_str("missing local part in email address"),
            AddressError::MissingDomain => f.write_str("missing domain in email address"),
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::{Address, AddressError};

    #[test]
    fn parse_address() {
        let address = Address::from_str("user@domain.tld").unwrap();
        assert_eq!(address.user(), "user");
        assert_eq!(address.domain(), "domain.tld");
        assert_eq!(address.to_string(), "user@domain.tld");
    }

    #[test]
    fn parse_address_splits_on_last_at() {
        let address = Address::from_str("\"user@host\"@domain.tld").unwrap();
        assert_eq!(address.user(), "\"user@host\"");
        assert_eq!(address.domain(), "domain.tld");
    }

    #[test]
    fn reject_invalid_addresses() {
        assert_eq!(
            Address::from_str("userdomain.tld").unwrap_err(),
            AddressError::MissingAt
        );
        assert_eq!(
            Address::from_str("@domain.tld").unwrap_err(),
            AddressError::MissingLocalPart
        );
        assert_eq!(
            Address::from_str("user@").unwrap_err(),
            AddressError::MissingDomain
        );
    }

    #[test]
    fn new_from_parts() {
        let address = Address::new("user", "domain.tld").unwrap();
        assert_eq!(address, Address::from_str("user@domain.tld").unwrap());
        assert_eq!(
            Address::new("", "domain.tld").unwrap_err(),
            AddressError::MissingLocalPart
        );
    }
}
