use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io,
};

/// An error that occurs while auditing a DKIM public key.
///
/// Every stage failure is terminal for the invocation; there are no retries.
#[derive(Debug)]
pub enum AuditError {
    /// The query target does not exist in DNS (NXDOMAIN).
    DomainNotFound(String),
    /// The TXT query returned zero records.
    NoRecordsFound(String),
    /// Network, protocol, or timeout failure during DNS resolution.
    ResolutionFailed(io::Error),
    /// No p= tag was found in the selected record.
    MissingPublicKeyTag,
    /// A p= tag is present but its value is blank (key revoked).
    EmptyPublicKey,
    /// The p= value is not a valid RSA public key.
    KeyParse,
}

impl Display for AuditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomainNotFound(qname) => write!(f, "domain {qname} does not exist"),
            Self::NoRecordsFound(qname) => write!(f, "no TXT records found for {qname}"),
            Self::ResolutionFailed(error) => write!(f, "DNS resolution failed: {error}"),
            Self::MissingPublicKeyTag => write!(f, "no p= tag found in DKIM record"),
            Self::EmptyPublicKey => write!(f, "public key is empty (key revoked)"),
            Self::KeyParse => write!(f, "could not parse RSA public key"),
        }
    }
}

impl Error for AuditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ResolutionFailed(error) => Some(error),
            _ => None,
        }
    }
}
