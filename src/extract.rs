//! Public key extraction from DKIM key records.

use crate::error::AuditError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str;

// A p= tag anchored at record start or after a ;, its Base64 value running to
// the next ; or to end of record. The value may be captured empty: an empty
// p= value is how DKIM signals key revocation.
static KEY_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|;)\s*p\s*=\s*([A-Za-z0-9+/=]*)\s*(?:;|$)").unwrap()
});

const PEM_HEADER: &str = "-----BEGIN PUBLIC KEY-----";
const PEM_FOOTER: &str = "-----END PUBLIC KEY-----";

const PEM_LINE_WIDTH: usize = 64;

/// The public key carried in a DKIM key record, in both the record's own
/// Base64 form and as a PEM block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKeyMaterial {
    base64: Box<str>,
    pem: String,
}

impl PublicKeyMaterial {
    /// The Base64 payload exactly as published in the p= tag.
    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// The payload reframed as a PEM block.
    pub fn pem(&self) -> &str {
        &self.pem
    }
}

/// Extracts the public key from a DKIM key record.
///
/// Fails with [`AuditError::MissingPublicKeyTag`] when the record has no p=
/// tag, and with [`AuditError::EmptyPublicKey`] when the tag is present but
/// blank, which signals a revoked key.
pub fn extract_public_key(record: &str) -> Result<PublicKeyMaterial, AuditError> {
    let captures = KEY_TAG
        .captures(record)
        .ok_or(AuditError::MissingPublicKeyTag)?;

    let payload = captures[1].trim();

    if payload.is_empty() {
        return Err(AuditError::EmptyPublicKey);
    }

    Ok(PublicKeyMaterial {
        base64: payload.into(),
        pem: wrap_pem(payload),
    })
}

/// Reframes a Base64 payload as a PEM block, 64 characters per line, with a
/// trailing newline.
pub fn wrap_pem(base64: &str) -> String {
    let mut pem = String::with_capacity(
        base64.len() + base64.len() / PEM_LINE_WIDTH + PEM_HEADER.len() + PEM_FOOTER.len() + 4,
    );

    pem.push_str(PEM_HEADER);
    pem.push('\n');

    for chunk in base64.as_bytes().chunks(PEM_LINE_WIDTH) {
        pem.push_str(str::from_utf8(chunk).expect("Base64 payload not ASCII"));
        pem.push('\n');
    }

    pem.push_str(PEM_FOOTER);
    pem.push('\n');

    pem
}
