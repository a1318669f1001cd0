//! RSA public key introspection.

use crate::{error::AuditError, extract::PublicKeyMaterial};
use base64ct::{Base64, Encoding};
use pkcs8::DecodePublicKey;
use rsa::{pkcs1::DecodeRsaPublicKey, traits::PublicKeyParts, RsaPublicKey};

/// The modulus size of an RSA public key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyLength {
    pub bits: usize,
}

impl KeyLength {
    /// A compact human label, eg `2048b`.
    pub fn label(&self) -> String {
        format!("{}b", self.bits)
    }
}

/// Parses the given key material as an RSA public key and reports the bit
/// length of its modulus.
///
/// Fails with [`AuditError::KeyParse`] when the payload is not a valid RSA
/// public key (corrupted Base64, wrong algorithm, malformed ASN.1).
pub fn inspect_public_key(material: &PublicKeyMaterial) -> Result<KeyLength, AuditError> {
    let public_key = read_rsa_public_key(material)?;

    Ok(KeyLength {
        bits: public_key.n().bits(),
    })
}

fn read_rsa_public_key(material: &PublicKeyMaterial) -> Result<RsaPublicKey, AuditError> {
    // first try reading data as SubjectPublicKeyInfo
    // (*de facto* procedure, as shown in examples in appendix of RFC)
    // then try reading data as RSAPublicKey
    // (what was actually specified in RFC, but not what is in appendix)
    if let Ok(public_key) = RsaPublicKey::from_public_key_pem(material.pem()) {
        return Ok(public_key);
    }

    let der = Base64::decode_vec(material.base64()).map_err(|_| AuditError::KeyParse)?;

    RsaPublicKey::from_pkcs1_der(&der).map_err(|_| AuditError::KeyParse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_public_key;

    // 2048-bit RSA key in SubjectPublicKeyInfo format.
    const RSA_2048_B64: &str = "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAvXEn6j24wx68Zs5djoKQ\
        LFXcGUUPzvAAfrc9RKzBQG+dglfdCqZy2ZFai4SlLivvkkCU+0wXl+ExSSY5xEiQ\
        k7m3YQZbeIAeSWUTLe7asTri73c7nX5D7+1KKWUarMHKLeWN5F9Re8uOfWrgZdYC\
        20bfoptbMQLLPcbfchP9Z7epZRwdi6xeZySFO2JnwyK2kEay7VpF7YivwQzMohF2\
        hlQ9OshDIa2w7uudKp5jAcOVymPTi3iu6tEI/3NNkcezukVawN6bLkZf6IEE3Gap\
        2oD3pidf51iAfb7BBbeE36Hl3dPxAgfsSrc/v2HTRMYeeBb7fjFC50ImvxjtmFUI\
        xQIDAQAB";

    fn material_for(base64: &str) -> PublicKeyMaterial {
        extract_public_key(&format!("v=DKIM1; k=rsa; p={base64}")).unwrap()
    }

    #[test]
    fn inspect_rsa2048_key() {
        let key_length = inspect_public_key(&material_for(RSA_2048_B64)).unwrap();

        assert_eq!(key_length, KeyLength { bits: 2048 });
        assert_eq!(key_length.label(), "2048b");
    }

    #[test]
    fn inspect_rejects_non_rsa_key() {
        // raw Ed25519 public key bytes, not an RSA structure
        let material = material_for("f8IRGiRaCQ83GCI56F77ueW0l5hinwOG31ZmlSyReBk=");

        assert!(matches!(
            inspect_public_key(&material),
            Err(AuditError::KeyParse)
        ));
    }

    #[test]
    fn inspect_rejects_truncated_key() {
        let material = material_for(&RSA_2048_B64[..96]);

        assert!(matches!(
            inspect_public_key(&material),
            Err(AuditError::KeyParse)
        ));
    }
}
