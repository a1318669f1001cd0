// dkimkey – auditor for DKIM public keys published in DNS
// Copyright © 2025 The dkimkey developers
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.

//! The end-to-end key audit pipeline.

use crate::{
    error::AuditError,
    extract::extract_public_key,
    fetch::fetch_dkim_record,
    inspect::inspect_public_key,
    lookup::LookupTxt,
    name::{DomainName, Selector},
};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// The outcome of a successful key audit.
#[derive(Clone, Debug, Serialize)]
pub struct AuditReport {
    /// The selector, as given by the caller.
    pub selector: String,
    /// The domain, as given by the caller.
    pub domain: String,
    /// The retrieved DKIM key record.
    pub dkim_record: String,
    /// The published public key as a PEM block.
    pub public_key_pem: String,
    /// The modulus bit length of the RSA public key.
    pub key_length_bits: usize,
    /// A compact rendering of the bit length, eg `2048b`.
    pub key_length_label: String,
}

/// Audits the DKIM public key published for `selector` and `domain`.
///
/// Retrieves the key record over `resolver`, extracts the *p=* key, and
/// inspects its strength. Stages run strictly in sequence; the first failing
/// stage aborts the audit with its [`AuditError`].
pub async fn audit<T>(
    resolver: &T,
    selector: &Selector,
    domain: &DomainName,
    timeout: Duration,
) -> Result<AuditReport, AuditError>
where
    T: LookupTxt + ?Sized,
{
    let record = fetch_dkim_record(resolver, selector, domain, timeout).await?;

    debug!(%record, "retrieved DKIM key record");

    let material = extract_public_key(&record)?;

    let key_length = inspect_public_key(&material)?;

    debug!(bits = key_length.bits, "inspected RSA public key");

    Ok(AuditReport {
        selector: selector.to_string(),
        domain: domain.to_string(),
        dkim_record: record,
        public_key_pem: material.pem().to_owned(),
        key_length_bits: key_length.bits,
        key_length_label: key_length.label(),
    })
}
