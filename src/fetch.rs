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

//! DKIM key record retrieval.

use crate::{
    error::AuditError,
    lookup::LookupTxt,
    name::{DomainName, Selector},
};
use std::{
    io::{self, ErrorKind},
    time::Duration,
};
use tokio::time;
use tracing::trace;

/// Derives the DNS query name for a selector/domain pair.
///
/// # Examples
///
/// ```
/// use dkimkey::{dkim_qname, DomainName, Selector};
///
/// let selector = Selector::new("sel1")?;
/// let domain = DomainName::new("example.com")?;
///
/// assert_eq!(dkim_qname(&selector, &domain), "sel1._domainkey.example.com");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn dkim_qname(selector: &Selector, domain: &DomainName) -> String {
    format!("{}._domainkey.{}", selector.to_ascii(), domain.to_ascii())
}

/// Retrieves the DKIM key record published for `selector` and `domain`.
///
/// Each TXT record in the answer has its character strings concatenated in
/// order, with undecodable bytes replaced rather than rejected. When the
/// answer contains more than one record, the first record containing `p=` is
/// selected, or failing that the first record.
///
/// `timeout` bounds the whole lookup; on expiry the fetch fails with
/// [`AuditError::ResolutionFailed`].
pub async fn fetch_dkim_record<T>(
    resolver: &T,
    selector: &Selector,
    domain: &DomainName,
    timeout: Duration,
) -> Result<String, AuditError>
where
    T: LookupTxt + ?Sized,
{
    let qname = dkim_qname(selector, domain);

    trace!(%qname, "querying TXT record");

    // Note the trailing dot: only absolute queries.
    let dname = format!("{qname}.");

    let answer = match time::timeout(timeout, resolver.lookup_txt(&dname)).await {
        Ok(Ok(answer)) => answer,
        Ok(Err(e)) => return Err(classify_lookup_error(e, &qname)),
        Err(_) => return Err(AuditError::ResolutionFailed(ErrorKind::TimedOut.into())),
    };

    let mut records = vec![];

    for txt in answer {
        match txt {
            Ok(fragments) => {
                let data = fragments.concat();
                records.push(String::from_utf8_lossy(&data).into_owned());
            }
            Err(e) => {
                // A record that cannot be read must not mask a usable one.
                trace!(error = %e, "skipping unreadable TXT record");
            }
        }
    }

    if records.is_empty() {
        return Err(AuditError::NoRecordsFound(qname));
    }

    // §3.6.2.2: ‘TXT RRs MUST be unique for a particular selector name; […] if
    // there are multiple records in an RRset, the results are undefined.’ As a
    // courtesy we prefer a record that carries a p= tag and otherwise take the
    // first one.
    let index = records.iter().position(|r| r.contains("p=")).unwrap_or(0);

    Ok(records.swap_remove(index))
}

fn classify_lookup_error(e: io::Error, qname: &str) -> AuditError {
    match e.kind() {
        ErrorKind::NotFound => AuditError::DomainNotFound(qname.into()),
        _ => AuditError::ResolutionFailed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dkim_qname_ok() {
        let selector = Selector::new("sel1").unwrap();
        let domain = DomainName::new("example.com.").unwrap();

        assert_eq!(dkim_qname(&selector, &domain), "sel1._domainkey.example.com");
    }

    #[test]
    fn dkim_qname_is_ascii() {
        let selector = Selector::new("🎆🏮").unwrap();
        let domain = DomainName::new("example.中国").unwrap();

        assert_eq!(
            dkim_qname(&selector, &domain),
            "xn--9j8hqg._domainkey.example.xn--fiqs8s"
        );
    }
}
