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

//! DNS lookup abstraction and resolver construction.

use hickory_resolver::{
    config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts},
    error::ResolveErrorKind,
    proto::op::ResponseCode,
    system_conf::read_system_conf,
    Name, TokioAsyncResolver,
};
use std::{
    future::Future,
    io::{self, ErrorKind},
    net::{IpAddr, SocketAddr},
    pin::Pin,
    time::Duration,
};

/// A trait for looking up DNS TXT records containing DKIM public key records.
///
/// The error type used here is `std::io::Error`. The following error kinds on
/// the query result are recognised and receive special treatment.
///
/// * `ErrorKind::InvalidInput` on the query: the domain argument could not be used
/// * `ErrorKind::NotFound` on the query: NXDOMAIN, the query target does not exist
/// * `ErrorKind::TimedOut` on the query: timeout
///
/// An answer contains one entry per TXT resource record; each entry carries
/// the record's constituent character strings, in order, not yet
/// concatenated. The inner, per-record `std::io::Error` can be used to signal
/// errors with individual TXT records.
pub trait LookupTxt: Send + Sync {
    /// The answer consisting of TXT records found.
    type Answer: IntoIterator<Item = io::Result<Vec<Box<[u8]>>>>;
    /// The future resolving to the query's answer.
    type Query<'a>: Future<Output = io::Result<Self::Answer>> + Send + 'a
    where
        Self: 'a;

    /// Looks up the domain's TXT records in DNS.
    ///
    /// The domain will be passed to this trait as a string in human-readable
    /// A-label (ASCII) format (eg `selector._domainkey.example.com.`).
    fn lookup_txt(&self, domain: &str) -> Self::Query<'_>;
}

impl LookupTxt for TokioAsyncResolver {
    type Answer = Vec<io::Result<Vec<Box<[u8]>>>>;
    type Query<'a> = Pin<Box<dyn Future<Output = io::Result<Self::Answer>> + Send + 'a>>;

    fn lookup_txt(&self, domain: &str) -> Self::Query<'_> {
        let name = Name::from_ascii(domain);

        Box::pin(async move {
            let name = name.map_err(|_| io::Error::from(ErrorKind::InvalidInput))?;

            let lookup = match self.txt_lookup(name).await {
                Ok(lookup) => lookup,
                Err(e) => match e.kind() {
                    ResolveErrorKind::NoRecordsFound { response_code, .. } => {
                        return if *response_code == ResponseCode::NXDomain {
                            Err(ErrorKind::NotFound.into())
                        } else {
                            // The name exists but has no TXT records.
                            Ok(Vec::new())
                        };
                    }
                    ResolveErrorKind::Timeout => return Err(ErrorKind::TimedOut.into()),
                    _ => return Err(io::Error::new(ErrorKind::Other, e)),
                },
            };

            let txts = lookup
                .into_iter()
                .map(|txt| Ok(txt.txt_data().to_vec()))
                .collect();

            Ok(txts)
        })
    }
}

/// Constructs the resolver used for DKIM key record lookups.
///
/// With a `nameserver`, queries go to that server on port 53 over UDP;
/// otherwise the system resolver configuration is read and used. In both
/// cases `timeout` becomes the resolver's per-query timeout, so that no
/// single query outlives the configured bound.
pub fn build_resolver(
    nameserver: Option<IpAddr>,
    timeout: Duration,
) -> io::Result<TokioAsyncResolver> {
    let (config, mut opts) = match nameserver {
        Some(ip) => {
            let mut config = ResolverConfig::new();
            config.add_name_server(NameServerConfig::new(
                SocketAddr::new(ip, 53),
                Protocol::Udp,
            ));
            (config, ResolverOpts::default())
        }
        None => read_system_conf().map_err(|e| io::Error::new(ErrorKind::Other, e))?,
    };

    opts.timeout = timeout;

    Ok(TokioAsyncResolver::tokio(config, opts))
}
