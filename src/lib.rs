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

//! A library for resolving DKIM public keys in DNS and reporting their
//! strength.
//!
//! DKIM signing domains publish their public keys in TXT records under
//! `<selector>._domainkey.<domain>` ([RFC 6376], section 3.6). This crate
//! retrieves such a record, extracts the Base64-encoded RSA public key from
//! its *p=* tag, and reports the modulus bit length, so that weak signing
//! keys (512 or 1024 bits, see [RFC 8301]) can be flagged.
//!
//! The pipeline is a single pass through four stages, each usable on its own:
//!
//! 1. query name derivation ([`name`]),
//! 2. TXT record retrieval ([`fetch`], over the [`LookupTxt`] DNS
//!    abstraction in [`lookup`]),
//! 3. key extraction and PEM re-encoding ([`extract`]),
//! 4. RSA key introspection ([`inspect`]).
//!
//! [`audit`](audit()) runs all four stages in order and produces an
//! [`AuditReport`]; the `dkimkey` binary wraps that in a command-line
//! interface.
//!
//! Out of scope: verifying DKIM signatures, validating record syntax beyond
//! locating the *p=* tag, and key types other than RSA.
//!
//! [RFC 6376]: https://www.rfc-editor.org/rfc/rfc6376
//! [RFC 8301]: https://www.rfc-editor.org/rfc/rfc8301

pub mod audit;
mod error;
pub mod extract;
pub mod fetch;
pub mod inspect;
pub mod lookup;
pub mod name;

pub use crate::{
    audit::{audit, AuditReport},
    error::AuditError,
    extract::{extract_public_key, PublicKeyMaterial},
    fetch::{dkim_qname, fetch_dkim_record},
    inspect::{inspect_public_key, KeyLength},
    lookup::{build_resolver, LookupTxt},
    name::{DomainName, Selector},
};
