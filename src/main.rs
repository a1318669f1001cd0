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

use clap::{Parser, ValueEnum};
use dkimkey::{audit, build_resolver, AuditError, AuditReport, DomainName, Selector};
use serde_json::json;
use std::{io, net::IpAddr, process::ExitCode, time::Duration};
use tracing_subscriber::EnvFilter;

/// Checks the strength of the DKIM public key published for a selector and
/// domain.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// DKIM selector, eg `default` or `google`
    selector: Selector,

    /// Domain whose DKIM key to audit
    domain: DomainName,

    /// Query this nameserver instead of the system resolver
    #[arg(short, long, value_name = "IP")]
    nameserver: Option<IpAddr>,

    /// DNS lookup timeout in seconds
    #[arg(long, value_name = "SECONDS", value_parser = parse_timeout, default_value = "4.0")]
    timeout: Duration,

    /// Output format
    #[arg(long, value_enum, default_value_t = Output::Text)]
    output: Output,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Output {
    Text,
    Json,
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|_| "not a number".to_owned())?;

    if !secs.is_finite() || secs <= 0.0 {
        return Err("must be positive".to_owned());
    }

    Ok(Duration::from_secs_f64(secs))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(report) => {
            print_report(&report, cli.output);
            ExitCode::SUCCESS
        }
        Err(error) => {
            print_error(&error, cli.output);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<AuditReport, AuditError> {
    let resolver =
        build_resolver(cli.nameserver, cli.timeout).map_err(AuditError::ResolutionFailed)?;

    audit(&resolver, &cli.selector, &cli.domain, cli.timeout).await
}

fn print_report(report: &AuditReport, output: Output) {
    match output {
        Output::Text => {
            // The PEM block carries its own trailing newline.
            print!("{}", report.public_key_pem);
            println!();
            println!("DKIM Public Key Length: {}", report.key_length_label);
        }
        Output::Json => {
            let json = serde_json::to_string(report).expect("report must serialise");
            println!("{json}");
        }
    }
}

fn print_error(error: &AuditError, output: Output) {
    match output {
        Output::Text => eprintln!("Error: {error}"),
        Output::Json => println!("{}", json!({ "error": error.to_string() })),
    }
}
