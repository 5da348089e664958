//! Example: Validate the SCTs embedded in a certificate
//!
//! # Usage
//!
//! ```sh
//! cargo run -p sct-verify --example validate_certificate -- \
//!     --issuer intermediate.pem \
//!     --log-key ctfe.pub \
//!     leaf.pem
//! ```
//!
//! Certificates and keys may be DER or PEM. `--log-key` can be repeated, and
//! `--at-least N` accepts certificates with at least N valid SCTs instead of
//! requiring all of them. Set `RUST_LOG=debug` to see each SCT being checked.

use sct_verify::crypto::{der_from_pem, Keyring};
use sct_verify::{SctOutcome, SctValidator, ValidationPolicy, X509CertificateSource};
use tracing_subscriber::EnvFilter;

use std::env;
use std::fs;
use std::process;

/// Read a DER file, or a PEM file carrying a block with the given tag
fn read_der(path: &str, tag: &str) -> Vec<u8> {
    let contents = fs::read(path).unwrap_or_else(|e| {
        eprintln!("Error: failed to read {}: {}", path, e);
        process::exit(1);
    });

    match std::str::from_utf8(&contents) {
        Ok(text) if text.trim_start().starts_with("-----BEGIN") => {
            der_from_pem(text, tag).unwrap_or_else(|e| {
                eprintln!("Error: invalid PEM in {}: {}", path, e);
                process::exit(1);
            })
        }
        _ => contents,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    let mut issuer: Option<String> = None;
    let mut log_keys: Vec<String> = Vec::new();
    let mut policy = ValidationPolicy::default();
    let mut positional: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--issuer" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --issuer requires a value");
                    process::exit(1);
                }
                issuer = Some(args[i].clone());
            }
            "--log-key" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --log-key requires a value");
                    process::exit(1);
                }
                log_keys.push(args[i].clone());
            }
            "--at-least" => {
                i += 1;
                let n = args.get(i).and_then(|n| n.parse::<usize>().ok()).unwrap_or_else(|| {
                    eprintln!("Error: --at-least requires a number");
                    process::exit(1);
                });
                policy = ValidationPolicy::at_least(n);
            }
            arg => positional.push(arg.to_string()),
        }
        i += 1;
    }

    let [certificate] = positional.as_slice() else {
        eprintln!(
            "Usage: {} [--issuer FILE] --log-key FILE [--log-key FILE]... [--at-least N] CERTIFICATE",
            args[0]
        );
        process::exit(1);
    };

    let mut keyring = Keyring::new();
    for path in &log_keys {
        let log_id = keyring.add_spki(&read_der(path, "PUBLIC KEY"));
        println!("Loaded log key {} ({})", path, log_id.to_base64());
    }

    let source = match &issuer {
        Some(path) => {
            X509CertificateSource::with_issuer_certificate(&read_der(path, "CERTIFICATE"))
                .unwrap_or_else(|e| {
                    eprintln!("Error: failed to load issuer {}: {}", path, e);
                    process::exit(1);
                })
        }
        None => X509CertificateSource::new(),
    };

    let validator = SctValidator::from_keyring(keyring, source).with_policy(policy);

    println!("Validating SCTs...");
    println!("  Certificate: {}", certificate);
    if let Some(path) = &issuer {
        println!("  Issuer: {}", path);
    }

    match validator.validate_certificate_detailed(&read_der(certificate, "CERTIFICATE")) {
        Ok(report) => {
            for sct in &report.scts {
                match &sct.outcome {
                    SctOutcome::Valid => {
                        println!("  SCT {} at {}: valid", sct.log_id.to_base64(), sct.timestamp)
                    }
                    SctOutcome::Invalid { reason } => println!(
                        "  SCT {} at {}: {}",
                        sct.log_id.to_base64(),
                        sct.timestamp,
                        reason
                    ),
                }
            }

            if report.valid {
                println!("\nVerification: SUCCESS");
                println!("  {} of {} SCTs valid", report.valid_count, report.total());
            } else {
                eprintln!("\nVerification: FAILED");
                eprintln!("  {} of {} SCTs valid", report.valid_count, report.total());
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("\nVerification: FAILED");
            eprintln!("  {}", e);
            process::exit(1);
        }
    }
}
