#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use firma_engine as fe;
use rcgen::{BasicConstraints, Certificate, CertificateParams, DistinguishedName, DnType, IsCa};

/// Generate a self-signed CA certificate with the given common name.
pub fn generate_root(common_name: &str) -> Certificate {
    let mut params = CertificateParams::new(vec![]);
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, common_name);
    dn.push(DnType::OrganizationName, "Firma Test PKI");
    params.distinguished_name = dn;
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    Certificate::from_params(params).expect("cert")
}

/// A PEM bundle holding one root per common name.
pub fn pem_bundle(common_names: &[&str]) -> Vec<u8> {
    common_names
        .iter()
        .map(|cn| generate_root(cn).serialize_pem().expect("cert pem"))
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}

/// A loaded store with a single root and the given policy.
pub fn trust_store(policy: fe::RevocationPolicy) -> fe::TrustStore {
    fe::TrustStore::load(
        fe::TrustSource::Bytes { data: pem_bundle(&["Test Root CA"]) },
        policy,
    )
    .expect("trust store")
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write file");
    path
}

/// Command config that runs `body` as a shell script in place of the engine.
/// The script is passed to `/bin/sh` so it never has to be executable.
pub fn fake_engine(dir: &Path, body: &str, timeout: Duration) -> fe::CommandConfig {
    let script = write_file(dir, "fake-engine.sh", body.as_bytes());
    let mut cfg = fe::CommandConfig::secure_default();
    cfg.program = PathBuf::from("/bin/sh");
    cfg.subcommand = vec![script.display().to_string()];
    cfg.timeout = timeout;
    cfg
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Minimal PDF-looking document bytes; the fake engines never parse them.
pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n".to_vec()
}

/// Diagnostic output in the shape the command engine prints for a document
/// with two signatures, the second one revoked.
pub const TWO_SIGNATURES_OUTPUT: &str = "\
pyHanko validation run
Document has 2 embedded signatures
Field 1: Signature1
Certificate subject: \"Common Name: MARIA PEREZ SOTO (FIRMA), Serial Number: CPF-01-0234-0567, Country: CR\"
Certificate SHA1 fingerprint: 0a1b2c3d
Trust anchor: \"Common Name: CA RAIZ NACIONAL - COSTA RICA v2\"
The signer's certificate is trusted.
Signing time as reported by signer: 2024-03-05T14:22:10+00:00
The signature is judged VALID.
Field 2: Aprobacion
Certificate subject: \"Common Name: JUAN MORA, Serial Number: CPF-02-0345-0678\"
The signer's certificate is REVOKED.
Signing time as reported by signer: 2024-03-06T09:01:00+00:00
The signature is judged INVALID.

WARNING:pyhanko.sign.validation: revocation info for OCSP responder missing
";
