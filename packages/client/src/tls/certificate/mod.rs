//! Certificate and key parsing
//!
//! Pure parsing from PEM bytes; file access lives in
//! [`CredentialLoader`](crate::tls::CredentialLoader).

pub mod key;
pub mod parser;

pub use key::parse_private_key;
pub use parser::parse_certificate_from_pem;
