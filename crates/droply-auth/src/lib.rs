//! # droply-auth
//!
//! Identity handling for Droply.
//!
//! ## Modules
//!
//! - `jwt`: bearer token verification and issuance
//! - `upload`: short-lived credentials for direct client uploads

pub mod jwt;
pub mod upload;

pub use jwt::{IdentityClaims, IdentityVerifier, TokenIssuer};
pub use upload::{UploadCredential, UploadCredentialIssuer};
