//! Session token service
//!
//! - HS256 JWT issuance for logged-in accounts
//! - Verification including issuer and audience
//! - Revocation of single tokens on logout

mod service;


pub use service::TokenService;
