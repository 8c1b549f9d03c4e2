//! Identity provider adapters.

mod google;

pub use google::GoogleTokeninfoVerifier;
