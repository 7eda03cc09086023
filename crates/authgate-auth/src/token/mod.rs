//! Stateless bearer tokens.
//!
//! Tokens are self-contained signed credentials; there is no server-side
//! revocation list. Logout is a client-side discard, and several tokens
//! for the same user may be valid concurrently.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::TokenDecoder;
pub use encoder::{IssuedToken, TokenEncoder};
