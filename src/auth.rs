//! Auth-domain identity resolution and bearer token models.

pub mod identity;
pub mod token;

pub use identity::*;
pub use token::*;
