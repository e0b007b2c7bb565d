pub mod archive;
pub mod fields;
pub mod token_response;

pub use token_response::{Parameters, TokenResponse};
