#![forbid(unsafe_code)]

mod credentials;
pub mod error;

pub use credentials::*;
