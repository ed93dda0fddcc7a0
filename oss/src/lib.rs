//! Blocking client for the ppcloud S3-style object storage service (OSS)
//!
//! Requests are signed with the legacy `AWS <id>:<signature>` scheme (HMAC-SHA1)
//! and sent under the `/v1/storage/oss` prefix of the configured endpoint.
#![forbid(unsafe_code)]

#[macro_use]
extern crate serde_derive;

pub use osscreds as creds;

pub use acl::CannedAcl;
pub use client::{Client, DeleteObjectsResult, PutOptions, DEFAULT_PUSH_EXPIRY_SECS};
pub use config::ClientConfig;
pub use error::{ErrorKind, OssError, ParseError};
pub use response::{Ack, BodyResult, CallbackResult, HeaderResult, OssResponse};
pub use serde_types::BucketInfo;

pub mod acl;
pub mod client;
pub mod command;
pub mod config;
pub mod mime;
pub mod response;
pub mod serde_types;
pub mod signing;

pub mod error;
pub mod request;
pub mod utils;

/// Path prefix of every API request.
pub const API_PREFIX: &str = "/v1/storage/oss";

const GMT_DATE: &[time::format_description::FormatItem<'static>] = time::macros::format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);
