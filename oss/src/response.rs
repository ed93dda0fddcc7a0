//! Typed results of the client operations and the resolver that produces them
//! from a raw [`ResponseData`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use quick_xml::de::DeError;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::acl::CannedAcl;
use crate::command::Command;
use crate::error::{OssError, ParseError};
use crate::request::ResponseData;
use crate::serde_types::{AccessControlPolicy, BucketInfo, ListAllMyBucketsResult};
use crate::utils::{error_from_response_data, GetAndConvertHeaders};

const META_PREFIXES: [&str; 2] = ["x-oss-meta-", "x-amz-meta-"];

/// Response headers of a metadata request, keys lower-cased.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderResult {
    headers: HashMap<String, String>,
}

impl HeaderResult {
    pub fn new(headers: HashMap<String, String>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self { headers }
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.headers.get(&header.to_lowercase()).map(String::as_str)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn into_headers(self) -> HashMap<String, String> {
        self.headers
    }

    pub fn e_tag(&self) -> Option<String> {
        self.headers.get_string("etag")
    }

    pub fn content_length(&self) -> Option<u64> {
        self.headers.get_and_convert("content-length")
    }

    pub fn content_type(&self) -> Option<String> {
        self.headers.get_string("content-type")
    }

    pub fn last_modified(&self) -> Option<String> {
        self.headers.get_string("last-modified")
    }

    /// User metadata with the `x-oss-meta-` / `x-amz-meta-` prefix stripped.
    pub fn metadata(&self) -> HashMap<String, String> {
        let mut values = HashMap::new();
        for (key, value) in self.headers.iter() {
            for prefix in META_PREFIXES {
                if let Some(name) = key.strip_prefix(prefix) {
                    values.insert(name.to_owned(), value.to_owned());
                }
            }
        }
        values
    }
}

/// Downloaded object.
#[derive(Clone, Debug)]
pub struct BodyResult {
    bytes: Bytes,
    saved_to: Option<PathBuf>,
}

impl BodyResult {
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn saved_to(&self) -> Option<&Path> {
        self.saved_to.as_deref()
    }
}

/// Acknowledgement of a put, set or delete.
#[derive(Clone, Debug)]
pub struct Ack {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
}

/// Acknowledgement of an upload that carried a callback, with the echo of the
/// callback server.
#[derive(Clone, Debug)]
pub struct CallbackResult {
    pub status_code: u16,
    pub body: Bytes,
}

impl CallbackResult {
    pub fn body_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }
}

#[derive(Clone, Debug)]
pub enum OssResponse {
    BucketList(Vec<BucketInfo>),
    Headers(HeaderResult),
    Exists(bool),
    Body(BodyResult),
    Acl(CannedAcl),
    Ack(Ack),
    Callback(CallbackResult),
}

impl OssResponse {
    pub fn into_bucket_list(self) -> Result<Vec<BucketInfo>, OssError> {
        match self {
            OssResponse::BucketList(list) => Ok(list),
            _ => Err(OssError::UnexpectedResponse("bucket list")),
        }
    }

    pub fn into_headers(self) -> Result<HeaderResult, OssError> {
        match self {
            OssResponse::Headers(headers) => Ok(headers),
            _ => Err(OssError::UnexpectedResponse("headers")),
        }
    }

    pub fn into_exists(self) -> Result<bool, OssError> {
        match self {
            OssResponse::Exists(exists) => Ok(exists),
            _ => Err(OssError::UnexpectedResponse("existence check")),
        }
    }

    pub fn into_body(self) -> Result<BodyResult, OssError> {
        match self {
            OssResponse::Body(body) => Ok(body),
            _ => Err(OssError::UnexpectedResponse("object body")),
        }
    }

    pub fn into_acl(self) -> Result<CannedAcl, OssError> {
        match self {
            OssResponse::Acl(acl) => Ok(acl),
            _ => Err(OssError::UnexpectedResponse("acl")),
        }
    }

    pub fn into_ack(self) -> Result<Ack, OssError> {
        match self {
            OssResponse::Ack(ack) => Ok(ack),
            _ => Err(OssError::UnexpectedResponse("acknowledgement")),
        }
    }

    /// Status code of an acknowledgement, with or without callback.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OssResponse::Ack(ack) => Some(ack.status_code),
            OssResponse::Callback(callback) => Some(callback.status_code),
            _ => None,
        }
    }
}

/// Map the raw response of `command` to its typed result.
///
/// Existence checks turn 404 into `false`; every other kind fails with
/// [`OssError::Service`] on a non-2xx status.
pub fn resolve(command: &Command<'_>, response: ResponseData) -> Result<OssResponse, OssError> {
    let status = response.status_code();
    match command {
        Command::BucketExists | Command::ObjectExists => match status {
            200..=299 => Ok(OssResponse::Exists(true)),
            404 => Ok(OssResponse::Exists(false)),
            _ => Err(error_from_response_data(response)),
        },
        _ if !response.is_success() => Err(error_from_response_data(response)),
        Command::ListBuckets => {
            let result: ListAllMyBucketsResult = parse_body(&response, "ListAllMyBucketsResult")?;
            Ok(OssResponse::BucketList(result.buckets.bucket))
        }
        Command::GetBucketMeta | Command::GetObjectMeta => {
            let (_, _, headers, _) = response.into_parts();
            Ok(OssResponse::Headers(HeaderResult::new(headers)))
        }
        Command::GetBucketAcl | Command::GetObjectAcl => {
            let policy: AccessControlPolicy = parse_body(&response, "AccessControlPolicy")?;
            Ok(OssResponse::Acl(acl_from_policy(&policy)))
        }
        Command::GetObject => {
            let (bytes, _, _, saved_to) = response.into_parts();
            Ok(OssResponse::Body(BodyResult { bytes, saved_to }))
        }
        Command::PutObject {
            callback: Some(_), ..
        } => {
            let (body, status_code, _, _) = response.into_parts();
            Ok(OssResponse::Callback(CallbackResult { status_code, body }))
        }
        Command::CreateBucket { .. }
        | Command::DeleteBucket
        | Command::PutBucketAcl { .. }
        | Command::PutObject { .. }
        | Command::DeleteObject
        | Command::PutObjectAcl { .. } => {
            let (_, status_code, headers, _) = response.into_parts();
            Ok(OssResponse::Ack(Ack {
                status_code,
                headers,
            }))
        }
    }
}

fn parse_body<T>(response: &ResponseData, root: &str) -> Result<T, ParseError>
where
    T: serde::de::DeserializeOwned,
{
    let body = response.as_slice();
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseError::EmptyBody);
    }
    expect_root(body, root)?;
    Ok(quick_xml::de::from_reader(body)?)
}

/// The deserializer ignores the root element name, so an HTML page or an
/// `<Error>` document would otherwise turn into an all-default result.
fn expect_root(body: &[u8], root: &str) -> Result<(), DeError> {
    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf).map_err(DeError::InvalidXml)? {
            Event::Start(e) | Event::Empty(e) => {
                let local_name = e.local_name();
                return if local_name.as_ref() == root.as_bytes() {
                    Ok(())
                } else {
                    Err(DeError::Custom(format!(
                        "expected <{}> document, found <{}>",
                        root,
                        String::from_utf8_lossy(local_name.as_ref())
                    )))
                };
            }
            Event::Eof => {
                return Err(DeError::Custom(format!(
                    "expected <{}> document, found no element",
                    root
                )))
            }
            _ => {}
        }
    }
}

fn acl_from_policy(policy: &AccessControlPolicy) -> CannedAcl {
    CannedAcl::from_permissions(
        policy
            .access_control_list
            .grants
            .iter()
            .map(|grant| grant.permission.as_str()),
    )
}
