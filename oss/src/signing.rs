//! Implementation of the S3 V2 style request signature used by OSS
//!
//! `Authorization: AWS <access key id>:base64(hmac-sha1(secret, string to sign))`

use std::cmp::Ordering;

use base64::engine::general_purpose;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use sha1::Sha1;
use time::OffsetDateTime;

use crate::acl::CannedAcl;
use crate::command::HttpMethod;
use crate::error::OssError;
use crate::GMT_DATE;

pub type HmacSha1 = Hmac<Sha1>;

// https://perishablepress.com/stop-using-unsafe-characters-in-urls/
pub const FRAGMENT: &AsciiSet = &CONTROLS
    // URL_RESERVED
    .add(b':')
    .add(b'?')
    .add(b'#')
    .add(b'[')
    .add(b']')
    .add(b'@')
    .add(b'!')
    .add(b'$')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'=')
    // URL_UNSAFE
    .add(b'"')
    .add(b' ')
    .add(b'<')
    .add(b'>')
    .add(b'%')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'`');

pub const FRAGMENT_SLASH: &AsciiSet = &FRAGMENT.add(b'/');

/// Percent-encode a path segment or query value.
pub fn uri_encode(string: &str, encode_slash: bool) -> String {
    if encode_slash {
        utf8_percent_encode(string, FRAGMENT_SLASH).to_string()
    } else {
        utf8_percent_encode(string, FRAGMENT).to_string()
    }
}

/// Request date in the RFC 1123 GMT form the service expects.
pub fn gmt_date(datetime: &OffsetDateTime) -> Result<String, OssError> {
    Ok(datetime.format(GMT_DATE)?)
}

/// Resource path that is signed. Object names are used raw, not percent-encoded.
///
/// `/` for the service, `/<bucket>/` for a bucket and `/<bucket>/<object>` for an
/// object, followed by `?<sub_resource>` when one is set.
pub fn canonical_resource(
    bucket: Option<&str>,
    object: Option<&str>,
    sub_resource: Option<&str>,
) -> String {
    let mut resource = String::from("/");
    if let Some(bucket) = bucket {
        resource.push_str(bucket);
        resource.push('/');
        if let Some(object) = object {
            resource.push_str(object);
        }
    }
    if let Some(sub_resource) = sub_resource {
        resource.push('?');
        resource.push_str(sub_resource);
    }
    resource
}

/// Build the newline joined string to sign.
///
/// The Content-MD5 slot stays empty even when a Content-MD5 header is sent.
pub fn string_to_sign(
    method: HttpMethod,
    content_type: &str,
    date: &str,
    acl: Option<CannedAcl>,
    resource: &str,
) -> String {
    let mut string_to_sign = format!("{}\n\n{}\n{}\n", method, content_type, date);
    if let Some(acl) = acl {
        string_to_sign.push_str(&format!("x-amz-acl:{}\n", acl));
    }
    string_to_sign.push_str(resource);
    string_to_sign
}

/// base64(HMAC-SHA1(secret, string_to_sign))
pub fn sign(secret: &str, string_to_sign: &str) -> Result<String, OssError> {
    let mut hmac = HmacSha1::new_from_slice(secret.as_bytes())?;
    hmac.update(string_to_sign.as_bytes());
    Ok(general_purpose::STANDARD.encode(hmac.finalize().into_bytes()))
}

pub fn authorization_header(access_key: &str, signature: &str) -> String {
    format!("AWS {}:{}", access_key, signature)
}

/// Caller supplied push-stream parameters in signing order: keys in natural,
/// case-insensitive order (`p2` before `p10`), exact key as tie-break.
pub fn sorted_params<'a, I>(params: I) -> Vec<(&'a str, &'a str)>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut sorted: Vec<(&str, &str)> = params
        .into_iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    sorted.sort_by(|(a, _), (b, _)| natural_cmp(a, b).then_with(|| a.cmp(b)));
    sorted
}

/// Case-insensitive comparison where runs of digits compare by numeric value.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().flat_map(char::to_lowercase).peekable();
    let mut b = b.chars().flat_map(char::to_lowercase).peekable();
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let x = take_number(&mut a);
                let y = take_number(&mut b);
                let ordering = x.len().cmp(&y.len()).then_with(|| x.cmp(&y));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                a.next();
                b.next();
            }
        }
    }
}

/// Digits of the run at the front of `chars`, leading zeros dropped.
fn take_number<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        if !(digits.is_empty() && c == '0') {
            digits.push(c);
        }
    }
    digits
}

/// String to sign for a push-stream URL. The expiry timestamp takes the date slot
/// and every parameter contributes a `key:value` line.
pub fn push_stream_string_to_sign(
    expires: u64,
    params: &[(&str, &str)],
    bucket: &str,
    channel: &str,
) -> String {
    let mut string_to_sign = format!("GET\n\n\n{}\n", expires);
    for (key, value) in params {
        string_to_sign.push_str(&format!("{}:{}\n", key, value));
    }
    string_to_sign.push_str(&canonical_push_resource(bucket, channel));
    string_to_sign
}

fn canonical_push_resource(bucket: &str, channel: &str) -> String {
    format!("/{}/{}", bucket, channel)
}

/// Query string of a signed push-stream URL, without the leading `?`.
pub fn push_stream_query(
    access_key: &str,
    expires: u64,
    signature: &str,
    params: &[(&str, &str)],
) -> String {
    let mut query: String = params
        .iter()
        .map(|(key, value)| format!("{}={}&", uri_encode(key, true), uri_encode(value, true)))
        .collect();
    query.push_str(&format!(
        "OSSAccessKeyId={}&Expires={}&Signature={}",
        uri_encode(access_key, true),
        expires,
        uri_encode(signature, true)
    ));
    query
}
