use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, DATE, HeaderName};
use http::{HeaderMap, Method};
use time::OffsetDateTime;
use url::Url;

use crate::command::{Command, HttpMethod, Scope};
use crate::config::ClientConfig;
use crate::error::OssError;
use crate::request::Backend;
use crate::signing;
use crate::utils::now_utc;
use crate::API_PREFIX;

/// Raw response of a single call: status, lower-cased headers and the whole body.
#[derive(Debug)]
pub struct ResponseData {
    bytes: Bytes,
    status_code: u16,
    headers: HashMap<String, String>,
    saved_to: Option<PathBuf>,
}

impl ResponseData {
    pub fn new(bytes: Bytes, status_code: u16, headers: HashMap<String, String>) -> ResponseData {
        ResponseData {
            bytes,
            status_code,
            headers,
            saved_to: None,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Where the body was mirrored on disk, for object downloads.
    pub fn saved_to(&self) -> Option<&Path> {
        self.saved_to.as_deref()
    }

    pub(crate) fn into_parts(self) -> (Bytes, u16, HashMap<String, String>, Option<PathBuf>) {
        (self.bytes, self.status_code, self.headers, self.saved_to)
    }
}

struct BuildHelper<'temp, 'body> {
    config: &'temp ClientConfig,
    bucket: Option<&'temp str>,
    object: Option<&'temp str>,
    command: Command<'body>,
    datetime: OffsetDateTime,
}

impl<'temp, 'body> BuildHelper<'temp, 'body> {
    fn resource(&self) -> String {
        match self.command.scope() {
            Scope::Service => signing::canonical_resource(None, None, None),
            Scope::Bucket => {
                signing::canonical_resource(self.bucket, None, self.command.sub_resource())
            }
            Scope::Object => signing::canonical_resource(
                self.bucket,
                self.object,
                self.command.sub_resource(),
            ),
        }
    }

    fn string_to_sign(&self, date: &str) -> String {
        signing::string_to_sign(
            self.command.http_verb(),
            self.command.content_type(),
            date,
            self.command.acl(),
            &self.resource(),
        )
    }

    fn authorization(&self, date: &str) -> Result<String, OssError> {
        let string_to_sign = self.string_to_sign(date);
        log::trace!("string to sign: {:?}", string_to_sign);
        let signature = signing::sign(self.config.secret_key(), &string_to_sign)?;
        Ok(signing::authorization_header(
            self.config.access_key(),
            &signature,
        ))
    }

    fn add_headers(&self, headers: &mut HeaderMap) -> Result<(), OssError> {
        let date = signing::gmt_date(&self.datetime)?;

        let content_type = self.command.content_type();
        if !content_type.is_empty() {
            headers.insert(CONTENT_TYPE, content_type.parse()?);
        }

        if let Some(acl) = self.command.acl() {
            headers.insert(HeaderName::from_static("x-oss-acl"), acl.to_string().parse()?);
        }

        if let Some(content_md5) = self.command.content_md5() {
            headers.insert(HeaderName::from_static("content-md5"), content_md5.parse()?);
        }

        if let Some((callback, callback_var)) = self.command.callback() {
            headers.insert(HeaderName::from_static("x-oss-callback"), callback.parse()?);
            if let Some(callback_var) = callback_var {
                headers.insert(
                    HeaderName::from_static("x-oss-callback-var"),
                    callback_var.parse()?,
                );
            }
        }

        headers.insert(AUTHORIZATION, self.authorization(&date)?.parse()?);
        headers.insert(DATE, date.parse()?);

        Ok(())
    }

    fn url(&self) -> Result<Url, OssError> {
        let mut url_str = format!("{}{}", self.config.endpoint(), API_PREFIX);

        match self.command.scope() {
            Scope::Service => {}
            Scope::Bucket => {
                url_str.push('/');
                url_str.push_str(&signing::uri_encode(self.bucket.unwrap_or_default(), true));
                if let Some(sub_resource) = self.command.sub_resource() {
                    url_str.push_str("/?");
                    url_str.push_str(sub_resource);
                }
            }
            Scope::Object => {
                url_str.push('/');
                url_str.push_str(&signing::uri_encode(self.bucket.unwrap_or_default(), true));
                url_str.push('/');
                url_str.push_str(&signing::uri_encode(self.object.unwrap_or_default(), false));
                if let Some(sub_resource) = self.command.sub_resource() {
                    url_str.push('?');
                    url_str.push_str(sub_resource);
                }
            }
        }

        Ok(Url::parse(&url_str)?)
    }
}

fn make_body(command: Command<'_>) -> Cow<'_, [u8]> {
    if let Command::PutObject { content, .. } = command {
        content.into()
    } else {
        b"".as_slice().into()
    }
}

pub(crate) fn build_request<'body>(
    config: &ClientConfig,
    bucket: Option<&str>,
    object: Option<&str>,
    command: Command<'body>,
) -> Result<http::Request<Cow<'body, [u8]>>, OssError> {
    let method = match command.http_verb() {
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Get => Method::GET,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Head => Method::HEAD,
    };

    let headers_builder = BuildHelper {
        config,
        bucket,
        object,
        command,
        datetime: now_utc()?,
    };
    let mut headers = HeaderMap::new();
    headers_builder.add_headers(&mut headers)?;
    let url = headers_builder.url()?;
    log::debug!(
        "{}: {} {} ({} bytes)",
        headers_builder.command.name(),
        method,
        url,
        headers_builder.command.content_length()
    );

    let uri_builder = http::Uri::builder()
        .scheme(url.scheme())
        .authority(url.authority());
    let uri_builder = match url.query() {
        None => uri_builder.path_and_query(url.path()),
        Some(query) => uri_builder.path_and_query(format!("{}?{}", url.path(), query)),
    };

    let mut request = http::Request::builder()
        .method(method)
        .uri(uri_builder.build()?)
        .body(make_body(headers_builder.command))?;
    *request.headers_mut() = headers;
    Ok(request)
}

/// Sign, send and read one operation. A successful object download is also
/// mirrored below the configured download directory.
pub(crate) fn dispatch<B: Backend>(
    backend: &B,
    config: &ClientConfig,
    bucket: Option<&str>,
    object: Option<&str>,
    command: Command<'_>,
) -> Result<ResponseData, OssError> {
    let is_download = matches!(command, Command::GetObject);
    let request = build_request(config, bucket, object, command)?;

    let mut backend = backend.clone();
    let response = backend.call(request)?;

    let status_code = response.status().as_u16();
    let mut headers = HashMap::new();
    for (name, value) in response.headers().iter() {
        if let Ok(value) = value.to_str() {
            headers.insert(name.as_str().to_lowercase(), value.to_string());
        }
    }
    let mut body = Vec::new();
    response.into_body().read_to_end(&mut body)?;

    let mut response_data = ResponseData::new(Bytes::from(body), status_code, headers);

    if is_download && response_data.is_success() {
        if let (Some(dir), Some(object)) = (config.download_dir(), object) {
            if dir.is_dir() {
                response_data.saved_to = mirror_download(dir, object, response_data.as_slice());
            }
        }
    }

    Ok(response_data)
}

/// Where `object` is mirrored below `dir`. Names that would leave `dir` are
/// rejected; a leading `/` is ignored.
pub(crate) fn mirror_target(dir: &Path, object: &str) -> Result<PathBuf, OssError> {
    let relative = Path::new(object.trim_start_matches('/'));
    let mut target = dir.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => target.push(part),
            Component::CurDir => {}
            _ => {
                return Err(OssError::validation(format!(
                    "object name {:?} escapes the download directory",
                    object
                )))
            }
        }
    }
    if target == dir {
        return Err(OssError::validation(format!(
            "object name {:?} has no file name",
            object
        )));
    }
    Ok(target)
}

/// Write `bytes` to `<dir>/<object>`, creating parent directories of nested names.
/// Failures are logged; the body is still returned to the caller.
fn mirror_download(dir: &Path, object: &str, bytes: &[u8]) -> Option<PathBuf> {
    let target = match mirror_target(dir, object) {
        Ok(target) => target,
        Err(e) => {
            log::warn!("not mirroring {}: {}", object, e);
            return None;
        }
    };
    let written = match target.parent() {
        Some(parent) => std::fs::create_dir_all(parent),
        None => Ok(()),
    }
    .and_then(|_| std::fs::write(&target, bytes));
    match written {
        Ok(()) => {
            log::debug!("mirrored {} bytes to {}", bytes.len(), target.display());
            Some(target)
        }
        Err(e) => {
            log::warn!("failed to mirror {} to {}: {}", object, target.display(), e);
            None
        }
    }
}
