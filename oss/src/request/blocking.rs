use std::borrow::Cow;
use std::time::Duration;

use attohttpc::header::HeaderName;

use super::backend::{Backend, BackendRequestBody, DEFAULT_REQUEST_TIMEOUT};
use crate::error::OssError;

/// Blocking backend on top of `attohttpc`. Redirects, TLS and connection handling
/// are left to the library.
#[derive(Clone, Debug)]
pub struct AttoBackend {
    request_timeout: Option<Duration>,
}

impl Default for AttoBackend {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl AttoBackend {
    pub fn with_request_timeout(&self, request_timeout: Option<Duration>) -> Self {
        Self { request_timeout }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    fn build<'a>(
        &self,
        request: http::Request<Cow<'a, [u8]>>,
    ) -> Result<attohttpc::RequestBuilder<attohttpc::body::Bytes<Cow<'a, [u8]>>>, OssError> {
        let mut session = attohttpc::Session::new();

        for (name, value) in request.headers().iter() {
            session.header(HeaderName::from_bytes(name.as_ref())?, value.to_str()?);
        }

        if let Some(timeout) = self.request_timeout {
            session.timeout(timeout)
        }

        let url = format!("{}", request.uri());
        let builder = match *request.method() {
            http::Method::GET => session.get(url),
            http::Method::DELETE => session.delete(url),
            http::Method::PUT => session.put(url),
            http::Method::HEAD => session.head(url),
            ref other => return Err(OssError::UnsupportedMethod(other.to_string())),
        };

        Ok(builder.bytes(request.into_body()))
    }
}

impl Backend for AttoBackend {
    type ResponseBody = attohttpc::ResponseReader;

    fn call(
        &mut self,
        request: http::Request<BackendRequestBody<'_>>,
    ) -> Result<http::Response<Self::ResponseBody>, OssError> {
        let response = self.build(request)?.send()?;

        let (status, headers, body) = response.split();
        let mut builder =
            http::Response::builder().status(http::StatusCode::from_u16(status.as_u16())?);
        if let Some(response_headers) = builder.headers_mut() {
            *response_headers = headers;
        }

        Ok(builder.body(body)?)
    }
}
