use std::borrow::Cow;
use std::io::Read;
use std::time::Duration;

use crate::error::OssError;

pub use crate::request::blocking::AttoBackend as DefaultBackend;

/// Default request timeout. Override with `ClientConfig::with_request_timeout`.
pub const DEFAULT_REQUEST_TIMEOUT: Option<Duration> = Some(Duration::from_secs(60));

pub type BackendRequestBody<'a> = Cow<'a, [u8]>;

/// The HTTP executor: one blocking call per request, no retries.
///
/// Cloned once per operation, so implementations should be cheap to clone.
pub trait Backend: Clone {
    type ResponseBody: Read;

    fn call(
        &mut self,
        request: http::Request<BackendRequestBody<'_>>,
    ) -> Result<http::Response<Self::ResponseBody>, OssError>;
}
