mod time_utils;

#[cfg(test)]
pub(crate) mod testing;

pub use time_utils::*;

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::OssError;
use crate::request::ResponseData;
use crate::serde_types::ErrorResponse;

pub trait GetAndConvertHeaders {
    fn get_and_convert<T: FromStr>(&self, header: &str) -> Option<T>;
    fn get_string(&self, header: &str) -> Option<String>;
}

/// Keys are expected lower-cased, as `ResponseData` stores them.
impl GetAndConvertHeaders for HashMap<String, String> {
    fn get_and_convert<T: FromStr>(&self, header: &str) -> Option<T> {
        self.get(&header.to_lowercase())?.trim().parse::<T>().ok()
    }
    fn get_string(&self, header: &str) -> Option<String> {
        self.get(&header.to_lowercase()).cloned()
    }
}

/// Turn a non-2xx response into a service error, picking code, message and
/// request id out of an `<Error>` body when there is one.
pub(crate) fn error_from_response_data(response_data: ResponseData) -> OssError {
    let body = if response_data.as_slice().is_empty() {
        None
    } else {
        quick_xml::de::from_reader::<_, ErrorResponse>(response_data.as_slice()).ok()
    };
    let request_id = body
        .as_ref()
        .and_then(|b| b.request_id.clone())
        .or_else(|| response_data.headers().get_string("x-oss-request-id"))
        .or_else(|| response_data.headers().get_string("x-amz-request-id"));
    let (code, message) = match body {
        Some(body) => (body.code, body.message),
        None => (None, None),
    };
    OssError::Service {
        status: response_data.status_code(),
        code,
        message,
        request_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn response(status: u16, body: &'static str, headers: &[(&str, &str)]) -> ResponseData {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ResponseData::new(Bytes::from_static(body.as_bytes()), status, headers)
    }

    #[test]
    fn service_error_from_xml_body() {
        let err = error_from_response_data(response(
            403,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
  <Code>AccessDenied</Code>
  <Message>Access Denied</Message>
  <RequestId>4442587FB7D0A2F9</RequestId>
  <HostId>oss.example.com</HostId>
</Error>"#,
            &[],
        ));
        match err {
            OssError::Service {
                status,
                code,
                message,
                request_id,
            } => {
                assert_eq!(status, 403);
                assert_eq!(code.as_deref(), Some("AccessDenied"));
                assert_eq!(message.as_deref(), Some("Access Denied"));
                assert_eq!(request_id.as_deref(), Some("4442587FB7D0A2F9"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn service_error_without_body() {
        let err = error_from_response_data(response(500, "", &[("x-oss-request-id", "req-1")]));
        match err {
            OssError::Service {
                status,
                code,
                message,
                request_id,
            } => {
                assert_eq!(status, 500);
                assert!(code.is_none());
                assert!(message.is_none());
                assert_eq!(request_id.as_deref(), Some("req-1"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn header_helpers() {
        let mut headers = HashMap::new();
        headers.insert("content-length".to_string(), " 42".to_string());
        headers.insert("etag".to_string(), "\"abc\"".to_string());
        assert_eq!(headers.get_and_convert::<u64>("Content-Length"), Some(42));
        assert_eq!(headers.get_string("ETag").as_deref(), Some("\"abc\""));
        assert_eq!(headers.get_string("x-missing"), None);
    }
}
