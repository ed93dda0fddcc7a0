use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use crate::error::OssError;
use crate::request::{Backend, BackendRequestBody};

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: http::Method,
    pub uri: String,
    pub headers: http::HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

enum Canned {
    Response {
        status: u16,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    },
    Failure(String),
}

#[derive(Default)]
struct SpyState {
    requests: Vec<RecordedRequest>,
    responses: VecDeque<Canned>,
}

/// Records every request and replays queued responses in order. Clones share state,
/// so the copy handed to a client can be inspected from the test. An empty queue
/// answers 200 with no body.
#[derive(Clone, Default)]
pub struct SpyBackend {
    state: Arc<Mutex<SpyState>>,
}

impl SpyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.respond_with_headers(status, &[], body)
    }

    pub fn respond_with_headers(&self, status: u16, headers: &[(&str, &str)], body: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Canned::Response {
                status,
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: body.as_bytes().to_vec(),
            });
        self
    }

    /// Queue a transport failure.
    pub fn fail(&self, message: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Canned::Failure(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }
}

impl Backend for SpyBackend {
    type ResponseBody = Cursor<Vec<u8>>;

    fn call(
        &mut self,
        request: http::Request<BackendRequestBody<'_>>,
    ) -> Result<http::Response<Self::ResponseBody>, OssError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: request.method().clone(),
            uri: request.uri().to_string(),
            headers: request.headers().clone(),
            body: request.body().to_vec(),
        });

        match state.responses.pop_front() {
            None => Ok(http::Response::builder()
                .status(200)
                .body(Cursor::new(Vec::new()))?),
            Some(Canned::Failure(message)) => Err(OssError::Transport(message.into())),
            Some(Canned::Response {
                status,
                headers,
                body,
            }) => {
                let mut builder = http::Response::builder().status(status);
                for (name, value) in headers {
                    builder = builder.header(name, value);
                }
                Ok(builder.body(Cursor::new(body))?)
            }
        }
    }
}

/// Answers every request with 418.
#[derive(Clone)]
pub struct AlwaysFailBackend;

impl Backend for AlwaysFailBackend {
    type ResponseBody = &'static [u8];

    fn call(
        &mut self,
        _: http::Request<BackendRequestBody<'_>>,
    ) -> Result<http::Response<Self::ResponseBody>, OssError> {
        Ok(http::Response::builder()
            .status(http::StatusCode::IM_A_TEAPOT)
            .body(&b""[..])?)
    }
}
