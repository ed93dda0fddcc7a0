use thiserror::Error;

/// Failure to turn a response body into the typed result of an operation.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("response body is empty")]
    EmptyBody,
    #[error("malformed response body: {0}")]
    Malformed(#[from] quick_xml::de::DeError),
}

#[derive(Error, Debug)]
pub enum OssError {
    #[error("configuration: {0}")]
    Configuration(String),
    #[error("oss-creds: {0}")]
    Credentials(#[from] crate::creds::error::CredentialsError),
    #[error("validation: {0}")]
    Validation(String),
    #[error("transport: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
    #[error("Got HTTP {status} from service (code: {code:?}, message: {message:?}, request id: {request_id:?})")]
    Service {
        status: u16,
        code: Option<String>,
        message: Option<String>,
        request_id: Option<String>,
    },
    #[error("parse: {0}")]
    Parse(#[from] ParseError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("hmac invalid length: {0}")]
    HmacInvalidLength(#[from] hmac::digest::InvalidLength),
    #[error("url parse: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("http: {0}")]
    Http(#[from] http::Error),
    #[error("invalid status code: {0}")]
    InvalidStatusCode(#[from] http::status::InvalidStatusCode),
    #[error("header to string: {0}")]
    HeaderToStr(#[from] http::header::ToStrError),
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),
    #[error("Time format error: {0}")]
    TimeFormatError(#[from] time::error::Format),
    #[error("Time out of range: {0}")]
    TimeRange(#[from] time::error::ComponentRange),
    #[error("system time: {0}")]
    SystemTime(#[from] std::time::SystemTimeError),
    #[error("unsupported http method: {0}")]
    UnsupportedMethod(String),
    #[error("unexpected response for {0}")]
    UnexpectedResponse(&'static str),
}

impl From<attohttpc::Error> for OssError {
    fn from(e: attohttpc::Error) -> Self {
        OssError::Transport(Box::new(e))
    }
}

impl From<quick_xml::de::DeError> for OssError {
    fn from(e: quick_xml::de::DeError) -> Self {
        OssError::Parse(ParseError::Malformed(e))
    }
}

/// Coarse classification of an [`OssError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Validation,
    Transport,
    Service,
    EmptyBody,
    MalformedBody,
    Io,
    Internal,
}

impl OssError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OssError::Configuration(_) | OssError::Credentials(_) => ErrorKind::Configuration,
            OssError::Validation(_) => ErrorKind::Validation,
            OssError::Transport(_) => ErrorKind::Transport,
            OssError::Service { .. } => ErrorKind::Service,
            OssError::Parse(ParseError::EmptyBody) => ErrorKind::EmptyBody,
            OssError::Parse(ParseError::Malformed(_)) => ErrorKind::MalformedBody,
            OssError::Io(_) => ErrorKind::Io,
            _ => ErrorKind::Internal,
        }
    }

    /// HTTP status of a service error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OssError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        OssError::Validation(message.into())
    }
}
