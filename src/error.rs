use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type SignResult<T> = std::result::Result<T, SignError>;
pub type TokenReaderResult<T> = std::result::Result<T, TokenReaderError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("client is not configured for this call : {0}")]
    Configuration(&'static str),
    #[error("unsuccessful OAuth authorization ({status}) due to {body}")]
    Authorization { status: StatusCode, body: String },
    #[error("initial authorization declined the callback ({0})")]
    CallbackRejected(String),
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    #[error("token acquisition failed : {0}")]
    TokenReader(#[from] TokenReaderError),
    #[error("OAuth sign failed : {0}")]
    Signer(#[from] SignError),
    #[error("request failed : {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("invalid header value : {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
    #[error("invalid url : {0}")]
    Url(#[from] url::ParseError),
    #[error("parameters could not be form-encoded : {0}")]
    Form(#[from] serde_urlencoded::ser::Error),
    #[error("response is not valid json : {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error("consumer key is required to sign a request")]
    MissingConsumerKey,
    #[error("consumer secret is required to sign a request")]
    MissingConsumerSecret,
}

#[derive(Error, Debug, Clone)]
pub enum TokenReaderError {
    #[error("response has malformed format: not found {0} in {1}")]
    TokenKeyNotFound(&'static str, String),
}
