use std::io::{self, Read};

use hmac::digest::InvalidLength;
use http::{HeaderMap, Response, StatusCode};

use crate::s3_constant::ERROR_BODY_LIMIT;
use crate::ResponseBody;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("object cannot be blank")]
    BlankObject,

    #[error("object {0:?} cannot contain '?' or '#'")]
    InvalidObject(String),

    #[error("failed to hash body")]
    Hash(#[source] io::Error),

    #[error("failed to seek body")]
    Seek(#[source] io::Error),

    #[error("failed to create request to {url:?}")]
    Request {
        url: String,
        #[source]
        source: http::Error,
    },

    #[error("invalid value for header {name}")]
    Header {
        name: &'static str,
        #[source]
        source: http::header::InvalidHeaderValue,
    },

    #[error("sign error: {0}")]
    Sign(#[from] InvalidLength),

    #[error("failed request to {url:?}")]
    Transport {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(
        "s3 error, code: {code}, request_id: {request_id}, message: {message}, headers: {headers:?}"
    )]
    Provider {
        status: StatusCode,
        code: String,
        message: String,
        request_id: String,
        headers: HeaderMap,
    },

    #[error("http error, status: {status}, body: {body}, headers: {headers:?}")]
    Http {
        status: StatusCode,
        body: String,
        headers: HeaderMap,
    },

    #[error("invalid config: {0}")]
    Config(String),
}

/// Error document returned by S3-compatible stores.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Message")]
    message: String,
    #[serde(rename = "RequestId")]
    request_id: String,
}

impl Error {
    /// Builds the error for a non-2xx response, consuming at most
    /// [`ERROR_BODY_LIMIT`] bytes of its body. The body is closed on return.
    pub(crate) fn from_response(resp: Response<ResponseBody>) -> Self {
        let (parts, body) = resp.into_parts();

        let mut bytes = Vec::new();
        // Keep whatever arrived before a failed read.
        let _ = body.take(ERROR_BODY_LIMIT).read_to_end(&mut bytes);
        let text = String::from_utf8_lossy(&bytes).into_owned();

        match serde_xml_rs::from_str::<ErrorBody>(&text) {
            Ok(doc) => Self::Provider {
                status: parts.status,
                code: doc.code,
                message: doc.message,
                request_id: doc.request_id,
                headers: parts.headers,
            },
            Err(_) => Self::Http {
                status: parts.status,
                body: text,
                headers: parts.headers,
            },
        }
    }
}
