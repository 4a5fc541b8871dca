use std::fmt;
use std::io::{self, Read};

use http::header::CONTENT_LENGTH;
use http::{Request, Response};

/// Response body handed back by a transport. Dropping it closes it.
pub type ResponseBody = Box<dyn Read + Send>;

/// Request body: nothing, or a reader with its declared length.
pub enum Body {
    Empty,
    Sized {
        reader: Box<dyn Read + Send>,
        len: u64,
    },
}

#[allow(clippy::len_without_is_empty)]
impl Body {
    #[inline]
    pub fn empty() -> Self {
        Self::Empty
    }

    #[inline]
    pub fn sized(reader: impl Read + Send + 'static, len: u64) -> Self {
        Self::Sized {
            reader: Box::new(reader),
            len,
        }
    }

    /// Declared length in bytes.
    #[inline]
    pub fn len(&self) -> u64 {
        match self {
            Self::Empty => 0,
            Self::Sized { len, .. } => *len,
        }
    }

    /// True when there is no body at all, as opposed to a zero-length one.
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Empty => Ok(0),
            Self::Sized { reader, .. } => reader.read(buf),
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Body::Empty"),
            Self::Sized { len, .. } => f.debug_struct("Body::Sized").field("len", len).finish(),
        }
    }
}

/// HttpSend performs the HTTP round trip for the client.
///
/// Any HTTP client can stand behind it; the crate ships [`ReqwestHttpSend`].
/// Timeouts and cancellation are the implementation's business, the client
/// adds none of its own.
pub trait HttpSend: fmt::Debug + Send + Sync + 'static {
    /// Send the request and return the response with its body unread.
    fn http_send(&self, req: Request<Body>) -> anyhow::Result<Response<ResponseBody>>;
}

#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: reqwest::blocking::Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest blocking client.
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl HttpSend for ReqwestHttpSend {
    fn http_send(&self, req: Request<Body>) -> anyhow::Result<Response<ResponseBody>> {
        let (mut parts, body) = req.into_parts();

        // reqwest declares the length of a sized body itself.
        parts.headers.remove(CONTENT_LENGTH);

        let mut builder = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers);
        if let Body::Sized { reader, len } = body {
            builder = builder.body(reqwest::blocking::Body::sized(reader, len));
        }

        let resp = builder.send()?;
        let status = resp.status();
        let headers = resp.headers().clone();

        let mut out: Response<ResponseBody> = Response::new(Box::new(resp));
        *out.status_mut() = status;
        *out.headers_mut() = headers;
        Ok(out)
    }
}
