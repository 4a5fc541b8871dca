use std::io::{Cursor, Read, Seek};
use std::sync::Arc;
use std::time::Instant;

use chrono::{SubsecRound, Utc};
use http::header::{CONTENT_LENGTH, HOST};
use http::{HeaderValue, Method, Request, Response};

use crate::error::{Error, Result};
use crate::s3_http::{Body, HttpSend, ReqwestHttpSend, ResponseBody};
use crate::s3_logger::{LogAdapter, Logger};
use crate::s3_payload::hash_payload;
use crate::s3_signer::{sign_request, SigningContext};
use crate::Config;

/// Client for one bucket of an S3-compatible store.
///
/// Holds only immutable settings and shared collaborators, so one client can
/// serve concurrent callers.
#[derive(Debug, Clone)]
pub struct S3 {
    config: Config,
    http: Arc<dyn HttpSend>,
    logger: Arc<dyn Logger>,
}

impl S3 {
    /// Create a client sending through a default reqwest client and logging
    /// through the `log` facade.
    #[inline]
    pub fn new(config: Config) -> Self {
        Self::with(config, ReqwestHttpSend::default(), LogAdapter)
    }

    /// Create a client with the given transport and logger.
    ///
    /// No default transport is built, so this is the constructor to use from
    /// inside an async runtime.
    pub fn with(config: Config, http: impl HttpSend, logger: impl Logger) -> Self {
        Self {
            config,
            http: Arc::new(http),
            logger: Arc::new(logger),
        }
    }

    /// Replace the logger.
    pub fn with_logger(mut self, logger: impl Logger) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get an object.
    ///
    /// The returned reader is the live response body; the caller owns it and
    /// closes it by dropping it.
    pub fn get(&self, object: &str) -> Result<ResponseBody> {
        let req = self.build_request(Method::GET, object, None::<Cursor<Vec<u8>>>)?;
        let resp = self.send_request(req)?;

        Ok(resp.into_body())
    }

    /// Put an object.
    ///
    /// The body is hashed, rewound and then sent; the response body is closed
    /// before returning.
    pub fn put<R>(&self, object: &str, body: R) -> Result<()>
    where
        R: Read + Seek + Send + 'static,
    {
        let req = self.build_request(Method::PUT, object, Some(body))?;
        let resp = self.send_request(req)?;
        drop(resp);

        Ok(())
    }

    fn build_request<R>(&self, method: Method, object: &str, body: Option<R>) -> Result<Request<Body>>
    where
        R: Read + Seek + Send + 'static,
    {
        if object.is_empty() {
            return Err(Error::BlankObject);
        }
        // The path is signed as written, so it must reach the wire unchanged.
        if object.contains(['?', '#']) {
            return Err(Error::InvalidObject(object.to_string()));
        }

        let cfg = &self.config;
        let path = format!("/{}/{}", cfg.bucket, object);
        let uri = format!("{}://{}{}", cfg.scheme, cfg.host, path);
        let now = Utc::now().trunc_subsecs(0);

        let mut req = Request::builder()
            .method(method.clone())
            .uri(uri.as_str())
            .body(Body::empty())
            .map_err(|source| Error::Request {
                url: uri.clone(),
                source,
            })?;

        self.logger.debug(
            "signing request",
            &[
                ("region", &cfg.region),
                ("host", &cfg.host),
                ("path", &path),
                ("access_key", &cfg.access_key),
                ("now", &now),
            ],
        );

        let mut body = body;
        let (hash, size) = hash_payload(body.as_mut())?;

        let headers = sign_request(&SigningContext {
            method: method.as_str(),
            region: &cfg.region,
            host: &cfg.host,
            path: &path,
            access_key: &cfg.access_key,
            secret_key: cfg.secret_key.expose(),
            payload_hash: &hash,
            time: now,
        })?;

        let host = HeaderValue::from_str(&cfg.host).map_err(|source| Error::Header {
            name: "host",
            source,
        })?;
        req.headers_mut().insert(HOST, host);
        headers.apply(req.headers_mut())?;

        if let Some(body) = body {
            req.headers_mut().insert(CONTENT_LENGTH, HeaderValue::from(size));
            *req.body_mut() = Body::sized(body, size);
        }

        self.logger.debug(
            "signed request",
            &[
                ("url", &uri),
                ("host", &cfg.host),
                ("headers", req.headers()),
            ],
        );

        Ok(req)
    }

    fn send_request(&self, req: Request<Body>) -> Result<Response<ResponseBody>> {
        let url = req.uri().to_string();

        let start = Instant::now();
        let resp = self.http.http_send(req);
        let elapsed = start.elapsed();

        let resp = resp.map_err(|source| Error::Transport { url, source })?;

        if !resp.status().is_success() {
            return Err(Error::from_response(resp));
        }

        self.logger.info(
            "received response",
            &[("status", &resp.status().as_u16()), ("elapsed", &elapsed)],
        );
        self.logger.trace("response headers", &[("headers", resp.headers())]);

        Ok(resp)
    }
}
