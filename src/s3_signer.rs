use chrono::{DateTime, Utc};
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use http::header::{HeaderName, AUTHORIZATION};
use http::{HeaderMap, HeaderValue};
use sha2::Sha256;

use crate::error::{Error, Result};
use crate::s3_constant::*;
use crate::s3_string_to_sign::{amz_date, scope, string_to_sign, CanonicalRequest};

type HmacSha256 = Hmac<Sha256>;

pub struct Signer<'s> {
    secret_key: &'s str,
    region: &'s str,
}

impl<'s> Signer<'s> {
    #[inline]
    pub fn new(secret_key: &'s str, region: &'s str) -> Self {
        Self { secret_key, region }
    }

    #[inline]
    pub fn sign(&self, date: DateTime<Utc>, string_to_sign: &str) -> Result<String, InvalidLength> {
        let signing_key = self.signing_key(date)?;
        let mut h = HmacSha256::new_from_slice(&signing_key)?;
        h.update(string_to_sign.as_bytes());
        Ok(hex::encode(h.finalize().into_bytes()))
    }

    pub fn signing_key(&self, date: DateTime<Utc>) -> Result<Vec<u8>, InvalidLength> {
        // Step 1: Sign Date
        let date = date.format(S3_DATE_FORMAT).to_string();
        let mut date_h = HmacSha256::new_from_slice(format!("AWS4{}", self.secret_key).as_bytes())?;
        date_h.update(date.as_bytes());
        let date_key = date_h.finalize().into_bytes();

        // Step 2: Sign Date and Region
        let mut date_region_h = HmacSha256::new_from_slice(&date_key)?;
        date_region_h.update(self.region.as_bytes());
        let date_region_key = date_region_h.finalize().into_bytes();

        // Step 3: Sign Date and region and Service
        let mut date_region_service_h = HmacSha256::new_from_slice(&date_region_key)?;
        date_region_service_h.update(S3_SERVICE.as_bytes());
        let date_region_service_key = date_region_service_h.finalize().into_bytes();

        // Step 4: Final sign
        let mut signing_key_h = HmacSha256::new_from_slice(&date_region_service_key)?;
        signing_key_h.update(S3_REQUEST_TYPE.as_bytes());
        Ok(signing_key_h.finalize().into_bytes().to_vec())
    }
}

/// Everything one request signature depends on.
///
/// Built per request and dropped once the headers are on the request; the
/// time must be taken fresh for every request.
#[derive(Clone, Copy)]
pub struct SigningContext<'a> {
    pub method: &'a str,
    pub region: &'a str,
    pub host: &'a str,
    pub path: &'a str,
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub payload_hash: &'a str,
    pub time: DateTime<Utc>,
}

/// Headers produced by [`sign_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub authorization: String,
    pub amz_date: String,
    pub content_sha256: String,
}

impl SignedHeaders {
    /// Sets the three headers, replacing any previous values.
    ///
    /// `Authorization` is marked sensitive so it is hidden from header dumps.
    pub fn apply(self, headers: &mut HeaderMap) -> Result<()> {
        let mut authorization = header_value("authorization", self.authorization)?;
        authorization.set_sensitive(true);

        headers.insert(AUTHORIZATION, authorization);
        headers.insert(
            HeaderName::from_static(S3_DATE_KEY),
            header_value(S3_DATE_KEY, self.amz_date)?,
        );
        headers.insert(
            HeaderName::from_static(S3_CONTENT_KEY),
            header_value(S3_CONTENT_KEY, self.content_sha256)?,
        );
        Ok(())
    }
}

fn header_value(name: &'static str, value: String) -> Result<HeaderValue> {
    HeaderValue::try_from(value).map_err(|source| Error::Header { name, source })
}

/// Computes the SigV4 headers for a request. Pure: same context, same output.
pub fn sign_request(ctx: &SigningContext<'_>) -> Result<SignedHeaders> {
    let canonical_hex = CanonicalRequest {
        method: ctx.method,
        path: ctx.path,
        host: ctx.host,
        payload_hash: ctx.payload_hash,
        date: ctx.time,
    }
    .canonical_hex();

    let string_to_sign = string_to_sign(&canonical_hex, ctx.region, ctx.time);
    let signature = Signer::new(ctx.secret_key, ctx.region).sign(ctx.time, &string_to_sign)?;

    Ok(SignedHeaders {
        authorization: format_authorization(ctx.access_key, &scope(ctx.region, ctx.time), &signature),
        amz_date: amz_date(ctx.time),
        content_sha256: ctx.payload_hash.to_string(),
    })
}

#[inline]
fn format_authorization(access_key: &str, scope: &str, sign: &str) -> String {
    format!(
        "{algo} Credential={access_key}/{scope}, SignedHeaders={signed_headers}, Signature={sign}",
        algo = S3_ALGO_VALUE,
        access_key = access_key,
        scope = scope,
        signed_headers = S3_SIGNED_HEADERS,
        sign = sign,
    )
}
