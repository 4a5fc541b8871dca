use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::s3_constant::*;

/// The pieces of a request that go into its SigV4 canonical form.
///
/// Only `host`, `x-amz-content-sha256` and `x-amz-date` are signed and there
/// is never a query string.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalRequest<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub host: &'a str,
    pub payload_hash: &'a str,
    pub date: DateTime<Utc>,
}

impl<'a> CanonicalRequest<'a> {
    pub fn canonical_header(&self) -> String {
        format!(
            "host:{host}\n{content_key}:{payload}\n{date_key}:{date}\n",
            host = self.host,
            content_key = S3_CONTENT_KEY,
            payload = self.payload_hash,
            date_key = S3_DATE_KEY,
            date = amz_date(self.date),
        )
    }

    pub fn canonical_request(&self) -> String {
        // The empty line stands for the absent query string.
        format!(
            "{method}\n{path}\n\n{headers}\n{signed_headers}\n{payload}",
            method = self.method,
            path = self.path,
            headers = self.canonical_header(),
            signed_headers = S3_SIGNED_HEADERS,
            payload = self.payload_hash,
        )
    }

    pub fn canonical_hex(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_request());
        hex::encode(hasher.finalize())
    }
}

#[inline]
pub fn amz_date(date: DateTime<Utc>) -> String {
    date.format(S3_DATETIME_FORMAT).to_string()
}

#[inline]
pub fn date_stamp(date: DateTime<Utc>) -> String {
    date.format(S3_DATE_FORMAT).to_string()
}

#[inline]
pub fn scope(region: &str, date: DateTime<Utc>) -> String {
    format!(
        "{date}/{region}/{service}/{request_type}",
        date = date_stamp(date),
        region = region,
        service = S3_SERVICE,
        request_type = S3_REQUEST_TYPE,
    )
}

#[inline]
pub fn string_to_sign(canonical_hex: &str, region: &str, date: DateTime<Utc>) -> String {
    format!(
        "{algo}\n{date}\n{scope}\n{canonical_hex}",
        algo = S3_ALGO_VALUE,
        date = amz_date(date),
        scope = scope(region, date),
        canonical_hex = canonical_hex,
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    fn put_request() -> CanonicalRequest<'static> {
        CanonicalRequest {
            method: "PUT",
            path: "/test-bucket/test-object.txt",
            host: "test-host",
            payload_hash: "1a0bcb04c1e92babbb9b32ca479f5e78d7c4760c07a747a766c93201a2573e0a",
            date: fixed_time(),
        }
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(amz_date(fixed_time()), "20240102T030405Z");
        assert_eq!(date_stamp(fixed_time()), "20240102");
    }

    #[test]
    fn test_scope() {
        assert_eq!(
            scope("test-region", fixed_time()),
            "20240102/test-region/s3/aws4_request"
        );
    }

    #[test]
    fn test_canonical_request() {
        let expected = "PUT\n\
            /test-bucket/test-object.txt\n\
            \n\
            host:test-host\n\
            x-amz-content-sha256:1a0bcb04c1e92babbb9b32ca479f5e78d7c4760c07a747a766c93201a2573e0a\n\
            x-amz-date:20240102T030405Z\n\
            \n\
            host;x-amz-content-sha256;x-amz-date\n\
            1a0bcb04c1e92babbb9b32ca479f5e78d7c4760c07a747a766c93201a2573e0a";

        assert_eq!(put_request().canonical_request(), expected);
        assert_eq!(
            put_request().canonical_hex(),
            "57c32f9e2803c479708e9283e589269eaab43340c91344309ba22d10501ee8cd"
        );
    }

    #[test]
    fn test_string_to_sign() {
        let canonical_hex = put_request().canonical_hex();

        assert_eq!(
            string_to_sign(&canonical_hex, "test-region", fixed_time()),
            "AWS4-HMAC-SHA256\n\
             20240102T030405Z\n\
             20240102/test-region/s3/aws4_request\n\
             57c32f9e2803c479708e9283e589269eaab43340c91344309ba22d10501ee8cd"
        );
    }
}
