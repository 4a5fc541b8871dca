pub const S3_ALGO_VALUE: &str = "AWS4-HMAC-SHA256";
pub const S3_SERVICE: &str = "s3";
pub const S3_REQUEST_TYPE: &str = "aws4_request";

pub const S3_DATE_KEY: &str = "x-amz-date";
pub const S3_CONTENT_KEY: &str = "x-amz-content-sha256";
pub const S3_SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";

pub const S3_DATE_FORMAT: &str = "%Y%m%d";
pub const S3_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Hex SHA-256 of zero bytes.
pub const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Upper bound on how much of a failed response body is read for diagnostics.
pub const ERROR_BODY_LIMIT: u64 = 4096;
