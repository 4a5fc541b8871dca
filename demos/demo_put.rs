use std::io::Cursor;
use std::time::Duration;

use simple_object_store::{Config, LogAdapter, Logger, ReqwestHttpSend, S3};

// Before run this demo, export S3_REGION, S3_SCHEME, S3_HOST, S3_BUCKET,
// S3_ACCESS_KEY and S3_SECRET_KEY (or S3_SECRET_KEY_FILE) for your store.
// RUST_LOG=debug shows the signing diagnostics.
const OBJECT: &str = "demo.txt";

fn main() {
    env_logger::init();
    let logger = LogAdapter;

    let config = match Config::from_env("S3") {
        Ok(config) => config,
        Err(err) => {
            logger.error("failed to load config", &err, &[]);
            std::process::exit(1);
        }
    };
    // The secret key prints as --redacted--.
    println!("{}", serde_json::to_string_pretty(&config).unwrap_or_default());

    let timeout = std::env::var("S3_TIMEOUT_SECS")
        .ok()
        .and_then(|secs| secs.parse().ok())
        .unwrap_or(30);
    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            logger.error("failed to build http client", &err, &[]);
            std::process::exit(1);
        }
    };

    let s3 = S3::with(config, ReqwestHttpSend::new(client), logger);

    if let Err(err) = s3.put(OBJECT, Cursor::new(b"imapc".to_vec())) {
        logger.error("upload failed", &err, &[("object", &OBJECT)]);
        std::process::exit(1);
    }
    println!("uploaded to {OBJECT}");
}
