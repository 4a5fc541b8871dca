//! Get and put objects on S3-compatible stores with SigV4 signed requests.
//!
//! ```no_run
//! use std::io::{Cursor, Read};
//!
//! use simple_object_store::{Config, S3};
//!
//! let config = Config::from_env("S3")?;
//! let s3 = S3::new(config);
//!
//! s3.put("hello.txt", Cursor::new(b"hello world".to_vec()))?;
//!
//! let mut content = String::new();
//! s3.get("hello.txt")?.read_to_string(&mut content)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[macro_use]
extern crate serde;

pub mod error;
pub mod s3;
pub mod s3_config;
pub mod s3_constant;
pub mod s3_http;
pub mod s3_logger;
pub mod s3_payload;
pub mod s3_signer;
pub mod s3_string_to_sign;

pub use error::*;
pub use s3::*;
pub use s3_config::*;
pub use s3_constant::*;
pub use s3_http::*;
pub use s3_logger::*;
pub use s3_payload::*;
pub use s3_signer::*;
pub use s3_string_to_sign::*;
