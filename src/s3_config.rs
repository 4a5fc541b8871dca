use std::{env, fmt, fs};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A secret string that never renders its contents.
///
/// Debug, Display and Serialize all print `--redacted--` (or `--unset--` when
/// empty). Use [`Redact::expose`] where the live value is required.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Redact(String);

impl Redact {
    #[inline]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    #[inline]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn masked(&self) -> &'static str {
        if self.0.is_empty() {
            "--unset--"
        } else {
            "--redacted--"
        }
    }
}

impl From<&str> for Redact {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for Redact {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl fmt::Debug for Redact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.masked())
    }
}

impl fmt::Display for Redact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.masked())
    }
}

impl Serialize for Redact {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.masked())
    }
}

impl<'de> Deserialize<'de> for Redact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self)
    }
}

/// Client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider region, part of the credential scope.
    pub region: String,
    /// `http` or `https`.
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Endpoint hostname, with port if not the default one.
    pub host: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: Redact,
}

fn default_scheme() -> String {
    "https".to_string()
}

impl Config {
    /// Loads `<PREFIX>_REGION`, `<PREFIX>_SCHEME`, `<PREFIX>_HOST`,
    /// `<PREFIX>_BUCKET`, `<PREFIX>_ACCESS_KEY` and `<PREFIX>_SECRET_KEY`.
    ///
    /// Without `<PREFIX>_SECRET_KEY`, the trimmed contents of the file named
    /// by `<PREFIX>_SECRET_KEY_FILE` are used. `SCHEME` defaults to `https`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let var = |name: &str| env::var(format!("{prefix}_{name}")).ok().filter(|v| !v.is_empty());
        let required = |name: &str| {
            var(name).ok_or_else(|| Error::Config(format!("{prefix}_{name} is required")))
        };

        let secret_key = match var("SECRET_KEY") {
            Some(secret) => secret,
            None => {
                let path = var("SECRET_KEY_FILE").ok_or_else(|| {
                    Error::Config(format!(
                        "{prefix}_SECRET_KEY or {prefix}_SECRET_KEY_FILE is required"
                    ))
                })?;
                fs::read_to_string(&path)
                    .map_err(|e| Error::Config(format!("failed to read secret key file {path:?}: {e}")))?
                    .trim()
                    .to_string()
            }
        };

        Ok(Self {
            region: required("REGION")?,
            scheme: var("SCHEME").unwrap_or_else(default_scheme),
            host: required("HOST")?,
            bucket: required("BUCKET")?,
            access_key: required("ACCESS_KEY")?,
            secret_key: secret_key.into(),
        })
    }
}
