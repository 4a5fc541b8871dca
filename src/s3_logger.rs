use std::error::Error as StdError;
use std::fmt::{Debug, Write};

/// Structured key/value pairs attached to a log line.
pub type KeyValues<'a> = &'a [(&'a str, &'a dyn Debug)];

/// Logger receives the client's structured diagnostics.
///
/// The client never hands secret key material to a logger.
pub trait Logger: Debug + Send + Sync + 'static {
    fn info(&self, msg: &str, kv: KeyValues<'_>);
    fn debug(&self, msg: &str, kv: KeyValues<'_>);
    fn trace(&self, msg: &str, kv: KeyValues<'_>);
    fn error(&self, msg: &str, err: &dyn StdError, kv: KeyValues<'_>);
}

/// Forwards to the `log` facade, rendering pairs as `key=value`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAdapter;

impl LogAdapter {
    const TARGET: &'static str = "simple_object_store";
}

impl Logger for LogAdapter {
    fn info(&self, msg: &str, kv: KeyValues<'_>) {
        log::info!(target: Self::TARGET, "{}", render(msg, kv));
    }

    fn debug(&self, msg: &str, kv: KeyValues<'_>) {
        log::debug!(target: Self::TARGET, "{}", render(msg, kv));
    }

    fn trace(&self, msg: &str, kv: KeyValues<'_>) {
        log::trace!(target: Self::TARGET, "{}", render(msg, kv));
    }

    fn error(&self, msg: &str, err: &dyn StdError, kv: KeyValues<'_>) {
        let mut line = render(msg, kv);
        let _ = write!(line, " error={:?}", err.to_string());
        log::error!(target: Self::TARGET, "{line}");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn info(&self, _: &str, _: KeyValues<'_>) {}
    fn debug(&self, _: &str, _: KeyValues<'_>) {}
    fn trace(&self, _: &str, _: KeyValues<'_>) {}
    fn error(&self, _: &str, _: &dyn StdError, _: KeyValues<'_>) {}
}

/// `msg key=value key=value`, values in their Debug form.
pub fn render(msg: &str, kv: KeyValues<'_>) -> String {
    let mut line = String::from(msg);
    for (key, value) in kv {
        let _ = write!(line, " {key}={value:?}");
    }
    line
}
