//! Structured error type shared across HLP crates.
//!
//! Failures are classified by family (the taxonomy callers dispatch on, e.g.
//! for exit codes) rather than by a distinct type per failure site. A single
//! error struct carries the family, a stable machine-readable code, a human
//! readable message, and ordered context pairs, so every crate attaches
//! diagnostics the same way instead of growing its own context plumbing.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use thiserror::Error;

/// Failure families of the propagation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Hypergraph structural precondition violations (bad vertex id, empty
    /// edge, frozen graph).
    Graph,
    /// Rejected options or generator parameters.
    Config,
    /// Filesystem failures while reading or writing hypergraph files.
    Io,
    /// Malformed hypergraph files (bad magic/version, JSON errors,
    /// truncation).
    Format,
    /// Backend execution failures (thread pool construction, kernel launch).
    Kernel,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Graph => "graph",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
            ErrorKind::Format => "format",
            ErrorKind::Kernel => "kernel",
        })
    }
}

/// Canonical error type for the HLP engine.
///
/// Context entries render in the order they were attached, outermost caller
/// last, so a diagnostic reads from the failure site outwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{kind} error [{code}]: {message}{}", details(.context, .hint))]
pub struct HlpError {
    kind: ErrorKind,
    code: String,
    message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    context: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl HlpError {
    fn new(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            context: Vec::new(),
            hint: None,
        }
    }

    /// Creates a [`ErrorKind::Graph`] error.
    pub fn graph(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Graph, code, message)
    }

    /// Creates a [`ErrorKind::Config`] error.
    pub fn config(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, code, message)
    }

    /// Creates a [`ErrorKind::Io`] error.
    pub fn io(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, code, message)
    }

    /// Creates a [`ErrorKind::Format`] error.
    pub fn format(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format, code, message)
    }

    /// Creates a [`ErrorKind::Kernel`] error.
    pub fn kernel(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Kernel, code, message)
    }

    /// Appends a context pair; works on every family, so callers can add
    /// detail (paths, sizes, identifiers) while propagating.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.push((key.into(), value.to_string()));
        self
    }

    /// Sets a human readable remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Returns the failure family.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the stable machine readable code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the human readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Looks up a context value by key (first match wins).
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the remediation hint, if one was set.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

fn details(context: &[(String, String)], hint: &Option<String>) -> String {
    let mut out = String::new();
    for (key, value) in context {
        out.push_str(if out.is_empty() { " | " } else { ", " });
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    if let Some(hint) = hint {
        out.push_str(" | hint: ");
        out.push_str(hint);
    }
    out
}
