use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One server API operation, in its wire form.
///
/// Serializes to the `{"method": ..., "params": {...}}` envelope the
/// server expects; field declaration order fixes the key order of
/// `params`, so the serialized string is canonical and stable for
/// signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "lowercase")]
pub enum ApiCommand {
    Publish {
        channel: String,
        data: Value,
        // Omitted from the wire entirely when absent, never sent empty.
        #[serde(skip_serializing_if = "Option::is_none")]
        client: Option<String>,
    },
    Unsubscribe {
        channel: String,
        user: String,
    },
    Disconnect {
        user: String,
    },
    Presence {
        channel: String,
    },
    History {
        channel: String,
    },
    // Empty struct variants so `params` serializes as `{}` rather than
    // disappearing from the envelope.
    Channels {},
    Stats {},
}

impl ApiCommand {
    pub fn method(&self) -> &'static str {
        match self {
            Self::Publish { .. } => "publish",
            Self::Unsubscribe { .. } => "unsubscribe",
            Self::Disconnect { .. } => "disconnect",
            Self::Presence { .. } => "presence",
            Self::History { .. } => "history",
            Self::Channels {} => "channels",
            Self::Stats {} => "stats",
        }
    }
}

/// The first element of the server's response array.
///
/// Application-level failures live in `error` as data; the client never
/// interprets their contents. `body` carries the operation-specific
/// payload. Unknown keys are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResult {
    /// Whether the server reported no application-level error. The
    /// server sends an empty string or `null` on success.
    pub fn is_ok(&self) -> bool {
        match &self.error {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }

    /// The error, when the server reported one.
    pub fn error(&self) -> Option<&Value> {
        if self.is_ok() {
            None
        } else {
            self.error.as_ref()
        }
    }
}
