//! Tab/URL tracker — the extension's background process.
//!
//! Holds one piece of state: the URL of the active tab, overwritten on every
//! navigation or activation event (last-write-wins, no ordering conflicts —
//! there is only ever one active tab). The popup asks for it with
//! `{"action": "getCurrentURL"}` and gets `{"url": "..."}` back, an empty
//! string when nothing has been recorded yet.
//!
//! `phishguard tracker` serves this protocol as line-delimited JSON over
//! stdin/stdout, native-messaging style: one object per line in, one reply
//! line out for queries, nothing for events. Malformed or unsupported lines
//! get an `{"error": ...}` reply and the loop keeps serving; EOF ends it
//! cleanly.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Protocol types
// ---------------------------------------------------------------------------

/// Incoming tracker message, tolerant of both shapes the protocol carries:
/// queries (`action`) and tab events (`event` + `url`).
#[derive(Debug, Deserialize)]
pub struct TrackerRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl TrackerRequest {
    pub fn is_get_current_url(&self) -> bool {
        self.action.as_deref() == Some("getCurrentURL")
    }

    /// A tab event carrying a URL: page finished loading in the active tab
    /// (`navigation`) or the user switched tabs (`activation`).
    pub fn is_update(&self) -> bool {
        matches!(self.event.as_deref(), Some("navigation" | "activation"))
            && self.url.is_some()
    }
}

/// Reply to `getCurrentURL` — the only query the popup sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlResponse {
    pub url: String,
}

/// Reply for lines the tracker cannot act on.
#[derive(Debug, Serialize)]
pub struct ErrorReply {
    pub error: String,
}

/// One reply line, serialized as its inner shape.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Url(UrlResponse),
    Error(ErrorReply),
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Last-seen active-tab URL.
#[derive(Debug, Default)]
pub struct TabTracker {
    current_url: String,
}

impl TabTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a navigation/activation, overwriting whatever was there.
    pub fn record(&mut self, url: &str) {
        self.current_url = url.to_string();
    }

    /// Current URL, empty before the first event.
    pub fn current_url(&self) -> &str {
        &self.current_url
    }
}

/// Apply one protocol message to the tracker.
///
/// Queries answer with the current URL, events answer with nothing, and
/// anything else answers with an error so a misbehaving peer notices.
pub fn handle_message(tracker: &mut TabTracker, raw: &str) -> Option<Reply> {
    let request: TrackerRequest = match serde_json::from_str(raw) {
        Ok(request) => request,
        Err(err) => {
            return Some(Reply::Error(ErrorReply {
                error: format!("invalid tracker message: {err}"),
            }));
        }
    };

    if request.is_get_current_url() {
        return Some(Reply::Url(UrlResponse {
            url: tracker.current_url().to_string(),
        }));
    }

    if request.is_update() {
        if let Some(url) = &request.url {
            tracker.record(url);
        }
        return None;
    }

    Some(Reply::Error(ErrorReply {
        error: "unsupported tracker message".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Stdio loop
// ---------------------------------------------------------------------------

/// Serve the tracker protocol on stdin/stdout until EOF.
pub fn run() -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut tracker = TabTracker::new();

    for line in stdin.lock().lines() {
        let line = line.context("failed reading tracker message from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        if let Some(reply) = handle_message(&mut tracker, &line) {
            let json =
                serde_json::to_string(&reply).context("failed to serialize tracker reply")?;
            writeln!(stdout, "{json}").context("failed writing tracker reply to stdout")?;
            stdout.flush().context("failed flushing tracker reply")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_json(tracker: &mut TabTracker, raw: &str) -> Option<String> {
        handle_message(tracker, raw).map(|reply| serde_json::to_string(&reply).unwrap())
    }

    #[test]
    fn query_before_any_event_answers_empty_url() {
        let mut tracker = TabTracker::new();
        let json = reply_json(&mut tracker, r#"{"action":"getCurrentURL"}"#).unwrap();
        assert_eq!(json, r#"{"url":""}"#);
    }

    #[test]
    fn navigation_event_records_the_url() {
        let mut tracker = TabTracker::new();
        let none = reply_json(
            &mut tracker,
            r#"{"event":"navigation","url":"https://example.com"}"#,
        );
        assert!(none.is_none(), "events must not produce a reply");

        let json = reply_json(&mut tracker, r#"{"action":"getCurrentURL"}"#).unwrap();
        assert_eq!(json, r#"{"url":"https://example.com"}"#);
    }

    #[test]
    fn activation_event_also_records() {
        let mut tracker = TabTracker::new();
        reply_json(
            &mut tracker,
            r#"{"event":"activation","url":"https://docs.rs"}"#,
        );
        assert_eq!(tracker.current_url(), "https://docs.rs");
    }

    #[test]
    fn updates_are_last_write_wins() {
        let mut tracker = TabTracker::new();
        reply_json(&mut tracker, r#"{"event":"navigation","url":"https://a.example"}"#);
        reply_json(&mut tracker, r#"{"event":"activation","url":"https://b.example"}"#);
        reply_json(&mut tracker, r#"{"event":"navigation","url":"https://c.example"}"#);
        assert_eq!(tracker.current_url(), "https://c.example");
    }

    #[test]
    fn malformed_line_answers_an_error() {
        let mut tracker = TabTracker::new();
        let json = reply_json(&mut tracker, "not json at all").unwrap();
        assert!(json.contains("\"error\""), "got: {json}");
    }

    #[test]
    fn unknown_action_answers_an_error() {
        let mut tracker = TabTracker::new();
        let json = reply_json(&mut tracker, r#"{"action":"selfDestruct"}"#).unwrap();
        assert!(json.contains("unsupported tracker message"), "got: {json}");
    }

    #[test]
    fn event_without_url_answers_an_error() {
        let mut tracker = TabTracker::new();
        let json = reply_json(&mut tracker, r#"{"event":"navigation"}"#).unwrap();
        assert!(json.contains("\"error\""), "got: {json}");
        assert_eq!(tracker.current_url(), "");
    }

    #[test]
    fn url_response_round_trips() {
        let parsed: UrlResponse =
            serde_json::from_str(r#"{"url":"https://example.com"}"#).unwrap();
        assert_eq!(parsed.url, "https://example.com");
    }
}
