//! Call-control document (TwiML) generation.
//!
//! Documents are built fresh per request and are deterministic for a given
//! input. Every interpolated value is XML-escaped.

use crate::domain::Destination;
use crate::service::identity::CallerIdentity;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Pause after an announcement, in seconds.
const ANNOUNCEMENT_PAUSE_SECS: u32 = 1;

/// Reason given when refusing inbound calls.
pub const REJECT_REASON: &str = "rejected";

/// Whether `c` may appear in an XML 1.0 document at all.
const fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Escape text for use in XML element content or attribute values.
///
/// Characters XML 1.0 does not allow (C0 controls other than tab, LF and
/// CR, U+FFFE and U+FFFF) are dropped.
#[must_use]
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if is_xml_char(c) => escaped.push(c),
            _ => {}
        }
    }
    escaped
}

fn document(body: &str) -> String {
    format!("{XML_DECLARATION}<Response>{body}</Response>")
}

/// Announcement only, for a leg that is already connected to the
/// destination. Empty when the identity carries no announcement.
#[must_use]
pub fn announcement_document(identity: &CallerIdentity) -> String {
    match &identity.announcement {
        Some(announcement) => document(&format!(
            r#"<Say>{}</Say><Pause length="{ANNOUNCEMENT_PAUSE_SECS}"/>"#,
            escape_xml(announcement)
        )),
        None => document(""),
    }
}

/// Announce (optionally), then bridge to `destination` using the resolved
/// caller id.
#[must_use]
pub fn dial_document(
    identity: &CallerIdentity,
    destination: &Destination,
    timeout_secs: u32,
) -> String {
    let mut body = String::new();

    if let Some(announcement) = &identity.announcement {
        body.push_str(&format!("<Say>{}</Say>", escape_xml(announcement)));
        body.push_str(&format!(r#"<Pause length="{ANNOUNCEMENT_PAUSE_SECS}"/>"#));
    }

    body.push_str(&format!(
        r#"<Dial callerId="{}" answerOnBridge="true" timeout="{timeout_secs}"><Number>{}</Number></Dial>"#,
        escape_xml(&identity.caller_id),
        escape_xml(destination.as_str()),
    ));

    document(&body)
}

/// Refuse the call outright.
#[must_use]
pub fn reject_document() -> String {
    document(&format!(r#"<Reject reason="{REJECT_REASON}"/>"#))
}

/// Speak a message and end the call.
#[must_use]
pub fn say_document(message: &str) -> String {
    document(&format!("<Say>{}</Say>", escape_xml(message)))
}
