//! DogStatsD wire protocol.
//!
//! Encodes metrics and events into the plain-text datagram format the
//! agent expects. The format must be reproduced exactly for agent
//! compatibility:
//!
//! ```text
//! <namespace><name>:<value>|<type>[|@<rate>][|#<tag>,<tag>...]
//! _e{<title_len>,<text_len>}:<title>|<text>[|#<tag>,<tag>...]
//! ```

use std::fmt;

/// A metric value with its DogStatsD type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// A count delta (`c`). Can be incremented or decremented.
    Count(i64),
    /// A gauge (`g`). Stays at the given value until changed.
    Gauge(f64),
}

impl MetricValue {
    /// Returns the DogStatsD type suffix.
    pub fn type_suffix(&self) -> &'static str {
        match self {
            MetricValue::Count(_) => "c",
            MetricValue::Gauge(_) => "g",
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(v) => write!(f, "{}", v),
            MetricValue::Gauge(v) => write!(f, "{}", v),
        }
    }
}

/// Encodes a metric datagram.
///
/// `constant_tags` (the client's identifying tags) come first, followed by
/// per-call tags. The sample rate is only written when below 1.0, so the
/// agent scales counts back up.
pub fn encode_metric(
    namespace: &str,
    name: &str,
    value: MetricValue,
    sample_rate: f64,
    constant_tags: &[String],
    tags: &[String],
) -> String {
    let mut datagram = String::with_capacity(64);
    datagram.push_str(namespace);
    datagram.push_str(name);
    datagram.push(':');
    datagram.push_str(&value.to_string());
    datagram.push('|');
    datagram.push_str(value.type_suffix());

    if sample_rate < 1.0 {
        datagram.push_str("|@");
        datagram.push_str(&sample_rate.to_string());
    }

    encode_tags(&mut datagram, constant_tags, tags);
    datagram
}

/// Encodes an event datagram.
///
/// Newlines in the text are escaped as `\\n`; the advertised lengths are
/// byte lengths, the text's measured after escaping. Events are not
/// namespaced.
pub fn encode_event(title: &str, text: &str, constant_tags: &[String]) -> String {
    let text = text.replace('\n', "\\n");

    let mut datagram = String::with_capacity(32 + title.len() + text.len());
    datagram.push_str("_e{");
    datagram.push_str(&title.len().to_string());
    datagram.push(',');
    datagram.push_str(&text.len().to_string());
    datagram.push_str("}:");
    datagram.push_str(title);
    datagram.push('|');
    datagram.push_str(&text);

    encode_tags(&mut datagram, constant_tags, &[]);
    datagram
}

fn encode_tags(datagram: &mut String, constant_tags: &[String], tags: &[String]) {
    if constant_tags.is_empty() && tags.is_empty() {
        return;
    }
    datagram.push_str("|#");
    for (i, tag) in constant_tags.iter().chain(tags.iter()).enumerate() {
        if i > 0 {
            datagram.push(',');
        }
        datagram.push_str(tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_count_encoding() {
        let datagram = encode_metric("", "requests", MetricValue::Count(1), 1.0, &[], &[]);
        assert_eq!(datagram, "requests:1|c");
    }

    #[test]
    fn test_count_with_namespace_and_tags() {
        let datagram = encode_metric(
            "hello.",
            "requests",
            MetricValue::Count(-1),
            1.0,
            &tags(&["monitor-id:abc", "app:hello"]),
            &tags(&["route:index"]),
        );
        assert_eq!(
            datagram,
            "hello.requests:-1|c|#monitor-id:abc,app:hello,route:index"
        );
    }

    #[test]
    fn test_gauge_encoding() {
        let datagram = encode_metric("", "queue.depth", MetricValue::Gauge(42.0), 1.0, &[], &[]);
        assert_eq!(datagram, "queue.depth:42|g");

        let datagram = encode_metric("", "load", MetricValue::Gauge(0.75), 1.0, &[], &[]);
        assert_eq!(datagram, "load:0.75|g");
    }

    #[test]
    fn test_sample_rate_written_only_below_one() {
        let datagram = encode_metric("", "hits", MetricValue::Count(1), 0.5, &[], &[]);
        assert_eq!(datagram, "hits:1|c|@0.5");

        let datagram = encode_metric("", "hits", MetricValue::Count(1), 1.0, &[], &[]);
        assert_eq!(datagram, "hits:1|c");
    }

    #[test]
    fn test_sample_rate_precedes_tags() {
        let datagram = encode_metric(
            "",
            "hits",
            MetricValue::Count(1),
            0.25,
            &tags(&["monitor-id:abc"]),
            &[],
        );
        assert_eq!(datagram, "hits:1|c|@0.25|#monitor-id:abc");
    }

    #[test]
    fn test_event_encoding() {
        let datagram = encode_event("deploy", "version 1.2 live", &[]);
        assert_eq!(datagram, "_e{6,16}:deploy|version 1.2 live");
    }

    #[test]
    fn test_event_with_tags() {
        let datagram = encode_event("deploy", "done", &tags(&["monitor-id:abc", "app:hello"]));
        assert_eq!(datagram, "_e{6,4}:deploy|done|#monitor-id:abc,app:hello");
    }

    #[test]
    fn test_event_escapes_newlines_and_counts_escaped_bytes() {
        let datagram = encode_event("deploy", "line1\nline2", &[]);
        // "line1\\nline2" is 12 bytes after escaping.
        assert_eq!(datagram, "_e{6,12}:deploy|line1\\nline2");
    }
}
