//! Call-site resolution for error-severity log records.
//!
//! Walks the current call stack outward from the formatter's entry point
//! and reports the first frame that belongs neither to the formatter
//! machinery nor to any configured skip prefix. Matching is by module-path
//! prefix, never by frame-count offsets.

use serde::Serialize;

/// Resolved call site of a log statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLocation {
    /// Source file of the call site.
    pub file: String,
    /// Line number of the call site.
    pub line: u32,
    /// Fully qualified name of the enclosing function, hash suffix
    /// stripped.
    pub function: String,
}

/// Frames that are never reported: the formatter itself, the backtrace
/// machinery, and runtime/stdlib plumbing.
const INTERNAL_FRAGMENTS: &[&str] = &[
    "stackdriver::caller::resolve_caller",
    "stackdriver::StackdriverFormatter",
];

const INTERNAL_PREFIXES: &[&str] = &["backtrace::", "std::", "core::", "alloc::", "test::"];

pub(crate) fn resolve_caller(skip_prefixes: &[String]) -> Option<ReportLocation> {
    let backtrace = backtrace::Backtrace::new();

    for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            let name = match symbol.name() {
                Some(name) => name.to_string(),
                None => continue,
            };
            let function = normalize(strip_hash_suffix(&name));

            if is_internal(function) {
                continue;
            }
            if skip_prefixes.iter().any(|p| function.starts_with(p.as_str())) {
                continue;
            }

            // A frame without source info cannot be reported; keep walking
            // rather than emit a partial location.
            let (file, line) = match (symbol.filename(), symbol.lineno()) {
                (Some(file), Some(line)) => (file.display().to_string(), line),
                _ => continue,
            };

            return Some(ReportLocation {
                file,
                line,
                function: function.to_string(),
            });
        }
    }

    None
}

fn is_internal(function: &str) -> bool {
    INTERNAL_PREFIXES.iter().any(|p| function.starts_with(p))
        || INTERNAL_FRAGMENTS.iter().any(|f| function.contains(f))
}

/// The v0 mangling scheme demangles inherent methods as
/// `<path::Type>::method`; trim the angle bracket so prefix matching sees
/// the plain module path.
fn normalize(function: &str) -> &str {
    function.strip_prefix('<').unwrap_or(function)
}

/// Strips the trailing `::h<16 hex>` disambiguator rustc appends to
/// symbol names.
fn strip_hash_suffix(name: &str) -> &str {
    if let Some(pos) = name.rfind("::h") {
        let hash = &name[pos + 3..];
        if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            return &name[..pos];
        }
    }
    name
}
