//! Fixed vocabulary and lookup tables used by the scoring stages.
//!
//! Everything here is read-only and ordered: several tables are walked in
//! declaration order, and that order shows up in reports.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Domain terms counted toward technical density.
///
/// Matched by substring, so multi-word entries ("load balancer") work and
/// short entries ("api", "rest") also fire inside longer words.
pub const TECHNICAL_TERMS: &[&str] = &[
    "oauth",
    "jwt",
    "cors",
    "hateoas",
    "crud",
    "rest",
    "api",
    "http",
    "json",
    "microservice",
    "endpoint",
    "middleware",
    "authentication",
    "authorization",
    "pagination",
    "idempotent",
    "webhook",
    "async",
    "reactive",
    "streaming",
    "schema",
    "openapi",
    "rfc",
    "ssl",
    "tls",
    "cdn",
    "load balancer",
    "circuit breaker",
    "retry",
    "backoff",
    "timeout",
    "cache",
    "redis",
    "database",
    "transaction",
    "acid",
    "nosql",
    "sql",
    "index",
    "query",
];

/// Terms whose presence marks an intermediate document as needing API experience.
pub const ADVANCED_CONCEPTS: &[&str] = &["hateoas", "oauth", "jwt", "circuit breaker", "reactive"];

/// Technical term to topic mapping for the info box, in display priority order.
///
/// Only terms found by the density scan count, so `testing` and `monitoring`,
/// which are not in [`TECHNICAL_TERMS`], never produce a topic.
pub const TOPIC_KEYWORDS: &[(&str, &str)] = &[
    ("oauth", "Authentication"),
    ("jwt", "Authentication"),
    ("cors", "Security"),
    ("hateoas", "REST"),
    ("pagination", "Data"),
    ("reactive", "Architecture"),
    ("streaming", "Architecture"),
    ("microservice", "Architecture"),
    ("openapi", "Documentation"),
    ("testing", "Quality"),
    ("monitoring", "Observability"),
];

/// Topic shown when no keyword matched.
pub const DEFAULT_TOPIC: &str = "API Design";

/// Code-block languages that do not count as complex code.
pub static SIMPLE_CODE_LANGUAGES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["json", "yaml", "yml", "http"].into_iter().collect());

/// Code-block languages read at the faster data-format speed.
pub static DATA_CODE_LANGUAGES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["json", "yaml", "yml"].into_iter().collect());
