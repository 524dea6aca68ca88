//! Format validator boundary
//!
//! The engine treats format checks (email, URL, UUID, IP, …) as external
//! collaborators: stateless pure functions with the shape
//! `(field, value) -> Result<(), ValidationError>`, registered once at
//! startup through the public extension point. The engine never learns
//! their internals.
//!
//! [`register_formats`] installs the whole set as custom rules:
//!
//! ```rust,ignore
//! let mut validator = Validator::new();
//! assay::formats::register_formats(&mut validator);
//! // `#[validate("required,email")]` now resolves.
//! ```
//!
//! The `network` and `temporal` cargo features gate the address and
//! date/time families.

use std::sync::LazyLock;

use regex::Regex;

use crate::engine::Validator;
use crate::foundation::ValidationError;
use crate::schema::FieldView;

// ============================================================================
// REGISTRATION
// ============================================================================

/// Registers every available format rule on a validator.
pub fn register_formats(validator: &mut Validator) {
    register_string_rule(validator, "email", email);
    register_string_rule(validator, "url", url);
    register_string_rule(validator, "base64", base64);
    register_string_rule(validator, "json", json);

    #[cfg(feature = "network")]
    {
        register_string_rule(validator, "ip", ip);
        register_string_rule(validator, "ipv4", ipv4);
        register_string_rule(validator, "ipv6", ipv6);
        register_string_rule(validator, "hostname", hostname);
    }

    #[cfg(feature = "temporal")]
    {
        register_string_rule(validator, "uuid", uuid);
        register_string_rule(validator, "datetime", datetime);
        register_string_rule(validator, "date", date);
        register_string_rule(validator, "time", time);
    }
}

/// Adapts a pure `(field, &str)` function to the custom-rule contract.
fn register_string_rule(
    validator: &mut Validator,
    name: &'static str,
    check: fn(&str, &str) -> Result<(), ValidationError>,
) {
    validator.register_rule(name, move |ctx| match ctx.value() {
        FieldView::Str(s) => check(ctx.field_name(), s),
        other => Err(ValidationError::new(
            "type",
            format!("rule `{name}` expects a string, got {}", other.kind()),
        )),
    });
}

// ============================================================================
// STRING FORMATS
// ============================================================================

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex is valid")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s]*$").expect("url regex is valid")
});

/// Validates an email address.
pub fn email(_field: &str, value: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::invalid_format("email address"))
    }
}

/// Validates a URL (any scheme).
pub fn url(_field: &str, value: &str) -> Result<(), ValidationError> {
    if URL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::invalid_format("URL"))
    }
}

/// Validates standard base64 content.
pub fn base64(_field: &str, value: &str) -> Result<(), ValidationError> {
    use base64::Engine as _;
    base64::engine::general_purpose::STANDARD
        .decode(value)
        .map(|_| ())
        .map_err(|_| ValidationError::invalid_format("base64 string"))
}

/// Validates that the value parses as JSON.
pub fn json(_field: &str, value: &str) -> Result<(), ValidationError> {
    serde_json::from_str::<serde_json::Value>(value)
        .map(|_| ())
        .map_err(|_| ValidationError::invalid_format("JSON document"))
}

// ============================================================================
// NETWORK FORMATS
// ============================================================================

/// Validates an IPv4 or IPv6 address.
#[cfg(feature = "network")]
pub fn ip(_field: &str, value: &str) -> Result<(), ValidationError> {
    value
        .parse::<std::net::IpAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::invalid_format("IP address"))
}

/// Validates an IPv4 address.
#[cfg(feature = "network")]
pub fn ipv4(_field: &str, value: &str) -> Result<(), ValidationError> {
    value
        .parse::<std::net::Ipv4Addr>()
        .map(|_| ())
        .map_err(|_| ValidationError::invalid_format("IPv4 address"))
}

/// Validates an IPv6 address.
#[cfg(feature = "network")]
pub fn ipv6(_field: &str, value: &str) -> Result<(), ValidationError> {
    value
        .parse::<std::net::Ipv6Addr>()
        .map(|_| ())
        .map_err(|_| ValidationError::invalid_format("IPv6 address"))
}

/// Validates an RFC 1123 hostname.
#[cfg(feature = "network")]
pub fn hostname(_field: &str, value: &str) -> Result<(), ValidationError> {
    let valid = !value.is_empty()
        && value.len() <= 253
        && value.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    if valid {
        Ok(())
    } else {
        Err(ValidationError::invalid_format("hostname"))
    }
}

// ============================================================================
// TEMPORAL FORMATS
// ============================================================================

/// Validates an RFC 4122 UUID.
#[cfg(feature = "temporal")]
pub fn uuid(_field: &str, value: &str) -> Result<(), ValidationError> {
    // `Uuid::parse_str` also accepts non-hyphenated forms; the rule means
    // the canonical 8-4-4-4-12 layout.
    let canonical = value.len() == 36
        && value
            .char_indices()
            .all(|(i, c)| match i {
                8 | 13 | 18 | 23 => c == '-',
                _ => c.is_ascii_hexdigit(),
            });
    if canonical && ::uuid::Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::invalid_format("UUID"))
    }
}

/// Validates an ISO 8601 date-time like `2023-12-25T14:30:00`.
#[cfg(feature = "temporal")]
pub fn datetime(_field: &str, value: &str) -> Result<(), ValidationError> {
    let ok = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .is_ok()
        || chrono::DateTime::parse_from_rfc3339(value).is_ok();
    if ok {
        Ok(())
    } else {
        Err(ValidationError::invalid_format("date-time"))
    }
}

/// Validates an ISO 8601 date like `2023-12-25`.
#[cfg(feature = "temporal")]
pub fn date(_field: &str, value: &str) -> Result<(), ValidationError> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::invalid_format("date"))
}

/// Validates a time of day like `14:30:00` or `14:30`.
#[cfg(feature = "temporal")]
pub fn time(_field: &str, value: &str) -> Result<(), ValidationError> {
    chrono::NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| chrono::NaiveTime::parse_from_str(value, "%H:%M"))
        .map(|_| ())
        .map_err(|_| ValidationError::invalid_format("time"))
}

// ============================================================================
// TESTS
// ============================================================================
