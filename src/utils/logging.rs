use serde::Serialize;

/// Pretty-printed JSON for `value`, or `None` when DEBUG is filtered out.
///
/// Lets callers skip serialization entirely on the hot path.
pub(crate) fn debug_json<T: Serialize>(value: &T) -> Option<String> {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return None;
    }

    Some(
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>")),
    )
}
