//! HTTP span helpers.

use uuid::Uuid;

/// Path segments followed by a free-form identifier rather than a uuid.
const SLUG_PARENTS: [&str; 1] = ["products"];

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    /// Low-cardinality route used for span names and metric labels.
    pub(super) route: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = normalise_route(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
    }
}

fn normalise_route(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");
    let mut previous: Option<&str> = None;

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else if previous.is_some_and(|parent| SLUG_PARENTS.contains(&parent)) {
            normalised.push_str("{slug}");
        } else {
            normalised.push_str(segment);
        }

        previous = Some(segment);
    }

    normalised
}
