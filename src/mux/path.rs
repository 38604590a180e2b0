//! Path and host normalization used by [`super::ServeMux`].

/// Canonical form of a request path: rooted, no empty, `.` or `..`
/// segments, trailing slash kept when the input had one.
pub fn clean_path(p: &str) -> String {
    if p.is_empty() {
        return "/".to_string();
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in p.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut cleaned = String::with_capacity(p.len() + 1);
    for segment in &segments {
        cleaned.push('/');
        cleaned.push_str(segment);
    }
    if cleaned.is_empty() || p.ends_with('/') {
        cleaned.push('/');
    }
    cleaned
}

/// The host without its port. Malformed values are returned unchanged.
pub fn strip_host_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return match rest.split_once("]:") {
            Some((addr, _port)) => addr,
            None => host,
        };
    }
    match host.split_once(':') {
        Some((name, port)) if !port.contains(':') => name,
        _ => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path(""), "/");
        assert_eq!(clean_path("/"), "/");
        assert_eq!(clean_path("/a/b"), "/a/b");
        assert_eq!(clean_path("/a/b/"), "/a/b/");
        assert_eq!(clean_path("//a///b"), "/a/b");
        assert_eq!(clean_path("/a/./b/"), "/a/b/");
        assert_eq!(clean_path("/a/../b"), "/b");
        assert_eq!(clean_path("/../.."), "/");
        assert_eq!(clean_path("/a/.."), "/");
        assert_eq!(clean_path("/a/../"), "/");
        assert_eq!(clean_path("a/b"), "/a/b");
    }

    #[test]
    fn test_strip_host_port() {
        assert_eq!(strip_host_port("example.com"), "example.com");
        assert_eq!(strip_host_port("example.com:8080"), "example.com");
        assert_eq!(strip_host_port("[::1]:8080"), "::1");
        assert_eq!(strip_host_port("[::1]"), "[::1]");
        assert_eq!(strip_host_port("a:b:c"), "a:b:c");
    }
}
