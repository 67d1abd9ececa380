//! Client identifier extraction
//!
//! Rate limiting keys on the best available client identity. For IP-based
//! limiting that is the first proxy-supplied forwarding header we trust,
//! in order: `X-Forwarded-For` (first entry), `X-Real-IP`,
//! `CF-Connecting-IP`. The order reflects which headers the hosting edge
//! sets. When none is present the literal `"unknown"` is used, which lumps
//! all unidentified clients into one bucket.

/// Extract the client identifier from request headers.
///
/// `header` looks up a header value by lower-case name. Both the remote and
/// the fallback counter store key on the value returned here, so the same
/// client is limited consistently regardless of which backend serves the
/// check.
pub fn client_identifier<'a, F>(header: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    if let Some(forwarded) = header("x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            let ip = first.trim();
            if !ip.is_empty() {
                return ip.to_string();
            }
        }
    }

    if let Some(real_ip) = header("x-real-ip") {
        let ip = real_ip.trim();
        if !ip.is_empty() {
            return ip.to_string();
        }
    }

    if let Some(cf_ip) = header("cf-connecting-ip") {
        let ip = cf_ip.trim();
        if !ip.is_empty() {
            return ip.to_string();
        }
    }

    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'m>(map: &'m HashMap<&'m str, &'m str>) -> impl Fn(&str) -> Option<&'m str> + 'm {
        move |name| map.get(name).copied()
    }

    #[test]
    fn forwarded_for_takes_first_entry() {
        let headers = HashMap::from([
            ("x-forwarded-for", "203.0.113.7, 10.0.0.1, 172.16.0.2"),
            ("x-real-ip", "198.51.100.9"),
        ]);
        assert_eq!(client_identifier(lookup(&headers)), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_real_ip_then_cf() {
        let headers = HashMap::from([("x-real-ip", "198.51.100.9")]);
        assert_eq!(client_identifier(lookup(&headers)), "198.51.100.9");

        let headers = HashMap::from([("cf-connecting-ip", "192.0.2.4")]);
        assert_eq!(client_identifier(lookup(&headers)), "192.0.2.4");
    }

    #[test]
    fn empty_forwarded_entry_is_skipped() {
        let headers = HashMap::from([
            ("x-forwarded-for", "  "),
            ("x-real-ip", "198.51.100.9"),
        ]);
        assert_eq!(client_identifier(lookup(&headers)), "198.51.100.9");
    }

    #[test]
    fn no_headers_yields_unknown() {
        let headers = HashMap::new();
        assert_eq!(client_identifier(lookup(&headers)), "unknown");
    }
}
