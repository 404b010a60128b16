//! Port reconciliation for check targets.
//!
//! The caller supplies a base URL and the port it wants checked. The two are
//! merged into one URL whose authority carries the desired port, written out
//! only when it is not the scheme's standard port.

use url::Url;

use super::{Scheme, TargetError};

/// Build the URL a check is sent to.
///
/// Three cases, decided on the raw authority:
/// - no `:` in the host: append the port unless it is standard;
/// - `host:port`: swap in the desired port when it differs, and drop a
///   standard port entirely;
/// - a `:` that does not split as host:port (bare IPv6 literal): append the
///   port when it is non-standard.
pub fn reconcile_target_url(base: &str, port: u16) -> Result<String, TargetError> {
    let base = base.trim();
    let parsed = Url::parse(base)?;
    let scheme = Scheme::from_name(parsed.scheme())?;
    let raw = RawUrl::split(base).ok_or(TargetError::MissingHost)?;

    let host = reconcile_host(scheme, raw.host, port);

    let mut target = String::with_capacity(base.len() + 6);
    target.push_str(scheme.as_str());
    target.push_str("://");
    if let Some(userinfo) = raw.userinfo {
        target.push_str(userinfo);
        target.push('@');
    }
    target.push_str(&host);
    target.push_str(raw.tail);
    Ok(target)
}

fn reconcile_host(scheme: Scheme, host: &str, port: u16) -> String {
    if !host.contains(':') {
        if scheme.is_standard_port(port) {
            return host.to_string();
        }
        return join_host_port(host, port);
    }

    match split_host_port(host) {
        Some((name, existing)) => {
            // An unparsable port never equals a valid desired port.
            let existing = existing.parse::<u16>().ok();
            if scheme.is_standard_port(port) {
                bare_host(name)
            } else if existing != Some(port) {
                join_host_port(name, port)
            } else {
                host.to_string()
            }
        }
        None => {
            if scheme.is_standard_port(port) {
                host.to_string()
            } else {
                format!("{}:{}", host, port)
            }
        }
    }
}

/// Split `host:port` or `[v6]:port`. `None` when there is no port to split off.
fn split_host_port(hostport: &str) -> Option<(&str, &str)> {
    if let Some(rest) = hostport.strip_prefix('[') {
        let end = rest.find(']')?;
        let port = rest[end + 1..].strip_prefix(':')?;
        return Some((&rest[..end], port));
    }

    let (host, port) = hostport.rsplit_once(':')?;
    if host.contains(':') {
        return None;
    }
    Some((host, port))
}

fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

fn bare_host(host: &str) -> String {
    if host.contains(':') {
        format!("[{}]", host)
    } else {
        host.to_string()
    }
}

/// Borrowed view of `scheme://[userinfo@]host[:port]tail`.
struct RawUrl<'a> {
    userinfo: Option<&'a str>,
    host: &'a str,
    tail: &'a str,
}

impl<'a> RawUrl<'a> {
    fn split(input: &'a str) -> Option<Self> {
        let (_, rest) = input.split_once("://")?;
        let end = rest
            .find(|c: char| matches!(c, '/' | '\\' | '?' | '#'))
            .unwrap_or(rest.len());
        let (authority, tail) = rest.split_at(end);

        let (userinfo, host) = match authority.rsplit_once('@') {
            Some((userinfo, host)) => (Some(userinfo), host),
            None => (None, authority),
        };
        if host.is_empty() {
            return None;
        }

        Some(Self {
            userinfo,
            host,
            tail,
        })
    }
}
