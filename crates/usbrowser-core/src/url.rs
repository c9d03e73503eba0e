/// Read-only view of the URL handed to the launcher
///
/// Built once per invocation. Matching only ever looks at these four
/// components, never at the raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    scheme: String,
    host: String,
    authority: String,
    path: String,
}

impl ParsedUrl {
    /// Split an input URL into the components rules look at
    ///
    /// Components are kept as written. The scheme and hostname are
    /// lowercased and an empty path becomes `/`; nothing is percent-encoded,
    /// punycoded or resolved. Inputs without a scheme (`example.com/page`)
    /// produce an empty scheme and host, with the whole input treated as the
    /// path.
    pub fn parse(input: &str) -> Self {
        let cleaned: String = input
            .trim_start_matches(|c: char| c <= ' ')
            .chars()
            .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
            .collect();

        let (scheme, rest) = split_scheme(&cleaned);
        let (authority, rest) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find(['/', '?', '#']).unwrap_or(after.len());
                after.split_at(end)
            }
            None => ("", rest),
        };
        let end = rest.find(['?', '#']).unwrap_or(rest.len());

        Self {
            scheme: scheme.to_ascii_lowercase(),
            host: hostname(authority),
            authority: authority.to_string(),
            path: normalize_path(&rest[..end]),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Hostname without port or credentials
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Full netloc exactly as given, userinfo and port included
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Path, always starting with `/`
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Scheme is everything before the first `:` when it looks like one
fn split_scheme(input: &str) -> (&str, &str) {
    if let Some((scheme, rest)) = input.split_once(':') {
        let mut chars = scheme.chars();
        let well_formed = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if well_formed {
            return (scheme, rest);
        }
    }
    ("", input)
}

fn hostname(authority: &str) -> String {
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);

    let host = match host_port.split_once('[') {
        Some((_, bracketed)) => bracketed.split_once(']').map_or(bracketed, |(host, _)| host),
        None => host_port.split_once(':').map_or(host_port, |(host, _)| host),
    };
    host.to_lowercase()
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
