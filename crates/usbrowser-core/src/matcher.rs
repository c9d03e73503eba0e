use crate::config::{BrowserProfile, Config, DEFAULT_PROFILE, MatchRule};
use crate::url::ParsedUrl;

/// Which URL component the `domain` and `domain_suffix` conditions look at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostSource {
    /// Bare hostname, the usual choice
    #[default]
    Hostname,
    /// Full authority (`user@host:port`) for configs written against it
    Authority,
}

impl MatchRule {
    /// Check whether this rule accepts the URL
    ///
    /// All conditions are combined with AND logic. Within the domain
    /// condition an exact `domain` hit or a literal `domain_suffix` hit is
    /// enough; with neither field set any host passes.
    pub fn matches(&self, url: &ParsedUrl, source: HostSource) -> bool {
        self.matches_scheme(url) && self.matches_domain(url, source) && self.matches_path(url)
    }

    fn matches_scheme(&self, url: &ParsedUrl) -> bool {
        match &self.scheme {
            None => true,
            Some(scheme) => scheme == url.scheme(),
        }
    }

    fn matches_domain(&self, url: &ParsedUrl, source: HostSource) -> bool {
        let host = match source {
            HostSource::Hostname => url.host(),
            HostSource::Authority => url.authority(),
        };

        if self.domain.is_none() && self.domain_suffix.is_none() {
            return true;
        }

        self.domain.as_deref() == Some(host)
            || self
                .domain_suffix
                .as_deref()
                .is_some_and(|suffix| host.ends_with(suffix))
    }

    fn matches_path(&self, url: &ParsedUrl) -> bool {
        let prefix = format!("/{}", self.path_start.as_deref().unwrap_or(""));
        url.path().starts_with(&prefix)
    }
}

/// Result of matching a URL against a config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub profile_name: &'a str,
    pub profile: &'a BrowserProfile,
    /// Group holding the winning rule; `None` when falling back
    pub group: Option<&'a str>,
    /// Position of the winning rule inside its group
    pub rule: Option<usize>,
}

/// Every (profile, group, rule) triple in evaluation order
pub fn candidates(config: &Config) -> impl Iterator<Item = (Selection<'_>, &MatchRule)> {
    config.profiles().flat_map(|(profile_name, profile)| {
        profile.urls.iter().flat_map(move |(group_name, group)| {
            group.rules.iter().enumerate().map(move |(index, rule)| {
                let selection = Selection {
                    profile_name,
                    profile,
                    group: Some(group_name),
                    rule: Some(index),
                };
                (selection, rule)
            })
        })
    })
}

/// Pick the profile for a URL
///
/// The first matching rule wins, in config order. Nothing about how specific
/// a rule is affects the choice. Without any match the fallback profile is
/// returned.
pub fn select<'a>(config: &'a Config, url: &ParsedUrl, source: HostSource) -> Selection<'a> {
    let found = candidates(config).find(|(candidate, rule)| {
        tracing::debug!(
            "Checking `{}` rule {:?} of profile `{}`",
            candidate.group.unwrap_or_default(),
            rule,
            candidate.profile_name
        );
        rule.matches(url, source)
    });

    match found {
        Some((selection, _)) => {
            tracing::debug!(
                "Found a match in `{}` group of profile `{}`",
                selection.group.unwrap_or_default(),
                selection.profile_name
            );
            selection
        }
        None => {
            tracing::debug!("No rule matched, using `{}` profile", DEFAULT_PROFILE);
            Selection {
                profile_name: DEFAULT_PROFILE,
                profile: config.default_profile(),
                group: None,
                rule: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigDocument;

    fn config(yaml: &str) -> Config {
        let document = ConfigDocument::from_str(yaml, "test").unwrap();
        Config::default().merge(document)
    }

    fn url(input: &str) -> ParsedUrl {
        ParsedUrl::parse(input)
    }

    fn rule() -> MatchRule {
        MatchRule::default()
    }

    #[test]
    fn test_wildcard_rule_matches_everything() {
        let wildcard = rule();
        assert!(wildcard.matches(&url("http://example.com/anything"), HostSource::Hostname));
        assert!(wildcard.matches(&url("https://other.org"), HostSource::Hostname));
        assert!(wildcard.matches(&url("example.com/page"), HostSource::Hostname));
    }

    #[test]
    fn test_scheme_must_match_exactly() {
        let https_only = MatchRule {
            scheme: Some("https".to_string()),
            ..rule()
        };
        assert!(https_only.matches(&url("https://example.com/"), HostSource::Hostname));
        assert!(!https_only.matches(&url("http://example.com/"), HostSource::Hostname));
    }

    #[test]
    fn test_domain_is_exact() {
        let exact = MatchRule {
            domain: Some("example.com".to_string()),
            ..rule()
        };
        assert!(exact.matches(&url("https://example.com/"), HostSource::Hostname));
        assert!(!exact.matches(&url("https://www.example.com/"), HostSource::Hostname));
    }

    #[test]
    fn test_suffix_matching_is_literal() {
        let suffix = MatchRule {
            domain_suffix: Some("example.com".to_string()),
            ..rule()
        };
        assert!(suffix.matches(&url("https://www.example.com/"), HostSource::Hostname));
        assert!(suffix.matches(&url("https://notexample.com/"), HostSource::Hostname));
        assert!(!suffix.matches(&url("https://example.org/"), HostSource::Hostname));
    }

    #[test]
    fn test_domain_or_suffix_is_enough() {
        let either = MatchRule {
            domain: Some("intranet".to_string()),
            domain_suffix: Some(".corp.internal".to_string()),
            ..rule()
        };
        assert!(either.matches(&url("http://intranet/"), HostSource::Hostname));
        assert!(either.matches(&url("http://wiki.corp.internal/"), HostSource::Hostname));
        assert!(!either.matches(&url("http://example.com/"), HostSource::Hostname));
    }

    #[test]
    fn test_empty_suffix_matches_any_host() {
        let empty = MatchRule {
            domain_suffix: Some(String::new()),
            ..rule()
        };
        assert!(empty.matches(&url("https://anything.example/"), HostSource::Hostname));
    }

    #[test]
    fn test_path_start_is_prefixed_with_slash() {
        let jira = MatchRule {
            path_start: Some("jira".to_string()),
            ..rule()
        };
        assert!(jira.matches(&url("https://host/jira/browse/X-1"), HostSource::Hostname));
        assert!(jira.matches(&url("https://host/jiraboard"), HostSource::Hostname));
        assert!(!jira.matches(&url("https://host/wiki/jira"), HostSource::Hostname));
        assert!(!jira.matches(&url("https://host"), HostSource::Hostname));
    }

    #[test]
    fn test_authority_source_sees_port() {
        let with_port = MatchRule {
            domain: Some("localhost:8080".to_string()),
            ..rule()
        };
        let target = url("http://localhost:8080/app");

        assert!(!with_port.matches(&target, HostSource::Hostname));
        assert!(with_port.matches(&target, HostSource::Authority));
    }

    #[test]
    fn test_first_match_wins_over_specific_rule() {
        let config = config(r#"
broad:
  executable: firefox
  urls:
    everything:
      - domain_suffix: example.com
narrow:
  executable: epiphany
  urls:
    docs:
      - domain: docs.example.com
        path_start: guide
"#);

        let selection = select(
            &config,
            &url("https://docs.example.com/guide/intro"),
            HostSource::Hostname,
        );
        assert_eq!(selection.profile_name, "broad");
        assert_eq!(selection.group, Some("everything"));
        assert_eq!(selection.rule, Some(0));
    }

    #[test]
    fn test_rules_within_group_keep_order() {
        let config = config(r#"
work:
  executable: firefox
  urls:
    corp:
      - domain: a.example
      - domain_suffix: b.example
"#);

        let selection = select(&config, &url("https://x.b.example/"), HostSource::Hostname);
        assert_eq!(selection.profile_name, "work");
        assert_eq!(selection.group, Some("corp"));
        assert_eq!(selection.rule, Some(1));
    }

    #[test]
    fn test_no_match_falls_back_to_default() {
        let config = config(r#"
work:
  executable: firefox
  urls:
    corp:
      - domain_suffix: corp.internal
"#);

        let selection = select(&config, &url("https://example.org/"), HostSource::Hostname);
        assert_eq!(selection.profile_name, "default");
        assert_eq!(selection.profile.executable, "chromium");
        assert_eq!(selection.group, None);
        assert_eq!(selection.rule, None);
    }

    #[test]
    fn test_default_profile_rules_are_checked_first() {
        let config = config(r#"
default:
  urls:
    mine:
      - domain: example.com
work:
  executable: firefox
  urls:
    all:
      - {}
"#);

        let selection = select(&config, &url("https://example.com/"), HostSource::Hostname);
        assert_eq!(selection.profile_name, "default");
        assert_eq!(selection.group, Some("mine"));

        let selection = select(&config, &url("https://other.com/"), HostSource::Hostname);
        assert_eq!(selection.profile_name, "work");
    }

    #[test]
    fn test_profile_without_urls_is_never_selected() {
        let config = config("spare:\n  executable: epiphany\n");

        assert_eq!(candidates(&config).count(), 0);
        let selection = select(&config, &url("https://example.com/"), HostSource::Hostname);
        assert_eq!(selection.profile_name, "default");
    }

    #[test]
    fn test_unicode_rules_match_as_written() {
        let config = config(r#"
books:
  executable: firefox
  urls:
    shop:
      - domain: bücher.example
wiki:
  executable: epiphany
  urls:
    umlaut:
      - path_start: wiki/Ü
"#);

        let selection = select(&config, &url("https://Bücher.example/"), HostSource::Hostname);
        assert_eq!(selection.profile_name, "books");

        let selection = select(&config, &url("https://other.example/wiki/Über"), HostSource::Hostname);
        assert_eq!(selection.profile_name, "wiki");
    }

    #[test]
    fn test_dot_segments_are_not_resolved() {
        let config = config(r#"
work:
  executable: firefox
  urls:
    jira:
      - path_start: jira
"#);

        let selection = select(&config, &url("https://example.com/a/../jira/x"), HostSource::Hostname);
        assert_eq!(selection.profile_name, "default");

        let selection = select(&config, &url("https://example.com/jira/x"), HostSource::Hostname);
        assert_eq!(selection.profile_name, "work");
    }

    #[test]
    fn test_authority_keeps_explicit_default_port() {
        let config = config(r#"
tls:
  executable: firefox
  urls:
    pinned:
      - domain: example.net:443
"#);

        let target = url("https://example.net:443/");
        assert_eq!(select(&config, &target, HostSource::Authority).profile_name, "tls");
        assert_eq!(select(&config, &target, HostSource::Hostname).profile_name, "default");
    }
}
