mod reader;
mod types;

pub use reader::{ConfigDocument, ConfigReader};
pub use types::{
    ArgumentValue, BrowserProfile, ChangeUrl, MatchGroup, MatchRule, OrderedMap, ProfileEntry,
    Replacement,
};

/// Name of the fallback profile every config carries
pub const DEFAULT_PROFILE: &str = "default";

/// Executable of the built-in fallback profile
pub const DEFAULT_EXECUTABLE: &str = "chromium";

/// Effective set of browser profiles for one invocation
///
/// The fallback profile always exists and always comes first; the rest keep
/// the order in which documents introduced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    default: BrowserProfile,
    profiles: OrderedMap<BrowserProfile>,
}

impl Config {
    /// Create a config holding only the given fallback profile
    pub fn new(default: BrowserProfile) -> Self {
        Self {
            default,
            profiles: OrderedMap::new(),
        }
    }

    /// Fold documents over a fallback profile, earliest first
    ///
    /// `None` entries stand for sources that do not exist and are skipped.
    pub fn layered<I>(default: BrowserProfile, documents: I) -> Self
    where
        I: IntoIterator<Item = Option<ConfigDocument>>,
    {
        documents
            .into_iter()
            .flatten()
            .fold(Self::new(default), Self::merge)
    }

    /// Merge one document on top of this config
    pub fn merge(mut self, document: ConfigDocument) -> Self {
        for (name, entry) in document.profiles {
            if name == DEFAULT_PROFILE {
                tracing::debug!("Updating `{}` profile", name);
                self.default.apply(entry);
            } else if let Some(existing) = self.profiles.get_mut(&name) {
                tracing::debug!("Updating `{}` profile", name);
                existing.apply(entry);
            } else {
                tracing::debug!("New profile `{}` - all items added", name);
                self.profiles.insert(name, BrowserProfile::from(entry));
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&BrowserProfile> {
        if name == DEFAULT_PROFILE {
            Some(&self.default)
        } else {
            self.profiles.get(name)
        }
    }

    pub fn default_profile(&self) -> &BrowserProfile {
        &self.default
    }

    /// All profiles in evaluation order, fallback first
    pub fn profiles(&self) -> impl Iterator<Item = (&str, &BrowserProfile)> {
        std::iter::once((DEFAULT_PROFILE, &self.default)).chain(self.profiles.iter())
    }

    /// Render the effective config as YAML, for debug output
    pub fn to_yaml(&self) -> String {
        let view: OrderedMap<&BrowserProfile> = self.profiles().collect();
        match serde_yaml_ng::to_string(&view) {
            Ok(yaml) => yaml,
            Err(e) => {
                tracing::warn!("Could not render effective config: {}", e);
                String::new()
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(BrowserProfile::new(DEFAULT_EXECUTABLE))
    }
}
