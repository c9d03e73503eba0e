use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// String-keyed map that keeps document order
///
/// YAML mappings are ordered and rule evaluation depends on that order, so
/// profiles, groups and arguments are all stored in one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Insert a value, replacing an existing key in place
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(OrderedMap::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_any(OrderedMapVisitor(PhantomData))
    }
}

/// One routing condition; an absent field matches anything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_start: Option<String>,
}

/// Ordered rules under one group name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Vec<MatchRule>>", into = "Vec<MatchRule>")]
pub struct MatchGroup {
    pub rules: Vec<MatchRule>,
}

impl From<Option<Vec<MatchRule>>> for MatchGroup {
    fn from(rules: Option<Vec<MatchRule>>) -> Self {
        Self {
            rules: rules.unwrap_or_default(),
        }
    }
}

impl From<Vec<MatchRule>> for MatchGroup {
    fn from(rules: Vec<MatchRule>) -> Self {
        Self { rules }
    }
}

impl From<MatchGroup> for Vec<MatchRule> {
    fn from(group: MatchGroup) -> Self {
        group.rules
    }
}

/// A single `from` -> `to` substring replacement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Replacement {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }
}

/// URL rewrite applied before the browser is started
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeUrl {
    #[serde(alias = "transform")]
    pub transform_original_url: Vec<Replacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Value half of an `arguments_list` entry
///
/// Any YAML scalar is accepted and kept in its textual form, so
/// `--window-size: 800` and `--window-size: "800"` are the same argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentValue(pub String);

impl ArgumentValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for ArgumentValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ArgumentValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = ArgumentValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string, number, boolean or null")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ArgumentValue(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(ArgumentValue(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(ArgumentValue(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ArgumentValue(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ArgumentValue(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(ArgumentValue(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(ArgumentValue::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(ArgumentValue::default())
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Profile as written in a single config document
///
/// Every field is optional so that a later document can override only the
/// parts it mentions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments_list: Option<OrderedMap<ArgumentValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments_delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_url: Option<ChangeUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<OrderedMap<MatchGroup>>,
}

/// Effective browser profile after all documents are merged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BrowserProfile {
    pub executable: String,
    #[serde(skip_serializing_if = "OrderedMap::is_empty")]
    pub arguments_list: OrderedMap<ArgumentValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments_delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_url: Option<ChangeUrl>,
    #[serde(skip_serializing_if = "OrderedMap::is_empty")]
    pub urls: OrderedMap<MatchGroup>,
}

impl BrowserProfile {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            ..Self::default()
        }
    }

    /// Overlay a later document's entry onto this profile
    ///
    /// Present scalar fields replace the current ones wholesale. `urls` is
    /// merged per group: a group with a known name replaces that group's
    /// rules, a new name is appended, other groups are left alone.
    pub fn apply(&mut self, entry: ProfileEntry) {
        if let Some(executable) = entry.executable {
            self.executable = executable;
        }
        if let Some(arguments_list) = entry.arguments_list {
            self.arguments_list = arguments_list;
        }
        if entry.arguments_delimiter.is_some() {
            self.arguments_delimiter = entry.arguments_delimiter;
        }
        if entry.change_url.is_some() {
            self.change_url = entry.change_url;
        }
        for (group_name, group) in entry.urls.unwrap_or_default() {
            tracing::debug!("Replacing match group `{}`", group_name);
            self.urls.insert(group_name, group);
        }
    }

    /// Delimiter placed between an argument key and its value
    pub fn delimiter(&self) -> &str {
        self.arguments_delimiter.as_deref().unwrap_or("")
    }
}

impl From<ProfileEntry> for BrowserProfile {
    fn from(entry: ProfileEntry) -> Self {
        Self {
            executable: entry.executable.unwrap_or_default(),
            arguments_list: entry.arguments_list.unwrap_or_default(),
            arguments_delimiter: entry.arguments_delimiter,
            change_url: entry.change_url,
            urls: entry.urls.unwrap_or_default(),
        }
    }
}
