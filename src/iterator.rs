//! Server-side iterator settings and the named profile registry.
//!
//! A profile is a saved, ordered list of iterator stages that a compaction can
//! apply by name. The registry is read concurrently by command invocations and
//! hands out owned copies, so editing a profile never reaches into a request
//! that was already built from it.

use std::{
    collections::{BTreeMap, HashMap},
    sync::RwLock,
};

use serde::{Deserialize, Serialize};

/// Configuration of a single server-side iterator stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IteratorSetting {
    /// Position of the stage in the iterator stack; lower runs first.
    pub priority: u32,
    /// Unique name of the stage within the stack.
    pub name: String,
    /// Implementation identifier resolved by the tablet servers.
    pub iterator_class: String,
    /// Free-form options handed to the implementation.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl IteratorSetting {
    /// Build a setting with no options.
    pub fn new(priority: u32, name: impl Into<String>, iterator_class: impl Into<String>) -> Self {
        Self {
            priority,
            name: name.into(),
            iterator_class: iterator_class.into(),
            options: BTreeMap::new(),
        }
    }

    /// Attach an option, replacing an earlier value for the same key.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Lookup side of the iterator profile registry.
pub trait IteratorProfiles: Send + Sync {
    /// Return an owned copy of the named profile, or `None` if it does not exist.
    fn lookup(&self, profile: &str) -> Option<Vec<IteratorSetting>>;
}

/// In-memory profile registry safe for concurrent readers.
#[derive(Debug, Default)]
pub struct InMemoryIteratorProfiles {
    inner: RwLock<HashMap<String, Vec<IteratorSetting>>>,
}

impl InMemoryIteratorProfiles {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `iterators` under `profile`, returning the previous list if any.
    pub fn insert(
        &self,
        profile: impl Into<String>,
        iterators: Vec<IteratorSetting>,
    ) -> Option<Vec<IteratorSetting>> {
        match self.inner.write() {
            Ok(mut guard) => guard.insert(profile.into(), iterators),
            Err(poisoned) => poisoned.into_inner().insert(profile.into(), iterators),
        }
    }

    /// Append a stage to `profile`, creating the profile when missing.
    pub fn push(&self, profile: &str, setting: IteratorSetting) {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.entry(profile.to_string()).or_default().push(setting);
    }
}

impl FromIterator<(String, Vec<IteratorSetting>)> for InMemoryIteratorProfiles {
    fn from_iter<I: IntoIterator<Item = (String, Vec<IteratorSetting>)>>(iter: I) -> Self {
        Self {
            inner: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl IteratorProfiles for InMemoryIteratorProfiles {
    fn lookup(&self, profile: &str) -> Option<Vec<IteratorSetting>> {
        match self.inner.read() {
            Ok(guard) => guard.get(profile).cloned(),
            Err(poisoned) => poisoned.into_inner().get(profile).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn versioning() -> IteratorSetting {
        IteratorSetting::new(20, "vers", "VersioningIterator").with_option("maxVersions", "1")
    }

    #[test]
    fn lookup_returns_detached_copy() {
        let registry = InMemoryIteratorProfiles::new();
        registry.insert("p1", vec![versioning()]);

        let copy = registry.lookup("p1").expect("profile");
        registry.push("p1", IteratorSetting::new(30, "age", "AgeOffFilter"));

        assert_eq!(copy, vec![versioning()]);
        assert_eq!(registry.lookup("p1").expect("profile").len(), 2);
    }

    #[test]
    fn missing_profile_is_none() {
        let registry = InMemoryIteratorProfiles::new();
        assert!(registry.lookup("nope").is_none());
        registry.insert("p1", Vec::new());
        assert_eq!(registry.lookup("p1"), Some(Vec::new()));
        assert!(registry.lookup("p2").is_none());
    }

    #[test]
    fn concurrent_readers_see_the_same_profile() {
        let registry: Arc<InMemoryIteratorProfiles> =
            Arc::new([("p1".to_string(), vec![versioning()])].into_iter().collect());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.lookup("p1"))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("reader"), Some(vec![versioning()]));
        }
    }
}
