use std::any::Any;
use std::collections::{HashMap, HashSet};

/// Host-side registry of installed add-ons and the entry points they export.
///
/// Presence (`is_loaded`) and capability lookup (`entry_point`) are separate
/// questions on purpose: an add-on can be installed yet export nothing a
/// consumer can use, and consumers need to tell those states apart.
pub trait ExtensionRegistry: Send + Sync {
    /// Authoritative "is this add-on installed" check, independent of
    /// entry-point resolution.
    fn is_loaded(&self, mod_id: &str) -> bool;

    /// Raw registered handle for one entry point. Callers downcast to the
    /// concrete callable type they expect.
    fn entry_point(&self, mod_id: &str, name: &str) -> Option<&(dyn Any + Send + Sync)>;
}

/// In-memory `ExtensionRegistry` the host populates while loading add-ons.
#[derive(Default)]
pub struct ExtensionMap {
    loaded: HashSet<String>,
    entries: HashMap<String, HashMap<String, Box<dyn Any + Send + Sync>>>,
}

impl ExtensionMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an add-on as installed without any entry points.
    pub fn mark_loaded(&mut self, mod_id: &str) {
        self.loaded.insert(mod_id.to_string());
    }

    /// Registers one entry point under `(mod_id, name)` and marks the mod as
    /// loaded. Re-registering the same pair is an error.
    pub fn register(
        &mut self,
        mod_id: &str,
        name: &str,
        handle: Box<dyn Any + Send + Sync>,
    ) -> Result<(), String> {
        let by_name = self.entries.entry(mod_id.to_string()).or_default();
        if by_name.contains_key(name) {
            return Err(format!("entry point already registered: {mod_id}:{name}"));
        }

        by_name.insert(name.to_string(), handle);
        self.loaded.insert(mod_id.to_string());

        log::debug!(target: "extensions", "registered entry point '{}:{}'", mod_id, name);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ExtensionRegistry for ExtensionMap {
    #[inline]
    fn is_loaded(&self, mod_id: &str) -> bool {
        self.loaded.contains(mod_id)
    }

    #[inline]
    fn entry_point(&self, mod_id: &str, name: &str) -> Option<&(dyn Any + Send + Sync)> {
        self.entries.get(mod_id)?.get(name).map(|b| b.as_ref())
    }
}
