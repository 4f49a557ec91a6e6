use crate::descriptor::{EntryPointSpec, ProviderDescriptor};

use glint_host_api::ExtensionRegistry;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("provider '{0}' is not installed")]
    NotInstalled(&'static str),

    #[error("entry point {owner}::{name} is missing")]
    MissingEntryPoint {
        owner: &'static str,
        name: &'static str,
    },

    #[error("entry point {owner}::{name} has unexpected shape, expected `{expected}`")]
    ShapeMismatch {
        owner: &'static str,
        name: &'static str,
        expected: &'static str,
    },
}

/// Resolves one entry point to the exact callable type the caller expects.
///
/// The `downcast_ref` is the structural contract check: owner, argument and
/// return types are all components of `H`, so a provider built against a
/// renamed or re-shaped API fails here, once, instead of at call time.
pub(crate) fn resolve<H>(
    registry: &dyn ExtensionRegistry,
    descriptor: &ProviderDescriptor,
    spec: &EntryPointSpec,
) -> Result<H, BindError>
where
    H: Clone + 'static,
{
    let raw = registry
        .entry_point(descriptor.mod_id, spec.name)
        .ok_or(BindError::MissingEntryPoint {
            owner: spec.owner,
            name: spec.name,
        })?;

    raw.downcast_ref::<H>()
        .cloned()
        .ok_or(BindError::ShapeMismatch {
            owner: spec.owner,
            name: spec.name,
            expected: spec.signature,
        })
}

/// A provider after the one-time binding pass.
///
/// `handles` is `None` when the provider is absent or failed to bind; all
/// behavior then degrades to defaults. Created once at startup, immutable
/// afterwards. There is no re-detection of a provider appearing later.
pub struct BoundProvider<H> {
    descriptor: &'static ProviderDescriptor,
    handles: Option<H>,
}

impl<H> BoundProvider<H> {
    #[inline]
    pub(crate) fn absent(descriptor: &'static ProviderDescriptor) -> Self {
        Self {
            descriptor,
            handles: None,
        }
    }

    #[inline]
    pub(crate) fn bound(descriptor: &'static ProviderDescriptor, handles: H) -> Self {
        Self {
            descriptor,
            handles: Some(handles),
        }
    }

    #[inline]
    pub fn present(&self) -> bool {
        self.handles.is_some()
    }

    #[inline]
    pub fn handles(&self) -> Option<&H> {
        self.handles.as_ref()
    }

    #[inline]
    pub fn mod_id(&self) -> &'static str {
        self.descriptor.mod_id
    }

    #[inline]
    pub fn descriptor(&self) -> &'static ProviderDescriptor {
        self.descriptor
    }
}

/// Shared binding policy: presence check first, then all-or-nothing entry
/// point resolution. Any single failure abandons the whole provider with one
/// warning; partial bindings would feed a shader signals with no coherent
/// contract.
pub(crate) fn bind_provider<H>(
    registry: &dyn ExtensionRegistry,
    descriptor: &'static ProviderDescriptor,
    build: impl FnOnce(&dyn ExtensionRegistry) -> Result<H, BindError>,
) -> BoundProvider<H> {
    let result = if registry.is_loaded(descriptor.mod_id) {
        build(registry)
    } else {
        Err(BindError::NotInstalled(descriptor.mod_id))
    };

    match result {
        Ok(handles) => {
            log::info!("compat: provider '{}' bound", descriptor.mod_id);
            BoundProvider::bound(descriptor, handles)
        }
        Err(BindError::NotInstalled(_)) => {
            log::info!(
                "compat: provider '{}' not installed, using default values",
                descriptor.mod_id
            );
            BoundProvider::absent(descriptor)
        }
        Err(e) => {
            log::warn!("compat: failed to bind provider '{}': {}", descriptor.mod_id, e);
            BoundProvider::absent(descriptor)
        }
    }
}
