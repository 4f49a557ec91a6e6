/// How an entry point is invoked once bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// Free function on the provider (e.g. a state lookup keyed by world).
    Static,
    /// Accessor on a provider-owned state object.
    Virtual,
}

/// One entry point a provider is expected to export, with its exact calling
/// shape. Used only while binding; afterwards only the resolved handle is
/// kept.
#[derive(Debug, Clone, Copy)]
pub struct EntryPointSpec {
    pub name: &'static str,
    /// Logical owner type, for diagnostics.
    pub owner: &'static str,
    /// Human-readable calling shape, for diagnostics. The actual contract
    /// check is the callable's `TypeId`.
    pub signature: &'static str,
    pub kind: BindingKind,
}

/// Everything the binder needs to know about one optional provider.
///
/// Defined once per provider kind; this crate has exactly two.
#[derive(Debug)]
pub struct ProviderDescriptor {
    pub mod_id: &'static str,
    /// Required entry points, in resolution order.
    pub entry_points: &'static [EntryPointSpec],
}
