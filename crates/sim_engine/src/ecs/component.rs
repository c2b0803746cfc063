//! Component trait

/// Marker trait for components.
///
/// A component is a plain data record attached to at most one entity per
/// kind. Implement this explicitly for each component type; the store keys
/// its typed arrays by the implementing type.
pub trait Component: 'static + Send + Sync {}
