pub mod api;
pub mod error;
pub mod runtime;

use fxhash::FxHashSet;
use syn::Attribute;

/// Names of the traits already listed in `#[derive(...)]` attributes.
///
/// Paths are reduced to their last segment, so `serde::Serialize` and `Serialize`
/// both count as `Serialize`.
pub(crate) fn derived_traits(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                traits.insert(last.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}
