use core::hash::{Hash, Hasher};

/// Identifies a font or background image owned by the host.
///
/// The resolver never dereferences it; it is copied into the output so the
/// renderer can map it to a texture or glyph atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetId(pub u64);

impl AssetId {
    /// Creates an id by hashing `label`. The same label always gives the same id.
    #[inline]
    pub fn new(label: &str) -> AssetId {
        let mut hasher = rustc_hash::FxHasher::default();
        label.hash(&mut hasher);
        AssetId(hasher.finish())
    }
}

impl From<&str> for AssetId {
    fn from(label: &str) -> Self {
        AssetId::new(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_hash_deterministically() {
        assert_eq!(AssetId::new("fonts/mono"), AssetId::from("fonts/mono"));
        assert_ne!(AssetId::new("fonts/mono"), AssetId::new("fonts/sans"));
    }
}
