#[cfg(feature = "derive_serde")]
use serde::{Deserialize, Serialize};


/// How deeply compounds and lists may nest inside one SNBT argument.
///
/// The SNBT parser recurses once per level, so this also bounds its stack use on
/// hostile input such as `[[[[[[...`.
#[cfg_attr(feature = "derive_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "derive_standard", derive(PartialOrd, Ord, Hash))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLimit(pub(crate) u32);

impl Default for DepthLimit {
    /// The nesting depth Minecraft itself accepts.
    fn default() -> Self {
        Self(512)
    }
}

impl DepthLimit {
    #[inline]
    pub fn new(limit: u32) -> Self {
        Self(limit)
    }

    #[inline]
    pub fn limit(self) -> u32 {
        self.0
    }

    /// Whether a container opened at `depth` (the outermost compound being depth 0)
    /// would be too deeply nested.
    #[inline]
    pub fn exceeded_at(self, depth: u32) -> bool {
        depth >= self.0
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn exceeded() {
        let limit = DepthLimit::new(2);
        assert!(!limit.exceeded_at(1));
        assert!(limit.exceeded_at(2));
        assert_eq!(DepthLimit::default().limit(), 512);
    }

    #[cfg(feature = "derive_serde")]
    #[test]
    fn serialized_as_number() {
        assert_eq!(serde_json::to_string(&DepthLimit::new(64)).unwrap(), "64");
        let limit: DepthLimit = serde_json::from_str("128").unwrap();
        assert_eq!(limit.limit(), 128);
    }
}
