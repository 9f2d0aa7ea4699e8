use bijective_enum_map::injective_enum_map;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};


/// Compound tags keep their keys in the order they were written.
pub type NbtCompound = IndexMap<String, NbtTag>;

/// A parsed NBT value.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtTag {
    /// A signed, one-byte integer.
    Byte(i8),
    /// A signed, two-byte integer.
    Short(i16),
    /// A signed, four-byte integer.
    Int(i32),
    /// A signed, eight-byte integer.
    Long(i64),
    /// A 32-bit floating point value.
    Float(f32),
    /// A 64-bit floating point value.
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    /// A list whose elements all have the same type.
    List(Vec<NbtTag>),
    Compound(NbtCompound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NbtType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    List,
    Compound,
    IntArray,
    LongArray,
}

injective_enum_map! {
    NbtType, &'static str, &str,
    Byte      <=> "byte",
    Short     <=> "short",
    Int       <=> "int",
    Long      <=> "long",
    Float     <=> "float",
    Double    <=> "double",
    ByteArray <=> "byte_array",
    String    <=> "string",
    List      <=> "list",
    Compound  <=> "compound",
    IntArray  <=> "int_array",
    LongArray <=> "long_array",
}

impl NbtType {
    #[inline]
    pub fn name(self) -> &'static str {
        self.into()
    }

    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::Float | Self::Double,
        )
    }
}

impl NbtTag {
    /// Returns this tag's type.
    pub fn tag_type(&self) -> NbtType {
        match self {
            Self::Byte(_)      => NbtType::Byte,
            Self::Short(_)     => NbtType::Short,
            Self::Int(_)       => NbtType::Int,
            Self::Long(_)      => NbtType::Long,
            Self::Float(_)     => NbtType::Float,
            Self::Double(_)    => NbtType::Double,
            Self::ByteArray(_) => NbtType::ByteArray,
            Self::String(_)    => NbtType::String,
            Self::List(_)      => NbtType::List,
            Self::Compound(_)  => NbtType::Compound,
            Self::IntArray(_)  => NbtType::IntArray,
            Self::LongArray(_) => NbtType::LongArray,
        }
    }

    #[inline]
    pub fn as_compound(&self) -> Option<&NbtCompound> {
        if let Self::Compound(compound) = self {
            Some(compound)
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn type_names() {
        assert_eq!(NbtType::ByteArray.name(), "byte_array");
        assert_eq!(NbtType::try_from("compound"), Ok(NbtType::Compound));
        assert!(NbtType::try_from("Compound").is_err());
    }

    #[test]
    fn serde_names_agree() {
        let parsed: NbtType = serde_json::from_str("\"long_array\"").unwrap();
        assert_eq!(parsed, NbtType::LongArray);
        assert_eq!(NbtTag::LongArray(vec![1]).tag_type(), parsed);
    }
}
