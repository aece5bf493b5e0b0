use crate::constants::{AUTOFARM, BUFF, MACROS, MONITOR, PIPELINE, RESPAWN, TELEPORT};
use bitflags::bitflags;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A feature panel of the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureId {
    Macros,
    Autofarm,
    Teleport,
    Respawn,
    Buff,
    Monitor,
    Pipeline,
}

impl FeatureId {
    pub const ALL: [Self; 7] = [
        Self::Macros,
        Self::Autofarm,
        Self::Teleport,
        Self::Respawn,
        Self::Buff,
        Self::Monitor,
        Self::Pipeline,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Macros => MACROS,
            Self::Autofarm => AUTOFARM,
            Self::Teleport => TELEPORT,
            Self::Respawn => RESPAWN,
            Self::Buff => BUFF,
            Self::Monitor => MONITOR,
            Self::Pipeline => PIPELINE,
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of enabled features.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FeatureSet: u32 {
        const MACROS = 1 << 0;
        const AUTOFARM = 1 << 1;
        const TELEPORT = 1 << 2;
        const RESPAWN = 1 << 3;
        const BUFF = 1 << 4;
        const MONITOR = 1 << 5;
        const PIPELINE = 1 << 6;

        const ALL = Self::MACROS.bits()
            | Self::AUTOFARM.bits()
            | Self::TELEPORT.bits()
            | Self::RESPAWN.bits()
            | Self::BUFF.bits()
            | Self::MONITOR.bits()
            | Self::PIPELINE.bits();
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl FeatureSet {
    #[must_use]
    pub fn has(self, id: FeatureId) -> bool {
        self.contains(id.into())
    }
}

impl From<FeatureId> for FeatureSet {
    fn from(id: FeatureId) -> Self {
        match id {
            FeatureId::Macros => Self::MACROS,
            FeatureId::Autofarm => Self::AUTOFARM,
            FeatureId::Teleport => Self::TELEPORT,
            FeatureId::Respawn => Self::RESPAWN,
            FeatureId::Buff => Self::BUFF,
            FeatureId::Monitor => Self::MONITOR,
            FeatureId::Pipeline => Self::PIPELINE,
        }
    }
}

impl From<&str> for FeatureSet {
    fn from(s: &str) -> Self {
        match s.trim() {
            "all" | "*" => Self::ALL,
            name => FeatureId::ALL
                .into_iter()
                .find(|id| id.as_str() == name)
                .map_or_else(Self::empty, Self::from),
        }
    }
}

impl From<u32> for FeatureSet {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for FeatureSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

/// Accepts raw bits, a single name (`"all"`, `"macros,buff"`) or a list of names.
impl<'de> Deserialize<'de> for FeatureSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FeatureSetVisitor;

        impl<'de> Visitor<'de> for FeatureSetVisitor {
            type Value = FeatureSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("feature bits, a feature name, or a list of feature names")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<FeatureSet, E> {
                u32::try_from(v).map(FeatureSet::from).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<FeatureSet, E> {
                u32::try_from(v).map(FeatureSet::from).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FeatureSet, E> {
                Ok(v.split(',').map(FeatureSet::from).fold(FeatureSet::empty(), |acc, f| acc | f))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FeatureSet, A::Error> {
                let mut set = FeatureSet::empty();
                while let Some(name) = seq.next_element::<String>()? {
                    set |= FeatureSet::from(name.as_str());
                }
                Ok(set)
            }
        }

        deserializer.deserialize_any(FeatureSetVisitor)
    }
}
