use std::fmt;

/// Color morph of a moth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Morph {
    Light,
    Dark,
}

impl Morph {
    /// The morph whose offspring replace an eaten moth of this morph
    pub fn opposite(self) -> Self {
        match self {
            Morph::Light => Morph::Dark,
            Morph::Dark => Morph::Light,
        }
    }
}

impl fmt::Display for Morph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Morph::Light => write!(f, "light"),
            Morph::Dark => write!(f, "dark"),
        }
    }
}

/// Identifier of a moth; allocated monotonically and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MothId(pub u64);

impl fmt::Display for MothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "moth-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moth {
    pub id: MothId,
    pub morph: Morph,
}

impl Moth {
    pub fn new(id: MothId, morph: Morph) -> Self {
        Self { id, morph }
    }
}
