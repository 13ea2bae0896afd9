//! Query feature bitmask.
//!
//! Each description variant contributes a feature bit. Stored concepts
//! declare the features their definition uses so that policy checks can
//! run without parsing the concept text.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryFeatures(u32);

impl QueryFeatures {
    pub const NONE: Self = Self(0);
    pub const PROPERTY: Self = Self(1);
    pub const CATEGORY: Self = Self(2);
    pub const CONCEPT: Self = Self(4);
    pub const NAMESPACE: Self = Self(8);
    pub const CONJUNCTION: Self = Self(16);
    pub const DISJUNCTION: Self = Self(32);
    pub const ALL: Self = Self(63);

    const NAMES: [(Self, &'static str); 6] = [
        (Self::PROPERTY, "property"),
        (Self::CATEGORY, "category"),
        (Self::CONCEPT, "concept"),
        (Self::NAMESPACE, "namespace"),
        (Self::CONJUNCTION, "conjunction"),
        (Self::DISJUNCTION, "disjunction"),
    ];

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when every feature in `self` is also in `allowed`.
    pub const fn is_subset_of(self, allowed: Self) -> bool {
        self.0 & !allowed.0 == 0
    }
}

impl BitOr for QueryFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for QueryFeatures {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for QueryFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
