//! Canonical, order-independent identifiers for ingredient combinations.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical key for an unordered set of ingredient names.
///
/// Names are lowercased, trimmed, de-duplicated, sorted, and joined with
/// [`CombinationKey::SEPARATOR`]. Building a key from the members of another
/// key always reproduces it. Deserializing goes through [`CombinationKey::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct CombinationKey(String);

impl CombinationKey {
    /// Separator between member names.
    pub const SEPARATOR: &'static str = " + ";

    /// Build the key for a collection of ingredient names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let members: BTreeSet<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        let members: Vec<String> = members.into_iter().collect();
        Self(members.join(Self::SEPARATOR))
    }

    /// Canonicalize a human-written key such as `"Vitamin C+niacinamide"`.
    ///
    /// Member names therefore cannot contain `+`.
    pub fn parse(s: &str) -> Self {
        Self::from_names(s.split('+'))
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Member ingredient names in sorted order.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.0
            .split(Self::SEPARATOR)
            .filter(|member| !member.is_empty())
    }

    /// Number of member ingredients.
    pub fn len(&self) -> usize {
        self.members().count()
    }

    /// Whether the key has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CombinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CombinationKey {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<CombinationKey> for String {
    fn from(key: CombinationKey) -> Self {
        key.0
    }
}

impl AsRef<str> for CombinationKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CombinationKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
