//!
//! Authority identifiers
//!
//! An identifier is an opaque (authority, code) pair plus a display name.
//! It is the key of the datum registry and of the transformation graph;
//! equality and hashing ignore the display name and the authority case.
//!

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct Identifier {
    authority: Cow<'static, str>,
    code: Cow<'static, str>,
    name: Cow<'static, str>,
}

impl Identifier {
    /// Identifier from static strings, usable in constant definitions
    pub const fn from_static(
        authority: &'static str,
        code: &'static str,
        name: &'static str,
    ) -> Self {
        Self {
            authority: Cow::Borrowed(authority),
            code: Cow::Borrowed(code),
            name: Cow::Borrowed(name),
        }
    }

    pub fn new(authority: &str, code: &str, name: &str) -> Self {
        Self {
            authority: Cow::Owned(authority.to_string()),
            code: Cow::Owned(code.to_string()),
            name: Cow::Owned(name.to_string()),
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized short name used for name based lookups:
    /// lowercase with spaces, dashes and underscores removed.
    pub fn normalized_name(&self) -> String {
        self.name
            .chars()
            .filter(|c| !matches!(*c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.authority.eq_ignore_ascii_case(&other.authority)
            && self.code.eq_ignore_ascii_case(&other.code)
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.authority.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        for b in self.code.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_equality_ignores_name_and_case() {
        let a = Identifier::from_static("EPSG", "4326", "WGS 84");
        let b = Identifier::new("epsg", "4326", "World Geodetic System 1984");
        assert_eq!(a, b);
    }

    #[test]
    fn identifier_normalized_name() {
        let id = Identifier::from_static("EPSG", "6275", "Nouvelle_Triangulation-Francaise");
        assert_eq!(id.normalized_name(), "nouvelletriangulationfrancaise");
    }
}
