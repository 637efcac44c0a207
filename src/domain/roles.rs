//! Role set parsing and membership

use std::collections::BTreeSet;
use std::fmt;

/// An unordered set of role identifiers, parsed from a comma-separated list.
///
/// Role order and surrounding whitespace never affect matching; membership is
/// exact, case-sensitive string equality. The vocabulary is open: any
/// non-empty token is a valid role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet {
    roles: BTreeSet<String>,
}

impl RoleSet {
    /// Parse a comma-separated role list (e.g. "qr, tech").
    ///
    /// Tokens are trimmed; blank tokens are ignored. A list with no
    /// non-blank token is rejected - a tag must name at least one role.
    pub fn parse(role_list: &str) -> Result<Self, String> {
        let roles: BTreeSet<String> = role_list
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();

        if roles.is_empty() {
            return Err("empty role list".to_string());
        }

        Ok(RoleSet { roles })
    }

    /// Whether the given target role is a member of this set.
    pub fn contains(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.roles.iter().map(String::as_str).collect();
        write!(f, "{}", joined.join(","))
    }
}
