//! Agent identity: canonical keys, display names and the lookup tables that
//! reconcile the different spellings each source system uses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical per-agent identifier joining the activity sources.
///
/// Always lower-case and never contains the `@domain` part of a login.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AgentKey(String);

impl AgentKey {
    /// Key from a login or email-like identifier: the part before `@`,
    /// lower-cased.
    pub fn from_login(raw: &str) -> Self {
        let username = raw.split('@').next().unwrap_or(raw);
        Self(username.trim().to_lowercase())
    }

    /// Key from a caller name, collapsing known aliases onto their
    /// canonical username.
    pub fn from_caller(raw: &str, names: &NameTables) -> Self {
        let lowered = raw.trim().to_lowercase();
        match names.agent_aliases.get(&lowered) {
            Some(canonical) => Self(canonical.to_lowercase()),
            None => Self(lowered),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the `"First L"` display name shared by the dial log and payroll.
///
/// Either part may be missing; the result never carries stray spaces.
pub fn display_name(first_name: &str, last_name_or_initial: &str) -> String {
    let first = first_name.trim();
    match last_name_or_initial.trim().chars().next() {
        Some(initial) if first.is_empty() => initial.to_string(),
        Some(initial) => format!("{first} {initial}"),
        None => first.to_string(),
    }
}

/// Immutable name reconciliation tables passed into the stages that need them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameTables {
    /// Raw caller username (lower-case) to canonical username
    #[serde(default = "default_agent_aliases")]
    pub agent_aliases: BTreeMap<String, String>,

    /// Capitalized short first name to the formal first name used in the dialer
    #[serde(default = "default_nicknames")]
    pub nicknames: BTreeMap<String, String>,
}

impl NameTables {
    /// Expand a nickname, returning the input when no expansion is known.
    pub fn expand_nickname<'a>(&'a self, first_name: &'a str) -> &'a str {
        self.nicknames
            .get(first_name)
            .map(String::as_str)
            .unwrap_or(first_name)
    }
}

impl Default for NameTables {
    fn default() -> Self {
        Self {
            agent_aliases: default_agent_aliases(),
            nicknames: default_nicknames(),
        }
    }
}

fn default_agent_aliases() -> BTreeMap<String, String> {
    [("mperez", "ysanchez"), ("mgarcia", "ysanchez")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn default_nicknames() -> BTreeMap<String, String> {
    [("Ally", "Allison"), ("Mike", "Michael"), ("Matt", "Matthew")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
