//! Ordered intent rule table.
//!
//! Intents are tried in declaration order and, within an intent, rules in
//! list order. The first rule that matches anywhere in the table wins; there
//! is no scoring between candidates.
//!
//! Rules capture parameters through named groups:
//!
//! | Intent            | Groups                                   |
//! |-------------------|------------------------------------------|
//! | `SendTransaction` | `amount`, `unit`?, `from`?, `to`         |
//! | `CheckBalance`    | `wallet`?                                |
//! | `CreateWallet`    | `name`?                                  |

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Intent;

/// Rules for send/transfer/pay. The `from` variant comes first so it is not
/// shadowed by the shorter phrasing. The amount group admits any digit so
/// that non-ASCII digits reach validation and fail there.
const SEND_RULES: &[&str] = &[
    r"\b(?:send|transfer|pay)\s+(?P<amount>[\d.]+)\s*(?P<unit>ether|eth)?\s*from\s+(?P<from>\w+)\s+to\s+(?P<to>(?:0x)?[0-9a-f]+)\b",
    r"\bsend\s+(?P<amount>[\d.]+)\s*(?P<unit>ether|eth)?\s*to\s+(?P<to>(?:0x)?[0-9a-f]+)\b",
    r"\btransfer\s+(?P<amount>[\d.]+)\s*(?P<unit>ether|eth)?\s*to\s+(?P<to>(?:0x)?[0-9a-f]+)\b",
    r"\bpay\s+(?P<amount>[\d.]+)\s*(?P<unit>ether|eth)?\s*to\s+(?P<to>(?:0x)?[0-9a-f]+)\b",
];

const BALANCE_RULES: &[&str] = &[
    r"\bbalance\s+(?:of|for)\s+(?P<wallet>\w+)",
    r"\bcheck\s+(?:my\s+|the\s+)?(?:balance|ether|eth)\b",
    r"\bwhat(?:'?s|\s+is)\s+(?:my|the)\s+(?:balance|ether|eth)\b",
    r"\bhow\s+much\s+(?:ether|eth)\b",
];

/// The name group is `\S+` so that illegal characters reach validation
/// instead of silently truncating the name.
const CREATE_RULES: &[&str] = &[
    r"\b(?:create|generate|make)\s+(?:a\s+)?(?:new\s+)?wallet\s+(?:named|called|for)\s+(?P<name>\S+)",
    r"\b(?:create|generate|make)\s+(?:a\s+)?(?:new\s+)?wallet\b",
];

static BUILTIN: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::from_rules(&[
        (Intent::SendTransaction, SEND_RULES),
        (Intent::CheckBalance, BALANCE_RULES),
        (Intent::CreateWallet, CREATE_RULES),
    ])
    .expect("builtin rule patterns must compile")
});

/// A successful rule hit: the intent plus the non-empty named captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'t> {
    pub intent: Intent,
    pub captures: HashMap<&'static str, &'t str>,
}

impl<'t> RuleMatch<'t> {
    /// Returns a capture by group name.
    pub fn get(&self, name: &str) -> Option<&'t str> {
        self.captures.get(name).copied()
    }
}

/// Parameter names a rule may capture.
const GROUPS: &[&str] = &["amount", "unit", "from", "to", "wallet", "name"];

/// Ordered collection of `(intent, rules)` entries.
#[derive(Debug, Clone)]
pub struct PatternTable {
    entries: Vec<(Intent, Vec<Regex>)>,
}

impl PatternTable {
    /// Compiles a table from `(intent, patterns)` pairs, preserving order.
    pub fn from_rules(rules: &[(Intent, &[&str])]) -> Result<Self, regex::Error> {
        let mut entries = Vec::with_capacity(rules.len());
        for (intent, patterns) in rules {
            let compiled = patterns
                .iter()
                .map(|p| Regex::new(p))
                .collect::<Result<Vec<_>, _>>()?;
            entries.push((*intent, compiled));
        }
        Ok(Self { entries })
    }

    /// The built-in table, compiled on first use.
    pub fn builtin() -> &'static PatternTable {
        &BUILTIN
    }

    /// Intents in the order they are tried.
    pub fn intents(&self) -> impl Iterator<Item = Intent> + '_ {
        self.entries.iter().map(|(intent, _)| *intent)
    }

    /// Number of rules across all intents.
    pub fn rule_count(&self) -> usize {
        self.entries.iter().map(|(_, rules)| rules.len()).sum()
    }

    /// Finds the first rule matching `normalized`.
    pub fn find<'t>(&self, normalized: &'t str) -> Option<RuleMatch<'t>> {
        self.entries.iter().find_map(|(intent, rules)| {
            rules.iter().find_map(|re| {
                let caps = re.captures(normalized)?;
                let captures = GROUPS
                    .iter()
                    .filter_map(|g| {
                        caps.name(g)
                            .map(|m| m.as_str())
                            .filter(|s| !s.is_empty())
                            .map(|s| (*g, s))
                    })
                    .collect();
                Some(RuleMatch {
                    intent: *intent,
                    captures,
                })
            })
        })
    }
}
