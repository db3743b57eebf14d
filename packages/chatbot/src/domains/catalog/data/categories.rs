//! Category directory - the fixed set of catalog categories
//!
//! `value` is the name persisted in the `categories` table and sent back by the
//! command choices; `label` is what users read.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEntry {
    pub value: &'static str,
    pub label: &'static str,
}

/// Seeded in this order, so a fresh catalog assigns identifiers 1..=11.
pub const CATEGORIES: [CategoryEntry; 11] = [
    CategoryEntry { value: "crypto", label: "Cryptography" },
    CategoryEntry { value: "dev", label: "Dev/IA" },
    CategoryEntry { value: "forensics", label: "Forensics" },
    CategoryEntry { value: "hardware", label: "Hardware" },
    CategoryEntry { value: "misc", label: "Miscellaneous" },
    CategoryEntry { value: "osint", label: "OSINT" },
    CategoryEntry { value: "pwn", label: "Pwn" },
    CategoryEntry { value: "reverse", label: "Reverse" },
    CategoryEntry { value: "system", label: "System" },
    CategoryEntry { value: "web", label: "Web" },
    CategoryEntry { value: "web3", label: "Web3" },
];

pub fn find(value: &str) -> Option<&'static CategoryEntry> {
    CATEGORIES.iter().find(|entry| entry.value == value)
}

/// Display label for a persisted category name.
///
/// Names that are not in the directory (rows left by an older deployment)
/// are shown as they are stored.
pub fn label_for(value: &str) -> &str {
    find(value).map(|entry| entry.label).unwrap_or(value)
}
