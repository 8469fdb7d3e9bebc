//! # Localized Text Resolution
//!
//! Picks one name (or description) out of the language variants a raw
//! product carries.
//!
//! ## Fallback Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Resolved language: { primary: "en", region: "GB" }                     │
//! │                                                                         │
//! │  localized = [ {en, US, "Gadget"}, {de, DE, "Gerät"}, {en, GB, "UK"} ] │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  keep primary == "en" (case-insensitive, source order)                  │
//! │       │   [ {en, US, "Gadget"}, {en, GB, "UK"} ]                        │
//! │       ▼                                                                 │
//! │  1. Regional: first with region == "GB"  ──► "UK"                       │
//! │  2. Standard: first of the filtered list ──► "Gadget"                   │
//! │  3. Default:  the unlocalized value                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! First match wins at every step. Source order is the only tie-break.

use crate::preferences::LanguagePreference;
use crate::types::LocalizedText;

/// Which step of the fallback chain produced a resolved text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Primary language and region both matched.
    Regional,
    /// Only the primary language matched; first such entry.
    Standard,
    /// Nothing matched; the unlocalized value was kept.
    Default,
}

/// A resolved text together with the step that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedText<'a> {
    pub value: &'a str,
    pub matched: TextMatch,
}

/// Resolves one localized field.
///
/// `localized` is `None` when the raw record carries no variants for the
/// field; that is not an error and yields the default.
pub fn resolve_text<'a>(
    default: &'a str,
    localized: Option<&'a [LocalizedText]>,
    language: &LanguagePreference,
) -> ResolvedText<'a> {
    let mut standard: Option<&'a str> = None;

    for entry in localized.unwrap_or_default() {
        if !tags_match(&entry.language_tag, language.primary()) {
            continue;
        }
        if tags_match(&entry.region_tag, language.region()) {
            return ResolvedText {
                value: &entry.value,
                matched: TextMatch::Regional,
            };
        }
        if standard.is_none() {
            standard = Some(&entry.value);
        }
    }

    match standard {
        Some(value) => ResolvedText {
            value,
            matched: TextMatch::Standard,
        },
        None => ResolvedText {
            value: default,
            matched: TextMatch::Default,
        },
    }
}

/// Language and region subtags compare case-insensitively.
#[inline]
fn tags_match(candidate: &str, wanted: &str) -> bool {
    candidate.eq_ignore_ascii_case(wanted)
}

// =============================================================================
// Unit Tests
// =============================================================================
