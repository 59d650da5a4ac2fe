//! Localized text selection as ordered fallback chains.
//!
//! A chain is a list of [`Fallback`] tiers tried in order; the first tier that
//! yields a value wins. Adding a locale or a tier means adding an element.
use crate::pokemon::{Move, Name, VerboseEffect};

pub const NO_EFFECT_TEXT: &str = "No description";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Entry whose language matches this locale code.
    Locale(String),
    /// First entry regardless of language.
    FirstAvailable,
    /// The resource's canonical (non-localized) value.
    Canonical,
    /// Fixed text.
    Placeholder(&'static str),
}

/// Locale-aware text picker for move resources.
#[derive(Debug, Clone)]
pub struct LocalePolicy {
    name_chain: Vec<Fallback>,
    effect_chain: Vec<Fallback>,
}

impl LocalePolicy {
    pub fn new(locales: &[String]) -> Self {
        let localized = locales.iter().cloned().map(Fallback::Locale);

        let mut name_chain: Vec<Fallback> = localized.clone().collect();
        name_chain.push(Fallback::Canonical);

        let mut effect_chain: Vec<Fallback> = localized.collect();
        effect_chain.push(Fallback::FirstAvailable);
        effect_chain.push(Fallback::Placeholder(NO_EFFECT_TEXT));

        Self {
            name_chain,
            effect_chain,
        }
    }

    pub fn name_chain(&self) -> &[Fallback] {
        &self.name_chain
    }

    pub fn effect_chain(&self) -> &[Fallback] {
        &self.effect_chain
    }

    pub fn display_name(&self, mv: &Move) -> String {
        self.name_chain
            .iter()
            .find_map(|tier| name_tier(tier, mv))
            .unwrap_or_else(|| mv.name.clone())
    }

    pub fn short_effect(&self, mv: &Move) -> String {
        self.effect_chain
            .iter()
            .find_map(|tier| effect_tier(tier, &mv.effect_entries))
            .unwrap_or_else(|| NO_EFFECT_TEXT.to_string())
    }
}

fn name_tier(tier: &Fallback, mv: &Move) -> Option<String> {
    match tier {
        Fallback::Locale(code) => find_name(&mv.names, code),
        Fallback::FirstAvailable => mv.names.first().map(|n| n.name.clone()),
        Fallback::Canonical => Some(mv.name.clone()),
        Fallback::Placeholder(text) => Some(text.to_string()),
    }
}

fn effect_tier(tier: &Fallback, entries: &[VerboseEffect]) -> Option<String> {
    match tier {
        Fallback::Locale(code) => entries
            .iter()
            .find(|e| e.language.name == *code)
            .map(|e| e.short_effect.clone()),
        Fallback::FirstAvailable => entries.first().map(|e| e.short_effect.clone()),
        // Effects have no canonical field.
        Fallback::Canonical => None,
        Fallback::Placeholder(text) => Some(text.to_string()),
    }
}

fn find_name(names: &[Name], code: &str) -> Option<String> {
    names
        .iter()
        .find(|n| n.language.name == code)
        .map(|n| n.name.clone())
}
