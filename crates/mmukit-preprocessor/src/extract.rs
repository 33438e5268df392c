//! Extraction pass: a single forward scan that harvests slicer metadata.
//!
//! The scan never seeks backward and keeps only the aggregated results in
//! memory, so arbitrarily large files cost no more than their metadata.

use std::collections::BTreeSet;
use std::io::BufRead;

use crate::error::Result;
use crate::metadata::{ExtractionResult, Placeholder, PlaceholderSet};
use crate::patterns;

/// Completion state of one accumulating metadata table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Empty,
    Partial,
    Frozen,
}

/// When an accumulating table stops absorbing further comment lines.
#[derive(Debug, Clone, Copy)]
enum CompletionRule {
    /// The first matching comment line wins outright.
    FirstMatch,
    /// Keep absorbing until a line leaves every token non-empty. An
    /// earlier absorption containing blanks is discarded, so a slicer
    /// that emits a placeholder-only color line before the authoritative
    /// one cannot freeze the table on garbage.
    AllTokensNonEmpty,
}

/// One list-valued metadata field with its freeze rule.
#[derive(Debug)]
struct TokenList {
    state: FieldState,
    tokens: Vec<String>,
    rule: CompletionRule,
}

impl TokenList {
    fn new(rule: CompletionRule) -> Self {
        Self {
            state: FieldState::Empty,
            tokens: Vec::new(),
            rule,
        }
    }

    fn is_frozen(&self) -> bool {
        self.state == FieldState::Frozen
    }

    /// Absorb the tokens of one matching comment line.
    fn absorb<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = String>,
    {
        debug_assert!(!self.is_frozen());

        match self.rule {
            CompletionRule::FirstMatch => {
                self.tokens.extend(tokens);
                self.state = FieldState::Frozen;
            }
            CompletionRule::AllTokensNonEmpty => {
                if self.tokens.iter().any(|t| t.is_empty()) {
                    self.tokens.clear();
                }
                self.tokens.extend(tokens);
                self.state = if self.tokens.iter().all(|t| !t.is_empty()) {
                    FieldState::Frozen
                } else {
                    FieldState::Partial
                };
            }
        }
    }

    fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

/// Scan a gcode source and aggregate its MMU-relevant metadata.
///
/// Every line is run through the same independent checks: slicer
/// signature (comments only, first match wins), placeholder presence
/// (literal containment, any line), tool-change discovery, and the four
/// metadata tables with their completion rules. The scan reads the source
/// exactly once, forward only.
pub fn extract<R: BufRead>(reader: R) -> Result<ExtractionResult> {
    let mut slicer: Option<String> = None;
    let mut placeholders = PlaceholderSet::default();
    let mut tools_used: BTreeSet<u16> = BTreeSet::new();

    let mut colors = TokenList::new(CompletionRule::AllTokensNonEmpty);
    let mut temperatures = TokenList::new(CompletionRule::FirstMatch);
    let mut materials = TokenList::new(CompletionRule::FirstMatch);
    let mut purge_volumes = TokenList::new(CompletionRule::FirstMatch);

    for line in reader.lines() {
        let line = line?;

        if slicer.is_none() && line.starts_with(';') {
            if let Some(name) = patterns::match_slicer_signature(&line) {
                tracing::debug!("Detected slicer signature: {}", name);
                slicer = Some(name);
            }
        }

        for placeholder in Placeholder::ALL {
            if !placeholders.contains(placeholder) && line.contains(placeholder.token()) {
                placeholders.insert(placeholder);
            }
        }

        if let Some(tool) = patterns::match_tool_change(&line) {
            tools_used.insert(tool);
        }

        if !colors.is_frozen() {
            if let Some(raw) = patterns::match_colors_comment(&line) {
                colors.absorb(
                    raw.split(';')
                        .map(|c| c.trim().trim_start_matches('#').to_string()),
                );
            }
        }

        if !temperatures.is_frozen() {
            if let Some(raw) = patterns::match_temperatures_comment(&line) {
                temperatures.absorb(raw.trim().split([';', ',']).map(str::to_string));
            }
        }

        if !materials.is_frozen() {
            if let Some(raw) = patterns::match_materials_comment(&line) {
                materials.absorb(raw.trim().split(';').map(str::to_string));
            }
        }

        if !purge_volumes.is_frozen() {
            if let Some(raw) = patterns::match_purge_volumes_comment(&line) {
                purge_volumes.absorb(raw.trim().split(',').map(str::to_string));
            }
        }
    }

    Ok(ExtractionResult {
        tools_used: tools_used.into_iter().collect(),
        colors: colors.into_tokens(),
        temperatures: temperatures.into_tokens(),
        materials: materials.into_tokens(),
        purge_volumes: purge_volumes.into_tokens(),
        slicer,
        placeholders,
    })
}
