//! Aggregated metadata harvested from a gcode file.
//!
//! An [`ExtractionResult`] is produced once per file by the extraction
//! pass and then consumed read-only by the rewrite pass; it is never
//! updated after the scan completes.

use serde::{Deserialize, Serialize};

use crate::patterns;

/// The five placeholder tokens a slicer profile can embed in gcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placeholder {
    /// `!referenced_tools!` - the sorted list of tool indices used.
    ReferencedTools,
    /// `!colors!` - filament colors, one hex code per gate.
    Colors,
    /// `!temperatures!` - nozzle temperatures, one per gate.
    Temperatures,
    /// `!materials!` - material types, one per gate.
    Materials,
    /// `!purge_volumes!` - the flattened purge volume matrix.
    PurgeVolumes,
}

impl Placeholder {
    /// All placeholder kinds in substitution order.
    pub const ALL: [Placeholder; 5] = [
        Placeholder::ReferencedTools,
        Placeholder::Colors,
        Placeholder::Temperatures,
        Placeholder::Materials,
        Placeholder::PurgeVolumes,
    ];

    /// The literal token text as it appears in gcode.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::ReferencedTools => patterns::TOKEN_REFERENCED_TOOLS,
            Placeholder::Colors => patterns::TOKEN_COLORS,
            Placeholder::Temperatures => patterns::TOKEN_TEMPERATURES,
            Placeholder::Materials => patterns::TOKEN_MATERIALS,
            Placeholder::PurgeVolumes => patterns::TOKEN_PURGE_VOLUMES,
        }
    }
}

/// Which placeholder tokens were seen anywhere in the file.
///
/// Presence is latched on first occurrence and checked on every line,
/// comment or not; substitution later applies its own comment filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderSet {
    referenced_tools: bool,
    colors: bool,
    temperatures: bool,
    materials: bool,
    purge_volumes: bool,
}

impl PlaceholderSet {
    /// Mark a placeholder as present.
    pub fn insert(&mut self, placeholder: Placeholder) {
        match placeholder {
            Placeholder::ReferencedTools => self.referenced_tools = true,
            Placeholder::Colors => self.colors = true,
            Placeholder::Temperatures => self.temperatures = true,
            Placeholder::Materials => self.materials = true,
            Placeholder::PurgeVolumes => self.purge_volumes = true,
        }
    }

    /// Check whether a placeholder was seen.
    pub fn contains(&self, placeholder: Placeholder) -> bool {
        match placeholder {
            Placeholder::ReferencedTools => self.referenced_tools,
            Placeholder::Colors => self.colors,
            Placeholder::Temperatures => self.temperatures,
            Placeholder::Materials => self.materials,
            Placeholder::PurgeVolumes => self.purge_volumes,
        }
    }

    /// True when at least one placeholder was seen.
    pub fn any(&self) -> bool {
        Placeholder::ALL.iter().any(|p| self.contains(*p))
    }

    /// Remove every flag, disabling substitution for all kinds.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Everything the extraction pass learned about one gcode file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Tool indices referenced by tool-change commands, ascending, unique.
    pub tools_used: Vec<u16>,
    /// Filament colors as hex codes with any leading `#` stripped.
    pub colors: Vec<String>,
    /// Nozzle temperatures, kept as text tokens.
    pub temperatures: Vec<String>,
    /// Material types (PLA, PETG, ...), one per gate.
    pub materials: Vec<String>,
    /// Flattened purge volume matrix, kept as text tokens.
    pub purge_volumes: Vec<String>,
    /// Lower-cased slicer name from the first signature comment, if any.
    pub slicer: Option<String>,
    /// Placeholder tokens detected anywhere in the file.
    pub placeholders: PlaceholderSet,
}

impl ExtractionResult {
    /// True when at least one placeholder token was detected.
    pub fn has_placeholders(&self) -> bool {
        self.placeholders.any()
    }

    /// Comma-joined rendering of one placeholder's value list.
    pub fn rendering(&self, placeholder: Placeholder) -> String {
        match placeholder {
            Placeholder::ReferencedTools => self
                .tools_used
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(","),
            Placeholder::Colors => self.colors.join(","),
            Placeholder::Temperatures => self.temperatures.join(","),
            Placeholder::Materials => self.materials.join(","),
            Placeholder::PurgeVolumes => self.purge_volumes.join(","),
        }
    }
}
