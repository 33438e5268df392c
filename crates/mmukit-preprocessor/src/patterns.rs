//! Line-matching rules shared by the extraction and rewrite passes.
//!
//! Every matcher operates on one line of text with its terminator already
//! stripped and either rejects the line or returns the captured pieces.
//! Matching is deliberately shallow: lines that fit none of the rules are
//! not errors, they simply pass through whatever pass is running.
//!
//! Slicer coverage notes:
//! - PrusaSlicer/SuperSlicer emit `extruder_colour`, Orca emits
//!   `filament_colour` (an `extruder_colour` line can also exist empty).
//! - Orca prefixes the temperature key with `nozzle_`.
//! - Purge volumes are `flush_volumes_matrix` in Orca,
//!   `wiping_volumes_matrix` in PrusaSlicer.

use regex::Regex;
use std::sync::OnceLock;

/// Marker written as the first line of every processed file.
pub const PROCESSED_MARKER: &str = "; processed by HappyHare";

/// Placeholder token replaced with the referenced tool list.
pub const TOKEN_REFERENCED_TOOLS: &str = "!referenced_tools!";

/// Placeholder token replaced with the filament color table.
pub const TOKEN_COLORS: &str = "!colors!";

/// Placeholder token replaced with the nozzle temperature table.
pub const TOKEN_TEMPERATURES: &str = "!temperatures!";

/// Placeholder token replaced with the filament material table.
pub const TOKEN_MATERIALS: &str = "!materials!";

/// Placeholder token replaced with the purge volume matrix.
pub const TOKEN_PURGE_VOLUMES: &str = "!purge_volumes!";

/// True when a line carries the already-processed marker.
///
/// Only meaningful for the first line of a file; the orchestrator uses it
/// to skip files that have been through the rewrite pass before.
pub fn is_processed_marker(line: &str) -> bool {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    let re = MARKER.get_or_init(|| {
        Regex::new(r"(?i)^; processed by HappyHare").expect("invalid regex pattern")
    });
    re.is_match(line)
}

/// Extract the slicer name from a `generated by <slicer>` comment line.
///
/// Returns the name lower-cased. Callers should only try this on comment
/// lines and keep the first match.
pub fn match_slicer_signature(line: &str) -> Option<String> {
    static SLICER: OnceLock<Regex> = OnceLock::new();
    let re = SLICER.get_or_init(|| {
        Regex::new(r"(?i)^;.*generated by ([a-z]*) .*$").expect("invalid regex pattern")
    });
    re.captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// Extract the tool number from a tool-select line.
///
/// Recognizes both the raw `MMU_CHANGE_TOOL[_STANDALONE] ... TOOL=n` form
/// and the bare `Tn` form, case-insensitively, with a 1-2 digit tool
/// number. Used by extraction for tool discovery and by the rewrite pass
/// to detect lines that need restructuring.
pub fn match_tool_change(line: &str) -> Option<u16> {
    static TOOL: OnceLock<Regex> = OnceLock::new();
    let re = TOOL.get_or_init(|| {
        Regex::new(r"(?i)((^MMU_CHANGE_TOOL(_STANDALONE)? .*?TOOL=)|(^T))(?P<tool>\d{1,2})")
            .expect("invalid regex pattern")
    });
    re.captures(line)
        .and_then(|c| c.name("tool"))
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract the raw value of an `extruder_colour`/`filament_colour` comment.
///
/// The returned text still carries the `#` prefixes and `;` separators;
/// the caller splits and strips.
pub fn match_colors_comment(line: &str) -> Option<&str> {
    static COLORS: OnceLock<Regex> = OnceLock::new();
    let re = COLORS.get_or_init(|| {
        Regex::new(r"(?i)^; (?:extruder_colour|filament_colour) = (#.*;.*)$")
            .expect("invalid regex pattern")
    });
    re.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Extract the raw value of a `[nozzle_]temperature` comment.
pub fn match_temperatures_comment(line: &str) -> Option<&str> {
    static TEMPS: OnceLock<Regex> = OnceLock::new();
    let re = TEMPS.get_or_init(|| {
        Regex::new(r"(?i)^; (nozzle_)?temperature =(.*)$").expect("invalid regex pattern")
    });
    re.captures(line).and_then(|c| c.get(2)).map(|m| m.as_str())
}

/// Extract the raw value of a `filament_type` comment.
pub fn match_materials_comment(line: &str) -> Option<&str> {
    static MATERIALS: OnceLock<Regex> = OnceLock::new();
    let re = MATERIALS
        .get_or_init(|| Regex::new(r"(?i)^; filament_type =(.*)$").expect("invalid regex pattern"));
    re.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Extract the raw value of a purge volume matrix comment.
pub fn match_purge_volumes_comment(line: &str) -> Option<&str> {
    static PURGE: OnceLock<Regex> = OnceLock::new();
    let re = PURGE.get_or_init(|| {
        Regex::new(r"(?i)^; (flush_volumes_matrix|wiping_volumes_matrix) =(.*)$")
            .expect("invalid regex pattern")
    });
    re.captures(line).and_then(|c| c.get(2)).map(|m| m.as_str())
}

/// X/Y coordinate text captured from a move line.
///
/// Coordinates are kept verbatim as text, never parsed numerically. An
/// axis can be present with an empty value (`G1 X F1200`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCoordinates {
    /// X coordinate text, if the axis appeared.
    pub x: Option<String>,
    /// Y coordinate text, if the axis appeared.
    pub y: Option<String>,
}

/// Match a `G0`/`G1` move that carries at least one X or Y argument.
///
/// The coordinate arguments must directly follow the command word; when an
/// axis repeats, the last occurrence wins.
pub fn match_move_command(line: &str) -> Option<MoveCoordinates> {
    static MOVE: OnceLock<Regex> = OnceLock::new();
    let re = MOVE.get_or_init(|| {
        Regex::new(r"^G[01](?:\s+X([\d.]*)|\s+Y([\d.]*))+.*$").expect("invalid regex pattern")
    });
    re.captures(line).map(|c| MoveCoordinates {
        x: c.get(1).map(|m| m.as_str().to_string()),
        y: c.get(2).map(|m| m.as_str().to_string()),
    })
}
