//! Rewrite pass: re-streams a gcode file with placeholder substitution
//! and tool-change restructuring.
//!
//! The pass is forward-only with one piece of lookahead state: after a
//! tool-select line, subsequent lines are buffered until a qualifying move
//! reveals the next toolhead position. Pathological input that never
//! issues a move after a tool-select buffers until end of file; the
//! buffered content is then emitted via a fallback so nothing is lost.
//!
//! Output always goes to a destination distinct from the source; a failed
//! rewrite can never corrupt the input file.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::metadata::{ExtractionResult, Placeholder};
use crate::patterns;

/// Counters for one rewrite run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Lines consumed from the source.
    pub lines_read: u64,
    /// Lines emitted to the destination, marker included.
    pub lines_written: u64,
    /// Tool-change commands synthesized.
    pub tool_changes: u64,
}

/// Lookahead state between a tool-select line and its qualifying move.
///
/// At most one tool change is ever pending. A tool-select line that
/// arrives while buffering is opaque buffered text, not a new change.
#[derive(Debug, Default)]
enum ToolChangeState {
    #[default]
    Idle,
    Buffering {
        tool: u16,
        lines: Vec<String>,
    },
}

/// Substitute placeholder tokens in one line.
///
/// Comment lines are returned unmodified so slicer metadata comments
/// survive even when they textually contain a token. Only placeholders
/// flagged present in `metadata` are considered; each is replaced with
/// the comma-joined rendering of its list.
pub fn substitute_placeholders(line: &str, metadata: &ExtractionResult) -> String {
    if line.starts_with(';') {
        return line.to_string();
    }

    let mut out = line.to_string();
    for placeholder in Placeholder::ALL {
        if metadata.placeholders.contains(placeholder) && out.contains(placeholder.token()) {
            out = out.replace(placeholder.token(), &metadata.rendering(placeholder));
        }
    }
    out
}

/// The enriched command emitted in place of a raw tool-select line.
fn tool_change_command(tool: u16, next_pos: Option<&patterns::MoveCoordinates>) -> String {
    match next_pos {
        Some(coords) => {
            let x = coords.x.as_deref().unwrap_or("");
            let y = coords.y.as_deref().unwrap_or("");
            format!("MMU_CHANGE_TOOL TOOL={} NEXT_POS=\"{},{}\" ; T{}", tool, x, y, tool)
        }
        None => format!("MMU_CHANGE_TOOL TOOL={} ; T{}", tool, tool),
    }
}

/// Re-stream a gcode source into `writer`, substituting placeholders and
/// restructuring tool changes.
///
/// The processed-file marker is always the first output line. Callers
/// hand in the [`ExtractionResult`] of a completed extraction pass over
/// the same source; `insert_next_pos` controls whether synthesized tool
/// changes carry a `NEXT_POS` clause taken from the following move line.
pub fn rewrite<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    metadata: &ExtractionResult,
    insert_next_pos: bool,
) -> Result<RewriteStats> {
    let mut stats = RewriteStats::default();
    let mut state = ToolChangeState::Idle;

    writeln!(writer, "{}", patterns::PROCESSED_MARKER)?;
    stats.lines_written += 1;

    for line in reader.lines() {
        let line = line?;
        stats.lines_read += 1;

        let line = substitute_placeholders(&line, metadata);

        state = match std::mem::take(&mut state) {
            ToolChangeState::Buffering { tool, mut lines } => {
                let next_pos = patterns::match_move_command(&line);
                lines.push(line);

                match next_pos {
                    Some(coords) => {
                        let command = if insert_next_pos {
                            tool_change_command(tool, Some(&coords))
                        } else {
                            tool_change_command(tool, None)
                        };
                        writeln!(writer, "{}", command)?;
                        stats.lines_written += 1;
                        stats.tool_changes += 1;

                        for buffered in lines {
                            writeln!(writer, "{}", buffered)?;
                            stats.lines_written += 1;
                        }
                        ToolChangeState::Idle
                    }
                    None => ToolChangeState::Buffering { tool, lines },
                }
            }
            ToolChangeState::Idle => match patterns::match_tool_change(&line) {
                Some(tool) => {
                    // The raw tool-select line is consumed here; only the
                    // lines after it are buffered.
                    ToolChangeState::Buffering {
                        tool,
                        lines: Vec::new(),
                    }
                }
                None => {
                    writeln!(writer, "{}", line)?;
                    stats.lines_written += 1;
                    ToolChangeState::Idle
                }
            },
        };
    }

    // A tool-select with no trailing move: restore the bare command, then
    // emit the enriched form and the held-back lines.
    if let ToolChangeState::Buffering { tool, lines } = state {
        writeln!(writer, "T{}", tool)?;
        writeln!(writer, "{}", tool_change_command(tool, None))?;
        stats.lines_written += 2;
        stats.tool_changes += 1;

        for buffered in lines {
            writeln!(writer, "{}", buffered)?;
            stats.lines_written += 1;
        }
    }

    writer.flush()?;
    Ok(stats)
}
