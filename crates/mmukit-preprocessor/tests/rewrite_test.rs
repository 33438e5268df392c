use mmukit_preprocessor::{extract, rewrite, ExtractionResult, RewriteStats};
use std::io::Cursor;

fn run(input: &str, insert_next_pos: bool) -> (String, RewriteStats) {
    let metadata = extract(Cursor::new(input)).unwrap();
    run_with(input, &metadata, insert_next_pos)
}

fn run_with(
    input: &str,
    metadata: &ExtractionResult,
    insert_next_pos: bool,
) -> (String, RewriteStats) {
    let mut out = Vec::new();
    let stats = rewrite(Cursor::new(input), &mut out, metadata, insert_next_pos).unwrap();
    (String::from_utf8(out).unwrap(), stats)
}

#[test]
fn test_output_always_starts_with_marker() {
    for input in ["", "G28\n", "T0\nG1 X0 Y0\n", "; only a comment\n"] {
        let (out, _) = run(input, true);
        assert!(out.starts_with("; processed by HappyHare\n"));
        let markers = out
            .lines()
            .filter(|l| *l == "; processed by HappyHare")
            .count();
        assert_eq!(markers, 1);
    }
}

#[test]
fn test_realistic_multi_tool_print() {
    let input = "\
; generated by PrusaSlicer 2.7.1 on 2024-01-15\n\
; extruder_colour = #FF0000;#00FF00\n\
; temperature = 210;240\n\
; filament_type = PLA;PETG\n\
MMU_START_SETUP TOOLS=!referenced_tools! COLORS=!colors!\n\
G28\n\
T0\n\
M104 S210\n\
G1 X10.5 Y20 F3000\n\
G1 E2 F1800\n\
T1\n\
M104 S240\n\
G0 X50 Y60\n\
M400\n";

    let (out, stats) = run(input, true);

    assert!(out.starts_with("; processed by HappyHare\n"));
    assert!(out.contains("MMU_START_SETUP TOOLS=0,1 COLORS=FF0000,00FF00\n"));
    assert!(out.contains("MMU_CHANGE_TOOL TOOL=0 NEXT_POS=\"10.5,20\" ; T0\nM104 S210\nG1 X10.5 Y20 F3000\n"));
    assert!(out.contains("MMU_CHANGE_TOOL TOOL=1 NEXT_POS=\"50,60\" ; T1\nM104 S240\nG0 X50 Y60\n"));
    // Raw tool-select lines are gone
    assert!(!out.lines().any(|l| l == "T0" || l == "T1"));
    assert_eq!(stats.tool_changes, 2);
    // Comment metadata is preserved byte for byte
    assert!(out.contains("; extruder_colour = #FF0000;#00FF00\n"));
}

#[test]
fn test_no_tool_changes_passes_through() {
    let input = "G28\nG1 X5 Y5\nM104 S200\n";
    let (out, stats) = run(input, true);
    assert_eq!(out, format!("; processed by HappyHare\n{}", input));
    assert_eq!(stats.tool_changes, 0);
    assert_eq!(stats.lines_read, 3);
    assert_eq!(stats.lines_written, 4);
}

#[test]
fn test_eof_fallback_keeps_everything() {
    let input = "T2\n; comment\nM104 S200\n";
    let (out, stats) = run(input, true);
    assert_eq!(
        out,
        "; processed by HappyHare\n\
         T2\n\
         MMU_CHANGE_TOOL TOOL=2 ; T2\n\
         ; comment\n\
         M104 S200\n"
    );
    assert_eq!(stats.tool_changes, 1);
}

#[test]
fn test_substitution_disabled_by_empty_flags() {
    // Callers disable substitution by handing in cleared presence flags
    let input = "MAP=!colors!\nT0\nG1 X0 Y0\n";
    let mut metadata = extract(Cursor::new(input)).unwrap();
    metadata.placeholders.clear();

    let (out, _) = run_with(input, &metadata, false);
    assert!(out.contains("MAP=!colors!\n"));
    assert!(out.contains("MMU_CHANGE_TOOL TOOL=0 ; T0\n"));
}

#[test]
fn test_rewrite_of_own_output_finds_no_tokens() {
    let input = "MMU_START TOOLS=!referenced_tools!\nT0\nG1 X0 Y0\n";
    let metadata = extract(Cursor::new(input)).unwrap();
    let (first, _) = run_with(input, &metadata, false);

    // The substituted output contains no placeholder tokens any more
    let metadata_again = extract(Cursor::new(first.as_str())).unwrap();
    assert!(!metadata_again.has_placeholders());
    // ... and its first line is the marker the orchestrator keys on
    assert!(first.starts_with("; processed by HappyHare\n"));
}
