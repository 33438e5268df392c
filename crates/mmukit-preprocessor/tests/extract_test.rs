use mmukit_preprocessor::{extract, ExtractionResult, Placeholder};
use std::io::Cursor;

fn extract_str(input: &str) -> ExtractionResult {
    extract(Cursor::new(input)).unwrap()
}

#[test]
fn test_full_prusaslicer_header() {
    let input = "\
; generated by PrusaSlicer 2.7.1 on 2024-01-15\n\
;\n\
M104 S210\n\
T0\n\
G1 X5 Y5\n\
T2\n\
G1 X6 Y6\n\
; extruder_colour = #FF8000;#0080FF;#804000\n\
; filament_type = PLA;PLA;PETG\n\
; temperature = 210;210;240\n\
; wiping_volumes_matrix = 0,140,140,0,140,140,0,140,140\n";

    let result = extract_str(input);
    assert_eq!(result.slicer.as_deref(), Some("prusaslicer"));
    assert_eq!(result.tools_used, vec![0, 2]);
    assert_eq!(result.colors, vec!["FF8000", "0080FF", "804000"]);
    assert_eq!(result.materials, vec!["PLA", "PLA", "PETG"]);
    assert_eq!(result.temperatures, vec!["210", "210", "240"]);
    assert_eq!(result.purge_volumes.len(), 9);
    assert!(!result.has_placeholders());
}

#[test]
fn test_orca_variants() {
    let input = "\
; some model generated by OrcaSlicer 1.9.0 build\n\
; filament_colour = #112233;#445566\n\
; nozzle_temperature = 220,230\n\
; flush_volumes_matrix = 0,90,90,0\n";

    let result = extract_str(input);
    assert_eq!(result.slicer.as_deref(), Some("orcaslicer"));
    assert_eq!(result.colors, vec!["112233", "445566"]);
    assert_eq!(result.temperatures, vec!["220", "230"]);
    assert_eq!(result.purge_volumes, vec!["0", "90", "90", "0"]);
}

#[test]
fn test_placeholders_detected_in_macro_lines() {
    let input = "\
MMU_START_SETUP TOOLS=!referenced_tools!\n\
MMU_START_LOAD_INITIAL_TOOL COLORS=!colors! TEMPS=!temperatures!\n\
MMU_SET_PURGE MATRIX=!purge_volumes!\n";

    let result = extract_str(input);
    assert!(result.placeholders.contains(Placeholder::ReferencedTools));
    assert!(result.placeholders.contains(Placeholder::Colors));
    assert!(result.placeholders.contains(Placeholder::Temperatures));
    assert!(result.placeholders.contains(Placeholder::PurgeVolumes));
    assert!(!result.placeholders.contains(Placeholder::Materials));
}

#[test]
fn test_placeholder_detected_inside_comment() {
    // Presence detection ignores the comment distinction; only the
    // substitution step filters comments out.
    let result = extract_str("; tool map: !materials!\n");
    assert!(result.placeholders.contains(Placeholder::Materials));
}

#[test]
fn test_tool_discovery_both_forms() {
    let input = "T4\nMMU_CHANGE_TOOL TOOL=9\nMMU_CHANGE_TOOL_STANDALONE RESET=1 TOOL=1\nt4\n";
    let result = extract_str(input);
    assert_eq!(result.tools_used, vec![1, 4, 9]);
}

#[test]
fn test_tools_used_strictly_ascending() {
    let result = extract_str("T9\nT3\nT9\nT0\nT3\n");
    assert_eq!(result.tools_used, vec![0, 3, 9]);
    assert!(result.tools_used.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_color_completion_rule() {
    // An empty-color line must not freeze the list; the later complete
    // line replaces it entirely.
    let input = "\
; extruder_colour = #;#AA;#BBCCDD\n\
; extruder_colour = #112233;#AABBCC;#BBCCDD\n";
    let result = extract_str(input);
    assert_eq!(result.colors, vec!["112233", "AABBCC", "BBCCDD"]);
}

#[test]
fn test_unrecognized_lines_are_ignored() {
    let input = "M862.3 P \"MK3S\"\nnot gcode at all\n\x20\n";
    let result = extract_str(input);
    assert_eq!(result, ExtractionResult::default());
}
