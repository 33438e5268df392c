use mmukit_preprocessor::{extract, rewrite};
use proptest::prelude::*;
use std::io::Cursor;

proptest! {
    #[test]
    fn tools_used_is_sorted_and_unique(ids in proptest::collection::vec(0u16..100, 0..24)) {
        let input: String = ids.iter().map(|t| format!("T{}\n", t)).collect();
        let result = extract(Cursor::new(input)).unwrap();

        prop_assert!(result.tools_used.windows(2).all(|w| w[0] < w[1]));
        for id in &ids {
            prop_assert!(result.tools_used.contains(id));
        }
    }

    #[test]
    fn rewrite_preserves_tool_change_count(ids in proptest::collection::vec(0u16..100, 0..12)) {
        // Well-formed input: every tool-select is followed by a move
        let mut input = String::new();
        for id in &ids {
            input.push_str(&format!("T{}\nG1 X{} Y{}\n", id, id, id));
        }

        let metadata = extract(Cursor::new(input.as_str())).unwrap();
        let mut out = Vec::new();
        let stats = rewrite(Cursor::new(input.as_str()), &mut out, &metadata, true).unwrap();
        let text = String::from_utf8(out).unwrap();

        let synthesized = text
            .lines()
            .filter(|l| l.starts_with("MMU_CHANGE_TOOL"))
            .count();
        prop_assert_eq!(synthesized, ids.len());
        prop_assert_eq!(stats.tool_changes as usize, ids.len());
    }

    #[test]
    fn rewrite_never_loses_move_lines(ids in proptest::collection::vec(0u16..100, 1..8)) {
        let mut input = String::new();
        for id in &ids {
            input.push_str(&format!("T{}\nG1 X{} Y{}\n", id, id, id));
        }

        let metadata = extract(Cursor::new(input.as_str())).unwrap();
        let mut out = Vec::new();
        rewrite(Cursor::new(input.as_str()), &mut out, &metadata, false).unwrap();
        let text = String::from_utf8(out).unwrap();

        for id in &ids {
            let move_line = format!("G1 X{} Y{}", id, id);
            prop_assert!(text.lines().any(|l| l == move_line));
        }
    }
}
