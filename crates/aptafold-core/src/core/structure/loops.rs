use super::dot_bracket::{CLOSE, OPEN, UNPAIRED};
use crate::core::models::fold::StructuralMetrics;

/// Counts loop regions and the nucleotides inside them.
///
/// A loop is a maximal run of unpaired bases (`.`) that lies strictly inside at least
/// one base pair. The scan tracks pairing depth with a plain counter; only whether the
/// depth is zero ever matters. Unpaired bases at depth zero (dangling ends) are not
/// counted.
///
/// Any bracket or foreign character ends the current run. An unmatched `)` at depth
/// zero leaves both the depth and the counts untouched.
///
/// The function is total: malformed or non dot-bracket input never fails, it only
/// degrades to smaller counts.
///
/// # Arguments
///
/// * `structure` - A dot-bracket string, possibly empty or malformed.
///
/// # Return
///
/// Returns the loop count and the number of nucleotides in loops.
pub fn analyze(structure: &str) -> StructuralMetrics {
    let mut depth: usize = 0;
    let mut inside_counted_loop = false;
    let mut metrics = StructuralMetrics::default();

    for c in structure.chars() {
        match c {
            OPEN => {
                depth += 1;
                inside_counted_loop = false;
            }
            CLOSE => {
                depth = depth.saturating_sub(1);
                inside_counted_loop = false;
            }
            UNPAIRED if depth > 0 => {
                metrics.nucleotides_in_loops += 1;
                if !inside_counted_loop {
                    metrics.loop_count += 1;
                    inside_counted_loop = true;
                }
            }
            UNPAIRED => {}
            _ => inside_counted_loop = false,
        }
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(structure: &str) -> (usize, usize) {
        let m = analyze(structure);
        (m.loop_count, m.nucleotides_in_loops)
    }

    #[test]
    fn empty_structure_has_no_loops() {
        assert_eq!(counts(""), (0, 0));
    }

    #[test]
    fn unpaired_bases_outside_pairs_are_not_loops() {
        assert_eq!(counts("..."), (0, 0));
        assert_eq!(counts("..((..)).."), (1, 2));
    }

    #[test]
    fn hairpin_counts_single_loop() {
        assert_eq!(counts("(...)"), (1, 3));
        assert_eq!(counts("(((...)))"), (1, 3));
    }

    #[test]
    fn sibling_hairpins_count_separately() {
        assert_eq!(counts("(..)(..)"), (2, 4));
    }

    #[test]
    fn closing_bracket_starts_new_loop_at_same_depth() {
        assert_eq!(counts("(.().)"), (2, 2));
    }

    #[test]
    fn interior_and_bulge_loops_are_counted() {
        assert_eq!(counts("((.((..((...))..))))"), (4, 8));
    }

    #[test]
    fn unmatched_close_at_depth_zero_is_ignored() {
        assert_eq!(counts("))..(("), (0, 0));
        assert_eq!(counts(")(..)"), (1, 2));
    }

    #[test]
    fn dots_after_outermost_pair_closes_are_dangling() {
        assert_eq!(counts("(..)..)"), (1, 2));
        assert_eq!(counts("((..)..)"), (2, 4));
    }

    #[test]
    fn unclosed_pairs_still_count_inner_dots() {
        assert_eq!(counts("((..."), (1, 3));
    }

    #[test]
    fn foreign_characters_break_runs_without_counting() {
        assert_eq!(counts("(..x..)"), (2, 4));
        assert_eq!(counts("(.[.].)"), (3, 3));
        assert_eq!(counts("(xyz)"), (0, 0));
    }

    #[test]
    fn loop_nucleotides_never_fewer_than_loops() {
        let alphabet = ['(', ')', '.'];
        for len in 0..=8u32 {
            for mut code in 0..3usize.pow(len) {
                let mut s = String::with_capacity(len as usize);
                for _ in 0..len {
                    s.push(alphabet[code % 3]);
                    code /= 3;
                }
                let m = analyze(&s);
                assert!(
                    m.nucleotides_in_loops >= m.loop_count,
                    "invariant violated for {:?}: {:?}",
                    s,
                    m
                );
            }
        }
    }
}
