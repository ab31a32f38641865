//! Basketball slot vocabulary and eligibility expansion.
//!
//! The classic DFS basketball roster has eight slots: the five base
//! positions, two flexible slots (`G` takes either guard, `F` takes either
//! forward) and a utility slot open to anyone. Upstream feeds usually tag a
//! player with base positions only; [`eligible_slots`] expands those into
//! the full slot-label set expected by the pool builder.

/// Slot labels of the 8-slot basketball plan, in plan order.
pub const SLOT_LABELS: [&str; 8] = ["PG", "SG", "SF", "PF", "C", "G", "F", "UTIL"];

/// Base positions a basketball player may carry.
pub const POSITIONS: [&str; 5] = ["PG", "SG", "SF", "PF", "C"];

/// Expands base positions into the full set of eligible slot labels.
///
/// Unknown position strings are ignored; the caller's pool build will
/// reject a player whose eligible set comes out empty.
///
/// # Example
///
/// ```
/// use lineupforge_core::nba;
///
/// assert_eq!(nba::eligible_slots(&["PG"]), vec!["PG", "G", "UTIL"]);
/// assert_eq!(nba::eligible_slots(&["C"]), vec!["C", "UTIL"]);
/// ```
pub fn eligible_slots(positions: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |label: &str| {
        if !out.iter().any(|l| l == label) {
            out.push(label.to_string());
        }
    };
    for pos in positions {
        match *pos {
            "PG" | "SG" => {
                push(pos);
                push("G");
                push("UTIL");
            }
            "SF" | "PF" => {
                push(pos);
                push("F");
                push("UTIL");
            }
            "C" => {
                push("C");
                push("UTIL");
            }
            _ => {}
        }
    }
    // Plan order, not discovery order
    let mut ordered: Vec<String> = Vec::with_capacity(out.len());
    for label in SLOT_LABELS {
        if out.iter().any(|l| l == label) {
            ordered.push(label.to_string());
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_expansion() {
        assert_eq!(eligible_slots(&["SG"]), vec!["SG", "G", "UTIL"]);
    }

    #[test]
    fn test_dual_position_expansion() {
        assert_eq!(
            eligible_slots(&["PF", "C"]),
            vec!["PF", "C", "F", "UTIL"]
        );
    }

    #[test]
    fn test_unknown_position_ignored() {
        assert!(eligible_slots(&["K"]).is_empty());
    }
}
