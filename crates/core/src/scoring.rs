//! Scoring module - line clear points, drop bonuses and level pacing
//!
//! Line clears use the classic NES table scaled by 10 and multiplied by
//! `level + 1`. Drop bonuses are fractions of the two-row score.

use crate::types::{
    DELAY_DIVISOR_FOR_LEVEL_UP, DELAY_FACTOR_FOR_LEVEL_UP, FILLED_ROWS_FOR_LEVEL_UP,
    SCORE_1_FILLED_ROW, SCORE_2_FILLED_ROW, SCORE_3_FILLED_ROW, SCORE_4_FILLED_ROW,
    SCORE_DROP_DIVISOR, SCORE_DROP_WITH_SHADOW_DIVISOR, SCORE_MOVE_DOWN_DIVISOR,
};

/// Points for clearing `rows` rows at `level`.
///
/// Returns `None` for a row count a single piece cannot produce (0 or more
/// than 4).
pub fn calculate_line_score(rows: usize, level: u32) -> Option<u64> {
    let base = match rows {
        1 => SCORE_1_FILLED_ROW,
        2 => SCORE_2_FILLED_ROW,
        3 => SCORE_3_FILLED_ROW,
        4 => SCORE_4_FILLED_ROW,
        _ => return None,
    };
    Some(base * level_multiplier(level))
}

/// Bonus for one player-requested downward step
pub fn soft_drop_score(level: u32) -> u64 {
    SCORE_2_FILLED_ROW * level_multiplier(level) / SCORE_MOVE_DOWN_DIVISOR
}

/// Bonus for a hard drop; smaller when the shadow piece was visible
pub fn hard_drop_score(level: u32, shadow_shown: bool) -> u64 {
    let divisor = if shadow_shown {
        SCORE_DROP_WITH_SHADOW_DIVISOR
    } else {
        SCORE_DROP_DIVISOR
    };
    SCORE_2_FILLED_ROW * level_multiplier(level) / divisor
}

/// Whether `lines` cleared in total are enough to leave `level`
pub fn reaches_next_level(lines: u32, level: u32) -> bool {
    lines >= FILLED_ROWS_FOR_LEVEL_UP * (level + 1)
}

/// Fall delay after a level up (x0.9, truncated)
pub fn next_fall_delay(delay_ms: u32) -> u32 {
    let scaled = u64::from(delay_ms) * u64::from(DELAY_FACTOR_FOR_LEVEL_UP)
        / u64::from(DELAY_DIVISOR_FOR_LEVEL_UP);
    scaled as u32
}

fn level_multiplier(level: u32) -> u64 {
    u64::from(level) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(1, 0), Some(400));
        assert_eq!(calculate_line_score(2, 0), Some(1000));
        assert_eq!(calculate_line_score(3, 1), Some(6000));
        assert_eq!(calculate_line_score(4, 2), Some(36000));
    }

    #[test]
    fn test_impossible_row_counts() {
        assert_eq!(calculate_line_score(0, 0), None);
        assert_eq!(calculate_line_score(5, 3), None);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(soft_drop_score(0), 1);
        assert_eq!(soft_drop_score(4), 5);
        assert_eq!(hard_drop_score(0, false), 50);
        assert_eq!(hard_drop_score(0, true), 10);
        assert_eq!(hard_drop_score(2, false), 150);
        assert_eq!(hard_drop_score(2, true), 30);
    }

    #[test]
    fn test_level_threshold() {
        assert!(!reaches_next_level(9, 0));
        assert!(reaches_next_level(10, 0));
        assert!(!reaches_next_level(19, 1));
        assert!(reaches_next_level(20, 1));
    }

    #[test]
    fn test_fall_delay_compounds() {
        assert_eq!(next_fall_delay(1000), 900);
        assert_eq!(next_fall_delay(900), 810);
        assert_eq!(next_fall_delay(810), 729);
        assert_eq!(next_fall_delay(729), 656);
    }

    #[test]
    fn test_fall_delay_handles_large_values() {
        assert_eq!(next_fall_delay(u32::MAX), 3_865_470_565);
        assert_eq!(next_fall_delay(500_000_000), 450_000_000);
    }
}
