use crate::domain::RankState;

/// Points a full tier is worth on the linear scale
pub const POINTS_PER_TIER: i32 = 100;

/// Points remaining before `target_tier` is reached.
///
/// Returns `None` when the player is already at or above the target.
/// A negative value means `points_in_tier` overflowed its tier block; callers
/// report it rather than clamping. Values outside `i32` saturate, so a corrupt
/// payload still comes out negative and is reported the same way.
pub fn points_to_target(tier_index: u32, points_in_tier: u32, target_tier: u32) -> Option<i32> {
    if tier_index >= target_tier {
        return None;
    }
    let tiers_remaining = i64::from(target_tier - tier_index);
    Some(saturate(
        tiers_remaining * i64::from(POINTS_PER_TIER) - i64::from(points_in_tier),
    ))
}

/// Points between the bottom of `tier_index` and the bottom of `target_tier`
pub fn total_points_needed(tier_index: u32, target_tier: u32) -> i32 {
    saturate((i64::from(target_tier) - i64::from(tier_index)) * i64::from(POINTS_PER_TIER))
}

/// Percentage of the climb already done, in `[0, 100]`
pub fn progress_percent(points_to_target: i32, total_points_needed: i32) -> u8 {
    if total_points_needed <= 0 {
        return 100;
    }
    let done = 1.0 - f64::from(points_to_target) / f64::from(total_points_needed);
    (done * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Signed movement between two observations, counting tier changes as full blocks.
///
/// `None` when the movement does not fit in an `i32`.
pub fn delta(old: &RankState, new: &RankState) -> Option<i32> {
    let points_diff = i64::from(new.points_in_tier) - i64::from(old.points_in_tier);
    let tier_diff = i64::from(new.tier_index) - i64::from(old.tier_index);
    i32::try_from(points_diff + tier_diff * i64::from(POINTS_PER_TIER)).ok()
}

fn saturate(points: i64) -> i32 {
    i32::try_from(points).unwrap_or(if points < 0 { i32::MIN } else { i32::MAX })
}

/// Progress of a rank state toward a target tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetProgress {
    Reached,
    Remaining { points: i32, percent: u8 },
}

impl TargetProgress {
    pub fn evaluate(rank: &RankState, target_tier: u32) -> Self {
        match points_to_target(rank.tier_index, rank.points_in_tier, target_tier) {
            None => TargetProgress::Reached,
            Some(points) => {
                let total = total_points_needed(rank.tier_index, target_tier);
                TargetProgress::Remaining {
                    points,
                    percent: progress_percent(points, total),
                }
            }
        }
    }

    pub fn points(&self) -> Option<i32> {
        match self {
            TargetProgress::Reached => None,
            TargetProgress::Remaining { points, .. } => Some(*points),
        }
    }

    pub fn percent(&self) -> Option<u8> {
        match self {
            TargetProgress::Reached => None,
            TargetProgress::Remaining { percent, .. } => Some(*percent),
        }
    }

    pub fn is_anomalous(&self) -> bool {
        matches!(self, TargetProgress::Remaining { points, .. } if *points < 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(tier: u32, points: u32) -> RankState {
        RankState::new(tier, points, "test")
    }

    #[test]
    fn test_points_to_target_absent_iff_at_or_above_target() {
        for tier in 0..=27 {
            let result = points_to_target(tier, 50, 24);
            assert_eq!(result.is_none(), tier >= 24, "tier {tier}");
        }
    }

    #[test]
    fn test_points_to_target_strictly_decreasing_in_points() {
        for tier in 3..24 {
            let values: Vec<i32> = (0..=100)
                .map(|pts| points_to_target(tier, pts, 24).unwrap())
                .collect();
            assert!(values.windows(2).all(|w| w[1] < w[0]), "tier {tier}");
        }
    }

    #[test]
    fn test_points_to_target_above_target_is_never_negative() {
        assert_eq!(points_to_target(25, 40, 24), None);
        assert_eq!(
            TargetProgress::evaluate(&rank(25, 40), 24),
            TargetProgress::Reached
        );
    }

    #[test]
    fn test_points_to_target_overflow_is_surfaced() {
        // 150 RR in the last tier before target is an anomaly, not clamped
        let progress = TargetProgress::evaluate(&rank(23, 150), 24);
        assert_eq!(progress.points(), Some(-50));
        assert!(progress.is_anomalous());
    }

    #[test]
    fn test_delta_antisymmetry() {
        let states = [rank(0, 0), rank(12, 99), rank(20, 50), rank(21, 10), rank(27, 400)];
        for a in &states {
            for b in &states {
                assert_eq!(delta(a, b), delta(b, a).map(|d| -d));
            }
        }
    }

    #[test]
    fn test_delta_across_tiers() {
        // Promotion with fewer intra-tier points is still a gain
        assert_eq!(delta(&rank(20, 80), &rank(21, 10)), Some(30));
        // Demotion with more intra-tier points is still a loss
        assert_eq!(delta(&rank(21, 10), &rank(20, 85)), Some(-25));
        assert_eq!(delta(&rank(20, 50), &rank(20, 71)), Some(21));
    }

    #[test]
    fn test_out_of_range_values_do_not_wrap() {
        // u32 RR beyond i32 must not wrap into a plausible positive number
        let progress = TargetProgress::evaluate(&rank(21, u32::MAX), 24);
        assert_eq!(progress.points(), Some(i32::MIN));
        assert!(progress.is_anomalous());

        assert_eq!(total_points_needed(0, u32::MAX), i32::MAX);
        assert_eq!(delta(&rank(0, 0), &rank(0, u32::MAX)), None);
        assert_eq!(delta(&rank(0, 0), &rank(u32::MAX, 0)), None);
    }

    #[test]
    fn test_progress_percent_bounds_and_monotonicity() {
        let total = 300;
        let mut previous = 0;
        for remaining in (-50..=350).rev() {
            let percent = progress_percent(remaining, total);
            assert!(percent <= 100);
            assert!(percent >= previous, "remaining {remaining}");
            previous = percent;
        }
    }

    #[test]
    fn test_progress_percent_rounds() {
        assert_eq!(progress_percent(290, 300), 3);
        assert_eq!(progress_percent(150, 300), 50);
        assert_eq!(progress_percent(2, 300), 99);
        assert_eq!(progress_percent(300, 300), 0);
    }

    #[test]
    fn test_target_progress_example() {
        let progress = TargetProgress::evaluate(&rank(21, 10), 24);
        assert_eq!(
            progress,
            TargetProgress::Remaining {
                points: 290,
                percent: 3
            }
        );
    }
}
