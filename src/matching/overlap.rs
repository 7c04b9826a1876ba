use crate::schedule::availability::WeeklyAvailability;
use crate::schedule::time::overlaps;

/// Ratio of overlapping slot pairs to candidate slots.
///
/// Every slot of `theirs` counts once toward the denominator. The numerator
/// counts every overlapping (theirs, mine) pair, so a candidate slot that
/// spans two of `mine`'s slots contributes two hits and the raw ratio can
/// exceed 1.0; the scorer caps the resulting sub-score at its ceiling.
/// Returns 0.0 when `theirs` has no slots at all.
pub fn overlap_score(mine: &WeeklyAvailability, theirs: &WeeklyAvailability) -> f64 {
    let mut total_slots = 0_u32;
    let mut matching_slots = 0_u32;

    for (day, their_slots) in theirs.days() {
        let my_slots = mine.day(day);
        for their_slot in their_slots {
            total_slots += 1;
            for my_slot in my_slots {
                if overlaps(their_slot, my_slot) {
                    matching_slots += 1;
                }
            }
        }
    }

    if total_slots == 0 {
        return 0.0;
    }
    f64::from(matching_slots) / f64::from(total_slots)
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;
    use crate::schedule::time::TimeSlot;

    fn week(day: Weekday, slots: Vec<TimeSlot>) -> WeeklyAvailability {
        let mut weekly = WeeklyAvailability::default();
        weekly.insert(day, slots);
        weekly
    }

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(start, end)
    }

    #[test]
    fn empty_weeks_score_zero() {
        let empty = WeeklyAvailability::default();
        assert_eq!(overlap_score(&empty, &empty), 0.0);
    }

    #[test]
    fn identical_single_slot_is_full_overlap() {
        let mine = week(Weekday::Mon, vec![slot("09:00", "17:00")]);
        let theirs = week(Weekday::Mon, vec![slot("09:00", "17:00")]);
        assert_eq!(overlap_score(&mine, &theirs), 1.0);
    }

    #[test]
    fn different_days_never_overlap() {
        let mine = week(Weekday::Mon, vec![slot("09:00", "17:00")]);
        let theirs = week(Weekday::Tue, vec![slot("09:00", "17:00")]);
        assert_eq!(overlap_score(&mine, &theirs), 0.0);
    }

    #[test]
    fn touching_slots_do_not_count() {
        let mine = week(Weekday::Mon, vec![slot("09:00", "10:00")]);
        let theirs = week(Weekday::Mon, vec![slot("10:00", "11:00")]);
        assert_eq!(overlap_score(&mine, &theirs), 0.0);
    }

    #[test]
    fn ratio_is_matches_over_candidate_slots() {
        let mine = week(Weekday::Mon, vec![slot("09:00", "12:00")]);
        let theirs = week(
            Weekday::Mon,
            vec![slot("10:00", "11:00"), slot("14:00", "16:00")],
        );
        assert_eq!(overlap_score(&mine, &theirs), 0.5);
    }

    #[test]
    fn candidate_slot_spanning_two_of_mine_counts_twice() {
        let mine = week(
            Weekday::Mon,
            vec![slot("09:00", "12:00"), slot("13:00", "18:00")],
        );
        let theirs = week(Weekday::Mon, vec![slot("09:00", "17:00")]);
        // One candidate slot, two overlapping pairs: the raw ratio goes
        // above 1.0 and stays that way until the scorer caps it.
        assert_eq!(overlap_score(&mine, &theirs), 2.0);
    }
}
