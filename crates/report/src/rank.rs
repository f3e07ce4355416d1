use crate::normalize::NormalizedAttendee;

/// Descending by rank key over a copy of `attendees`. Stable: equal keys keep
/// their payload order.
pub fn rank(attendees: &[NormalizedAttendee]) -> Vec<NormalizedAttendee> {
    let mut ranked = attendees.to_vec();
    ranked.sort_by(|a, b| b.rank_key.total_cmp(&a.rank_key));
    ranked
}
