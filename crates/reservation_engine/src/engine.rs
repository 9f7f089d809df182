use chrono::NaiveDate;

use crate::types::{DateRange, ReservationRequest};

/// Why a candidate reservation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    /// Check-in or check-out date was not supplied
    #[error("Either check-in or check-out date is missing")]
    MissingDates,

    /// Check-out is not strictly after check-in
    #[error("Reservation checkout must be at least one day after checkin")]
    InvalidDateRange,

    /// The requested dates overlap an existing reservation for the campsite
    #[error("Reservation conflicts with an existing reservation")]
    DateConflict,

    /// Check-in on the current date is not accepted
    #[error("Same-day check-in is not allowed")]
    SameDayCheckinNotAllowed,

    /// The stay is longer than the campsite type permits
    #[error("Reservation exceeds the maximum reservation days for this campsite type")]
    DurationExceeded,
}

impl RejectReason {
    /// Stable snake-case code for client-facing error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::MissingDates => "missing_dates",
            RejectReason::InvalidDateRange => "invalid_date_range",
            RejectReason::DateConflict => "date_conflict",
            RejectReason::SameDayCheckinNotAllowed => "same_day_checkin_not_allowed",
            RejectReason::DurationExceeded => "duration_exceeded",
        }
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The booking is valid; carries the stay length for fee display.
    Admit {
        /// Length of the admitted stay in whole nights
        total_nights: i64,
    },
    /// The booking is refused with a deterministic reason.
    Reject(RejectReason),
}

/// Decides whether a candidate reservation may be admitted against the
/// existing reservations for its campsite.
///
/// `existing` must be the caller's snapshot of every reservation currently
/// held for the same campsite. `today` is injected rather than read from
/// the system clock so the function stays deterministic.
///
/// Checks run in a fixed order and the first failure wins: missing dates,
/// date ordering, overlap against `existing`, same-day check-in, then the
/// `max_reservation_days` limit. The overlap scan deliberately precedes
/// the same-day check, so a same-day candidate that also overlaps is
/// reported as a conflict. Overlap uses half-open intervals: a check-in on
/// an existing checkout day is a valid back-to-back stay.
pub fn admit(
    request: &ReservationRequest,
    existing: &[DateRange],
    max_reservation_days: i32,
    today: NaiveDate,
) -> Verdict {
    let (checkin, checkout) = match (request.checkin_date, request.checkout_date) {
        (Some(ci), Some(co)) => (ci, co),
        _ => return Verdict::Reject(RejectReason::MissingDates),
    };

    if checkout <= checkin {
        return Verdict::Reject(RejectReason::InvalidDateRange);
    }

    let candidate = DateRange { checkin, checkout };
    if existing.iter().any(|held| candidate.overlaps(held)) {
        return Verdict::Reject(RejectReason::DateConflict);
    }

    if checkin == today {
        return Verdict::Reject(RejectReason::SameDayCheckinNotAllowed);
    }

    let total_nights = (checkout - checkin).num_days();
    if total_nights > i64::from(max_reservation_days) {
        return Verdict::Reject(RejectReason::DurationExceeded);
    }

    Verdict::Admit { total_nights }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(checkin: Option<NaiveDate>, checkout: Option<NaiveDate>) -> ReservationRequest {
        ReservationRequest {
            campsite_id: 1,
            user_profile_id: 1,
            checkin_date: checkin,
            checkout_date: checkout,
        }
    }

    fn range(checkin: NaiveDate, checkout: NaiveDate) -> DateRange {
        DateRange { checkin, checkout }
    }

    // A "today" far from the test dates so the same-day rule stays quiet.
    fn far_today() -> NaiveDate {
        date(2024, 1, 1)
    }

    #[test]
    fn admits_against_empty_campsite() {
        let req = request(Some(date(2024, 6, 1)), Some(date(2024, 6, 5)));
        let verdict = admit(&req, &[], 7, far_today());
        assert_eq!(verdict, Verdict::Admit { total_nights: 4 });
    }

    #[test]
    fn admits_back_to_back_checkin_on_existing_checkout() {
        let held = [range(date(2024, 5, 10), date(2024, 5, 15))];
        let req = request(Some(date(2024, 5, 15)), Some(date(2024, 5, 18)));
        let verdict = admit(&req, &held, 7, far_today());
        assert_eq!(verdict, Verdict::Admit { total_nights: 3 });
    }

    #[test]
    fn admits_checkout_on_existing_checkin() {
        let held = [range(date(2024, 5, 10), date(2024, 5, 15))];
        let req = request(Some(date(2024, 5, 7)), Some(date(2024, 5, 10)));
        let verdict = admit(&req, &held, 7, far_today());
        assert_eq!(verdict, Verdict::Admit { total_nights: 3 });
    }

    #[test]
    fn rejects_overlap_into_existing_stay() {
        let held = [range(date(2024, 5, 10), date(2024, 5, 15))];
        let req = request(Some(date(2024, 5, 12)), Some(date(2024, 5, 20)));
        let verdict = admit(&req, &held, 14, far_today());
        assert_eq!(verdict, Verdict::Reject(RejectReason::DateConflict));
    }

    #[test]
    fn rejects_stay_fully_containing_existing() {
        let held = [range(date(2024, 5, 10), date(2024, 5, 12))];
        let req = request(Some(date(2024, 5, 8)), Some(date(2024, 5, 14)));
        let verdict = admit(&req, &held, 14, far_today());
        assert_eq!(verdict, Verdict::Reject(RejectReason::DateConflict));
    }

    #[test]
    fn rejects_stay_inside_existing() {
        let held = [range(date(2024, 5, 10), date(2024, 5, 20))];
        let req = request(Some(date(2024, 5, 12)), Some(date(2024, 5, 14)));
        let verdict = admit(&req, &held, 14, far_today());
        assert_eq!(verdict, Verdict::Reject(RejectReason::DateConflict));
    }

    #[test]
    fn rejects_checkout_before_checkin() {
        let req = request(Some(date(2024, 5, 20)), Some(date(2024, 5, 19)));
        let verdict = admit(&req, &[], 7, far_today());
        assert_eq!(verdict, Verdict::Reject(RejectReason::InvalidDateRange));
    }

    #[test]
    fn rejects_zero_night_stay() {
        let req = request(Some(date(2024, 5, 20)), Some(date(2024, 5, 20)));
        let verdict = admit(&req, &[], 7, far_today());
        assert_eq!(verdict, Verdict::Reject(RejectReason::InvalidDateRange));
    }

    #[test]
    fn ordering_check_wins_over_conflict() {
        // An inverted range never reaches the overlap scan.
        let held = [range(date(2024, 5, 10), date(2024, 5, 25))];
        let req = request(Some(date(2024, 5, 20)), Some(date(2024, 5, 12)));
        let verdict = admit(&req, &held, 7, far_today());
        assert_eq!(verdict, Verdict::Reject(RejectReason::InvalidDateRange));
    }

    #[test]
    fn rejects_missing_checkin() {
        let req = request(None, Some(date(2024, 5, 20)));
        let verdict = admit(&req, &[], 7, far_today());
        assert_eq!(verdict, Verdict::Reject(RejectReason::MissingDates));
    }

    #[test]
    fn rejects_missing_checkout() {
        let req = request(Some(date(2024, 5, 20)), None);
        let verdict = admit(&req, &[], 7, far_today());
        assert_eq!(verdict, Verdict::Reject(RejectReason::MissingDates));
    }

    #[test]
    fn rejects_missing_both_dates() {
        let req = request(None, None);
        let verdict = admit(&req, &[], 7, far_today());
        assert_eq!(verdict, Verdict::Reject(RejectReason::MissingDates));
    }

    #[test]
    fn rejects_same_day_checkin() {
        let today = date(2024, 5, 20);
        let req = request(Some(today), Some(date(2024, 5, 23)));
        let verdict = admit(&req, &[], 7, today);
        assert_eq!(
            verdict,
            Verdict::Reject(RejectReason::SameDayCheckinNotAllowed)
        );
    }

    #[test]
    fn conflict_reported_before_same_day_violation() {
        // Same-day candidate that also overlaps surfaces as a conflict.
        let today = date(2024, 5, 12);
        let held = [range(date(2024, 5, 10), date(2024, 5, 15))];
        let req = request(Some(today), Some(date(2024, 5, 14)));
        let verdict = admit(&req, &held, 7, today);
        assert_eq!(verdict, Verdict::Reject(RejectReason::DateConflict));
    }

    #[test]
    fn rejects_stay_over_duration_limit() {
        let req = request(Some(date(2024, 6, 1)), Some(date(2024, 6, 11)));
        let verdict = admit(&req, &[], 7, far_today());
        assert_eq!(verdict, Verdict::Reject(RejectReason::DurationExceeded));
    }

    #[test]
    fn admits_stay_exactly_at_duration_limit() {
        let req = request(Some(date(2024, 6, 1)), Some(date(2024, 6, 8)));
        let verdict = admit(&req, &[], 7, far_today());
        assert_eq!(verdict, Verdict::Admit { total_nights: 7 });
    }

    #[test]
    fn yesterday_checkin_is_not_blocked_by_the_same_day_rule() {
        // Only equality to today is checked; backdating passes the engine.
        let today = date(2024, 5, 20);
        let req = request(Some(date(2024, 5, 19)), Some(date(2024, 5, 22)));
        let verdict = admit(&req, &[], 7, today);
        assert_eq!(verdict, Verdict::Admit { total_nights: 3 });
    }

    #[test]
    fn verdicts_are_idempotent_for_identical_inputs() {
        let held = [range(date(2024, 5, 10), date(2024, 5, 15))];
        let req = request(Some(date(2024, 5, 12)), Some(date(2024, 5, 20)));
        let first = admit(&req, &held, 7, far_today());
        let second = admit(&req, &held, 7, far_today());
        assert_eq!(first, second);
    }

    #[test]
    fn scans_every_existing_reservation() {
        let held = [
            range(date(2024, 5, 1), date(2024, 5, 4)),
            range(date(2024, 5, 10), date(2024, 5, 15)),
            range(date(2024, 5, 20), date(2024, 5, 22)),
        ];
        let req = request(Some(date(2024, 5, 21)), Some(date(2024, 5, 24)));
        let verdict = admit(&req, &held, 7, far_today());
        assert_eq!(verdict, Verdict::Reject(RejectReason::DateConflict));

        // The gap between the stays is still bookable.
        let req = request(Some(date(2024, 5, 15)), Some(date(2024, 5, 20)));
        let verdict = admit(&req, &held, 7, far_today());
        assert_eq!(verdict, Verdict::Admit { total_nights: 5 });
    }
}
