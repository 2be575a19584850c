//! Standings derived from a raw match log.
//!
//! The aggregation is a pure fold: validate the whole batch, keep the matches
//! inside the month filter, seed one zero row per roster entry, credit each
//! match to both sides and rank. Nothing here touches the database.

use std::cmp::Ordering;
use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::dto::standings::{Standings, StandingsRow};
use crate::models::{MatchRecord, Participant};

use super::months::MonthFilter;

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StandingsError {
    #[error("Match {match_id} has a negative score ({score})")]
    NegativeScore { match_id: Uuid, score: i32 },

    #[error("Match {match_id} is missing a participant reference")]
    MissingParticipant { match_id: Uuid },

    #[error("Match {match_id} has participant {participant_id} on both sides")]
    SelfMatch { match_id: Uuid, participant_id: Uuid },

    #[error("Invalid month filter '{0}', expected 'all' or YYYY-MM")]
    InvalidMonthFilter(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    fn of(score_for: i32, score_against: i32) -> Self {
        match score_for.cmp(&score_against) {
            Ordering::Greater => Self::Win,
            Ordering::Equal => Self::Draw,
            Ordering::Less => Self::Loss,
        }
    }
}

impl StandingsRow {
    fn record(&mut self, outcome: Outcome) {
        self.matches_played += 1;
        match outcome {
            Outcome::Win => {
                self.wins += 1;
                self.points += POINTS_FOR_WIN;
            }
            Outcome::Draw => {
                self.draws += 1;
                self.points += POINTS_FOR_DRAW;
            }
            Outcome::Loss => self.losses += 1,
        }
    }

    fn absorb(&mut self, other: &StandingsRow) {
        self.matches_played += other.matches_played;
        self.wins += other.wins;
        self.draws += other.draws;
        self.losses += other.losses;
        self.points += other.points;
    }
}

/// Structural checks on a single match record.
pub fn validate_match(record: &MatchRecord) -> Result<(), StandingsError> {
    if record.participant_a_id.is_nil() || record.participant_b_id.is_nil() {
        return Err(StandingsError::MissingParticipant {
            match_id: record.match_id,
        });
    }

    if record.participant_a_id == record.participant_b_id {
        return Err(StandingsError::SelfMatch {
            match_id: record.match_id,
            participant_id: record.participant_a_id,
        });
    }

    for score in [record.score_a, record.score_b] {
        if score < 0 {
            return Err(StandingsError::NegativeScore {
                match_id: record.match_id,
                score,
            });
        }
    }

    Ok(())
}

/// Validates the whole batch so that a bad record never yields a partial table.
pub fn validate_matches(matches: &[MatchRecord]) -> Result<(), StandingsError> {
    matches.iter().try_for_each(validate_match)
}

/// Orders rows by points, then wins, both descending.
///
/// `sort_by` is stable, so rows that tie on both keep their incoming
/// (roster) order.
pub fn rank(rows: &mut [StandingsRow]) {
    rows.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| b.wins.cmp(&a.wins)));
}

/// Seeds one zero row per distinct roster id, in roster order.
fn seed_rows(participants: &[Participant]) -> (Vec<StandingsRow>, HashMap<Uuid, usize>) {
    let mut rows = Vec::with_capacity(participants.len());
    let mut index = HashMap::with_capacity(participants.len());

    for participant in participants {
        if index.contains_key(&participant.id) {
            tracing::warn!(participant_id = %participant.id, "Duplicate participant in roster, ignoring");
            continue;
        }
        index.insert(participant.id, rows.len());
        rows.push(StandingsRow::seed(participant));
    }

    (rows, index)
}

/// Computes the ranked standings for `participants` over `matches`.
///
/// Every roster participant gets exactly one row, including those without a
/// match in the filtered window. Matches that reference a participant absent
/// from the roster are left out and listed in `skipped_matches`.
pub fn compute_standings(
    participants: &[Participant],
    matches: &[MatchRecord],
    filter: MonthFilter,
) -> Result<Standings, StandingsError> {
    validate_matches(matches)?;

    let (mut rows, index) = seed_rows(participants);
    let mut skipped_matches = Vec::new();

    for record in matches.iter().filter(|m| filter.matches(&m.played_at)) {
        let (Some(&a), Some(&b)) = (
            index.get(&record.participant_a_id),
            index.get(&record.participant_b_id),
        ) else {
            tracing::warn!(
                match_id = %record.match_id,
                participant_a_id = %record.participant_a_id,
                participant_b_id = %record.participant_b_id,
                "Match references a participant outside the roster, skipping"
            );
            skipped_matches.push(record.match_id);
            continue;
        };

        rows[a].record(Outcome::of(record.score_a, record.score_b));
        rows[b].record(Outcome::of(record.score_b, record.score_a));
    }

    rank(&mut rows);

    Ok(Standings {
        rows,
        skipped_matches,
    })
}

/// Adds up standings computed independently over disjoint slices of the
/// match log (one per month, say) and re-ranks them.
///
/// Merging the per-month tables of a history yields the same rows as a
/// single [`compute_standings`] call over the whole history.
pub fn merge_standings<I>(participants: &[Participant], partials: I) -> Standings
where
    I: IntoIterator<Item = Standings>,
{
    let (mut rows, index) = seed_rows(participants);
    let mut skipped_matches = Vec::new();

    for partial in partials {
        for row in &partial.rows {
            if let Some(&i) = index.get(&row.participant_id) {
                rows[i].absorb(row);
            }
        }
        skipped_matches.extend(partial.skipped_matches);
    }

    rank(&mut rows);

    Standings {
        rows,
        skipped_matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::months::{MonthKey, distinct_months};
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    fn participant(n: u128, name: &str) -> Participant {
        Participant {
            id: Uuid::from_u128(n),
            name: name.to_string(),
            nickname: None,
            emoji: Some("⚽".to_string()),
            members: None,
        }
    }

    fn roster() -> Vec<Participant> {
        vec![participant(1, "P1"), participant(2, "P2"), participant(3, "P3")]
    }

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn game(a: u128, b: u128, score_a: i32, score_b: i32, played_at: DateTime<Utc>) -> MatchRecord {
        MatchRecord {
            match_id: Uuid::new_v4(),
            participant_a_id: Uuid::from_u128(a),
            participant_b_id: Uuid::from_u128(b),
            score_a,
            score_b,
            played_at,
            created_at: played_at,
        }
    }

    fn row<'a>(standings: &'a Standings, n: u128) -> &'a StandingsRow {
        standings
            .rows
            .iter()
            .find(|r| r.participant_id == Uuid::from_u128(n))
            .unwrap()
    }

    fn order(standings: &Standings) -> Vec<String> {
        standings.rows.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_single_win() {
        let matches = vec![game(1, 2, 5, 3, at(2024, 1, 10))];
        let standings = compute_standings(&roster(), &matches, MonthFilter::All).unwrap();

        let p1 = row(&standings, 1);
        assert_eq!((p1.matches_played, p1.wins, p1.draws, p1.losses, p1.points), (1, 1, 0, 0, 3));

        let p2 = row(&standings, 2);
        assert_eq!((p2.matches_played, p2.wins, p2.draws, p2.losses, p2.points), (1, 0, 0, 1, 0));

        let p3 = row(&standings, 3);
        assert_eq!((p3.matches_played, p3.points), (0, 0));

        assert_eq!(order(&standings), vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_draw_gives_one_point_each() {
        let matches = vec![game(1, 2, 4, 4, at(2024, 1, 10))];
        let standings = compute_standings(&roster(), &matches, MonthFilter::All).unwrap();

        for n in [1, 2] {
            let r = row(&standings, n);
            assert_eq!((r.matches_played, r.draws, r.points), (1, 1, 1));
        }
        assert_eq!(order(&standings), vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_month_filter() {
        let matches = vec![
            game(1, 2, 10, 6, at(2024, 1, 15)),
            game(2, 1, 10, 9, at(2024, 2, 15)),
        ];

        let all = compute_standings(&roster(), &matches, MonthFilter::All).unwrap();
        for n in [1, 2] {
            let r = row(&all, n);
            assert_eq!((r.matches_played, r.wins, r.losses, r.points), (2, 1, 1, 3));
        }

        let january = MonthFilter::Month(MonthKey::new(2024, 1).unwrap());
        let standings = compute_standings(&roster(), &matches, january).unwrap();
        let p1 = row(&standings, 1);
        assert_eq!((p1.matches_played, p1.wins, p1.points), (1, 1, 3));
        let p2 = row(&standings, 2);
        assert_eq!((p2.matches_played, p2.losses, p2.points), (1, 1, 0));

        // Participants idle in the window still get a zero row
        assert_eq!(standings.rows.len(), 3);
        let p3 = row(&standings, 3);
        assert_eq!((p3.matches_played, p3.wins, p3.draws, p3.losses, p3.points), (0, 0, 0, 0, 0));
    }

    #[test]
    fn test_unknown_participant_is_skipped() {
        let stray = game(1, 99, 10, 0, at(2024, 1, 1));
        let stray_id = stray.match_id;
        let matches = vec![stray, game(2, 3, 3, 10, at(2024, 1, 2))];

        let standings = compute_standings(&roster(), &matches, MonthFilter::All).unwrap();

        assert_eq!(standings.skipped_matches, vec![stray_id]);
        assert_eq!(row(&standings, 1).matches_played, 0);
        assert_eq!(row(&standings, 3).wins, 1);
        assert_eq!(standings.rows.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let standings = compute_standings(&[], &[], MonthFilter::All).unwrap();
        assert!(standings.rows.is_empty());
        assert!(standings.skipped_matches.is_empty());
    }

    #[test]
    fn test_zero_match_roster_is_all_zero_in_roster_order() {
        let standings = compute_standings(&roster(), &[], MonthFilter::All).unwrap();
        assert_eq!(order(&standings), vec!["P1", "P2", "P3"]);
        assert!(standings.rows.iter().all(|r| r.matches_played == 0 && r.points == 0));
    }

    #[test]
    fn test_wins_break_points_ties() {
        // P2: one win, three losses = 3 pts. P3: three draws = 3 pts.
        // P3 comes first in the roster, so only the wins tie-break puts P2 ahead.
        let roster = vec![participant(1, "P1"), participant(3, "P3"), participant(2, "P2"), participant(4, "P4")];
        let matches = vec![
            game(2, 1, 10, 2, at(2024, 5, 1)),
            game(2, 1, 1, 10, at(2024, 5, 2)),
            game(2, 4, 1, 10, at(2024, 5, 3)),
            game(2, 4, 1, 10, at(2024, 5, 4)),
            game(3, 1, 5, 5, at(2024, 5, 5)),
            game(3, 4, 5, 5, at(2024, 5, 6)),
            game(3, 4, 7, 7, at(2024, 5, 7)),
        ];

        let standings = compute_standings(&roster, &matches, MonthFilter::All).unwrap();
        let p2 = standings.rows.iter().position(|r| r.name == "P2").unwrap();
        let p3 = standings.rows.iter().position(|r| r.name == "P3").unwrap();

        assert_eq!(row(&standings, 2).points, row(&standings, 3).points);
        assert!(p2 < p3);
    }

    #[test]
    fn test_negative_score_rejects_batch() {
        let bad = game(1, 2, -1, 3, at(2024, 1, 1));
        let bad_id = bad.match_id;
        let matches = vec![game(1, 3, 10, 0, at(2024, 1, 1)), bad];

        assert_eq!(
            compute_standings(&roster(), &matches, MonthFilter::All),
            Err(StandingsError::NegativeScore {
                match_id: bad_id,
                score: -1
            })
        );
    }

    #[test]
    fn test_invalid_record_outside_filter_still_rejects() {
        let bad = game(1, 2, 3, -4, at(2020, 1, 1));
        let february = MonthFilter::Month(MonthKey::new(2024, 2).unwrap());
        assert!(compute_standings(&roster(), &[bad], february).is_err());
    }

    #[test]
    fn test_nil_and_self_references_are_rejected() {
        let mut nil = game(1, 2, 1, 0, at(2024, 1, 1));
        nil.participant_b_id = Uuid::nil();
        assert!(matches!(
            validate_match(&nil),
            Err(StandingsError::MissingParticipant { .. })
        ));

        let same = game(2, 2, 1, 0, at(2024, 1, 1));
        assert!(matches!(
            validate_match(&same),
            Err(StandingsError::SelfMatch { .. })
        ));
    }

    #[test]
    fn test_duplicate_roster_entries_appear_once() {
        let roster = vec![participant(1, "P1"), participant(1, "P1 again"), participant(2, "P2")];
        let standings = compute_standings(&roster, &[game(1, 2, 2, 1, at(2024, 1, 1))], MonthFilter::All).unwrap();

        assert_eq!(standings.rows.len(), 2);
        assert_eq!(row(&standings, 1).name, "P1");
        assert_eq!(row(&standings, 1).wins, 1);
    }

    #[test]
    fn test_rows_serialize_with_expected_field_names() {
        let standings = compute_standings(&roster(), &[], MonthFilter::All).unwrap();
        let json = serde_json::to_value(&standings.rows[0]).unwrap();

        for field in ["participant_id", "matches_played", "wins", "draws", "losses", "points"] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }

    fn arb_history() -> impl Strategy<Value = (Vec<Participant>, Vec<MatchRecord>)> {
        (1u128..8).prop_flat_map(|size| {
            let roster: Vec<Participant> = (1..=size)
                .map(|n| participant(n, &format!("P{n}")))
                .collect();
            // Ids one past the roster are unknown on purpose
            let side = 1u128..=size + 1;
            let record = (
                side.clone(),
                side,
                0i32..12,
                0i32..12,
                2023i32..=2024,
                1u32..=12,
                1u32..=28,
            )
                .prop_filter("distinct sides", |(a, b, ..)| a != b)
                .prop_map(|(a, b, score_a, score_b, year, month, day)| {
                    game(a, b, score_a, score_b, at(year, month, day))
                });
            (Just(roster), prop::collection::vec(record, 0..40))
        })
    }

    /// A history plus either `All`, one of its own months, or a month with
    /// no matches at all.
    fn arb_filtered_history() -> impl Strategy<Value = (Vec<Participant>, Vec<MatchRecord>, MonthFilter)> {
        arb_history().prop_flat_map(|(roster, matches)| {
            let mut filters = vec![MonthFilter::All, MonthKey::new(2030, 6).unwrap().into()];
            filters.extend(distinct_months(&matches).into_iter().map(MonthFilter::from));
            (Just(roster), Just(matches), prop::sample::select(filters))
        })
    }

    fn check_rows(roster: &[Participant], standings: &Standings) -> Result<(), TestCaseError> {
        prop_assert_eq!(standings.rows.len(), roster.len());
        for participant in roster {
            prop_assert_eq!(
                standings.rows.iter().filter(|r| r.participant_id == participant.id).count(),
                1
            );
        }
        for r in &standings.rows {
            prop_assert_eq!(r.matches_played, r.wins + r.draws + r.losses);
            prop_assert_eq!(r.points, 3 * r.wins + r.draws);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_rows_are_consistent((roster, matches, filter) in arb_filtered_history()) {
            let standings = compute_standings(&roster, &matches, filter).unwrap();
            check_rows(&roster, &standings)?;

            let in_window = matches.iter().filter(|m| filter.matches(&m.played_at)).count() as u32;
            let counted = standings.rows.iter().map(|r| r.matches_played).sum::<u32>();
            let skipped = standings.skipped_matches.len() as u32;
            prop_assert_eq!(counted, 2 * (in_window - skipped));
        }

        #[test]
        fn prop_ranking_is_sorted_and_stable((roster, matches, filter) in arb_filtered_history()) {
            let standings = compute_standings(&roster, &matches, filter).unwrap();
            let roster_position = |id: Uuid| roster.iter().position(|p| p.id == id).unwrap();

            for pair in standings.rows.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!((a.points, a.wins) >= (b.points, b.wins));
                if (a.points, a.wins) == (b.points, b.wins) {
                    prop_assert!(roster_position(a.participant_id) < roster_position(b.participant_id));
                }
            }
        }

        #[test]
        fn prop_is_deterministic((roster, matches) in arb_history()) {
            let first = compute_standings(&roster, &matches, MonthFilter::All).unwrap();
            let second = compute_standings(&roster, &matches, MonthFilter::All).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_months_partition_the_history((roster, matches) in arb_history()) {
            let total = |s: &Standings| s.rows.iter().map(|r| r.matches_played).sum::<u32>();

            let all = compute_standings(&roster, &matches, MonthFilter::All).unwrap();
            let per_month: Vec<Standings> = distinct_months(&matches)
                .into_iter()
                .map(|key| compute_standings(&roster, &matches, key.into()).unwrap())
                .collect();
            for standings in &per_month {
                check_rows(&roster, standings)?;
            }

            prop_assert_eq!(total(&all), per_month.iter().map(total).sum::<u32>());

            let merged = merge_standings(&roster, per_month);
            prop_assert_eq!(&merged.rows, &all.rows);

            let mut merged_skipped = merged.skipped_matches.clone();
            let mut all_skipped = all.skipped_matches.clone();
            merged_skipped.sort();
            all_skipped.sort();
            prop_assert_eq!(merged_skipped, all_skipped);
        }
    }
}
