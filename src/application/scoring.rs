//! Zero-factor score baseline.
//!
//! Before any factor adjusts anything, each side is expected to score
//!
//! ```text
//! per100 = own ORtg + opponent DRtg − league ORtg
//! points = per100 × pace / 100 ± home_court / 2
//! ```
//!
//! with pace the mean of both teams' paces. The home side gets the
//! `+home_court/2` half.

use crate::domain::{Bundle, DataBundle, LeagueAverages, ScorePrediction};

/// Baseline for a league-average matchup.
#[must_use]
pub fn league_baseline(league: &LeagueAverages) -> ScorePrediction {
    let per_team = league.offensive_rating * league.pace / 100.0;
    let hca = league.home_court_points / 2.0;
    let prediction = ScorePrediction::new(per_team - hca, per_team + hca, league.pace);
    if is_finite(&prediction) {
        prediction
    } else {
        let fallback = LeagueAverages::default();
        let per_team = fallback.offensive_rating * fallback.pace / 100.0;
        let hca = fallback.home_court_points / 2.0;
        ScorePrediction::new(per_team - hca, per_team + hca, fallback.pace)
    }
}

/// Team-specific baseline. Non-finite statistics degrade to the league
/// baseline.
#[must_use]
pub fn baseline(bundle: &DataBundle) -> ScorePrediction {
    let league = &bundle.league;
    let away = bundle.away();
    let home = bundle.home();

    let pace = (away.pace + home.pace) / 2.0;
    let away_per100 = away.offensive_rating + home.defensive_rating - league.offensive_rating;
    let home_per100 = home.offensive_rating + away.defensive_rating - league.offensive_rating;
    let hca = league.home_court_points / 2.0;

    let prediction = ScorePrediction::new(
        away_per100 * pace / 100.0 - hca,
        home_per100 * pace / 100.0 + hca,
        pace,
    );
    if is_finite(&prediction) && pace > 0.0 {
        prediction
    } else {
        league_baseline(league)
    }
}

/// Baseline for either bundle state.
#[must_use]
pub fn for_bundle(bundle: &Bundle) -> ScorePrediction {
    match bundle {
        Bundle::Available(data) => baseline(data),
        Bundle::Unavailable => league_baseline(&LeagueAverages::default()),
    }
}

fn is_finite(p: &ScorePrediction) -> bool {
    p.away_score.is_finite() && p.home_score.is_finite() && p.pace.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Matchup, TeamStats};

    #[test]
    fn test_league_baseline_splits_home_court() {
        let lg = LeagueAverages::default();
        let p = league_baseline(&lg);
        assert!((p.away_margin + lg.home_court_points).abs() < 1e-9);
        let expected_total = 2.0 * lg.offensive_rating * lg.pace / 100.0;
        assert!((p.total - expected_total).abs() < 1e-9);
    }

    #[test]
    fn test_league_only_bundle_matches_league_baseline() {
        let lg = LeagueAverages::default();
        let bundle = DataBundle::league_only(Matchup::new("A", "B"), lg.clone());
        assert_eq!(baseline(&bundle), league_baseline(&lg));
    }

    #[test]
    fn test_stronger_away_offense_raises_away_score() {
        let lg = LeagueAverages::default();
        let away = TeamStats {
            offensive_rating: Some(120.0),
            ..TeamStats::default()
        };
        let bundle = DataBundle::new(Matchup::new("A", "B"), away, TeamStats::default(), lg.clone());
        let p = baseline(&bundle);
        let league = league_baseline(&lg);
        assert!(p.away_score > league.away_score);
        assert_eq!(p.home_score, league.home_score);
    }

    #[test]
    fn test_nan_ratings_fall_back() {
        let lg = LeagueAverages::default();
        let away = TeamStats {
            offensive_rating: Some(f64::NAN),
            ..TeamStats::default()
        };
        let bundle = DataBundle::new(Matchup::new("A", "B"), away, TeamStats::default(), lg.clone());
        assert_eq!(baseline(&bundle), league_baseline(&lg));
    }

    #[test]
    fn test_unavailable_uses_default_league() {
        let p = for_bundle(&Bundle::Unavailable);
        assert_eq!(p, league_baseline(&LeagueAverages::default()));
    }
}
