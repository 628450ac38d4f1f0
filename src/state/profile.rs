//! Player profile and recent match history.
//!
//! There is no backend; the profile is a fixed demo player.

use chrono::NaiveDate;

/// Date format used on match cards (day/month/year).
const MATCH_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Win,
    Loss,
}

impl MatchResult {
    pub fn label(&self) -> &'static str {
        match self {
            MatchResult::Win => "WIN",
            MatchResult::Loss => "LOSS",
        }
    }
}

/// One played match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPerformance {
    pub id: String,
    pub date: NaiveDate,
    pub opponent: String,
    pub result: MatchResult,
    pub score: String,
    pub venue: String,
    pub duration_minutes: u32,
}

impl MatchPerformance {
    pub fn formatted_date(&self) -> String {
        self.date.format(MATCH_DATE_FORMAT).to_string()
    }

    /// Duration as `1h 25m`, with minutes zero-padded.
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_minutes)
    }
}

pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours == 0 {
        format!("{}m", mins)
    } else {
        format!("{}h {:02}m", hours, mins)
    }
}

/// Highlighted achievement shown on the profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub title: String,
    pub description: String,
}

/// The player profile screen.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub location: String,
    pub member_since: String,
    pub rating: f64,
    pub matches_this_month: u32,
    pub achievement: Achievement,
    pub recent_matches: Vec<MatchPerformance>,
}

impl UserProfile {
    /// Percentage of recent matches won, rounded. `None` with no matches.
    pub fn win_rate_percent(&self) -> Option<u32> {
        if self.recent_matches.is_empty() {
            return None;
        }
        let wins = self
            .recent_matches
            .iter()
            .filter(|m| m.result == MatchResult::Win)
            .count();
        Some((wins as f64 / self.recent_matches.len() as f64 * 100.0).round() as u32)
    }

    /// Rating as five stars, rounded down to whole stars.
    pub fn rating_stars(&self) -> String {
        let filled = (self.rating.clamp(0.0, 5.0).floor()) as usize;
        "\u{2605}".repeat(filled) + &"\u{2606}".repeat(5 - filled)
    }

    /// The demo player.
    pub fn demo() -> Self {
        Self {
            name: "Alex Thompson".to_string(),
            location: "Central London, UK".to_string(),
            member_since: "January 2023".to_string(),
            rating: 4.2,
            matches_this_month: 24,
            achievement: Achievement {
                title: "Tournament Winner!".to_string(),
                description: "Camden Winter Championship 2024".to_string(),
            },
            recent_matches: demo_matches(),
        }
    }
}

fn demo_match(
    id: &str,
    (year, month, day): (i32, u32, u32),
    opponent: &str,
    result: MatchResult,
    score: &str,
    venue: &str,
    duration_minutes: u32,
) -> Option<MatchPerformance> {
    Some(MatchPerformance {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day)?,
        opponent: opponent.to_string(),
        result,
        score: score.to_string(),
        venue: venue.to_string(),
        duration_minutes,
    })
}

fn demo_matches() -> Vec<MatchPerformance> {
    [
        demo_match(
            "1",
            (2024, 1, 20),
            "Sarah & Mike",
            MatchResult::Win,
            "6-4, 6-3",
            "Hyde Park Padel Club",
            85,
        ),
        demo_match(
            "2",
            (2024, 1, 18),
            "James & Emma",
            MatchResult::Loss,
            "4-6, 6-7",
            "Royal Chelsea Padel",
            108,
        ),
        demo_match(
            "3",
            (2024, 1, 15),
            "Alex & Lisa",
            MatchResult::Win,
            "6-2, 6-4",
            "Camden Padel Center",
            72,
        ),
        demo_match(
            "4",
            (2024, 1, 12),
            "David & Kate",
            MatchResult::Win,
            "6-3, 4-6, 6-4",
            "Canary Wharf Padel",
            125,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_win_rate() {
        let profile = UserProfile::demo();
        assert_eq!(profile.recent_matches.len(), 4);
        assert_eq!(profile.win_rate_percent(), Some(75));
    }

    #[test]
    fn test_win_rate_empty() {
        let profile = UserProfile {
            recent_matches: Vec::new(),
            ..UserProfile::demo()
        };
        assert_eq!(profile.win_rate_percent(), None);
    }

    #[test]
    fn test_win_rate_rounds() {
        let mut profile = UserProfile::demo();
        profile.recent_matches.truncate(3);
        // 2 of 3
        assert_eq!(profile.win_rate_percent(), Some(67));
    }

    #[test]
    fn test_match_date_format() {
        let profile = UserProfile::demo();
        assert_eq!(profile.recent_matches[0].formatted_date(), "20/01/2024");
        assert_eq!(profile.recent_matches[3].formatted_date(), "12/01/2024");
    }

    #[test]
    fn test_duration_format() {
        assert_eq!(format_duration(85), "1h 25m");
        assert_eq!(format_duration(125), "2h 05m");
        assert_eq!(format_duration(45), "45m");
    }

    #[test]
    fn test_rating_stars() {
        let profile = UserProfile::demo();
        assert_eq!(profile.rating_stars(), "\u{2605}\u{2605}\u{2605}\u{2605}\u{2606}");
    }
}
