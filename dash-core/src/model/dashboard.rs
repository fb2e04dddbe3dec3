//! Static dashboard content. Scores are fixed values, not computed.

use crate::view::theme::ColorToken;

pub const SAFETY_SCORE: u8 = 86;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCategory {
    pub title: &'static str,
    pub score: u8,
    pub color: ColorToken,
}

pub const SCORE_BREAKDOWN: [ScoreCategory; 4] = [
    ScoreCategory {
        title: "Speed Control",
        score: 92,
        color: ColorToken::Primary,
    },
    ScoreCategory {
        title: "Braking",
        score: 80,
        color: ColorToken::Warning,
    },
    ScoreCategory {
        title: "Steering",
        score: 89,
        color: ColorToken::Success,
    },
    ScoreCategory {
        title: "Aggression",
        score: 75,
        color: ColorToken::Error,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripRating {
    Good,
    Bad,
}

impl TripRating {
    pub const fn color(self) -> ColorToken {
        match self {
            Self::Good => ColorToken::Success,
            Self::Bad => ColorToken::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripSummary {
    pub location: &'static str,
    pub duration_min: u16,
    pub events: u16,
    pub rating: TripRating,
}

impl TripSummary {
    pub fn events_label(&self) -> String {
        match self.events {
            0 => "No issues".to_string(),
            1 => "1 bad event".to_string(),
            n => format!("{n} bad events"),
        }
    }
}

pub const RECENT_TRIPS: [TripSummary; 2] = [
    TripSummary {
        location: "Downtown Loop",
        duration_min: 14,
        events: 2,
        rating: TripRating::Bad,
    },
    TripSummary {
        location: "Lake Drive",
        duration_min: 31,
        events: 0,
        rating: TripRating::Good,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_labels() {
        assert_eq!(RECENT_TRIPS[0].events_label(), "2 bad events");
        assert_eq!(RECENT_TRIPS[1].events_label(), "No issues");
        assert_eq!(RECENT_TRIPS[1].rating.color(), ColorToken::Success);
    }
}
