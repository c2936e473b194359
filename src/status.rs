//! Rules are matched in table order against the lower-cased status and the
//! first rule with a matching keyword wins, so a status that mentions two
//! categories ("boarding and delayed") resolves to the earlier one.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    InFlight,
    Scheduled,
    Landed,
    Delayed,
    Cancelled,
    /// carries the upstream status text as it was given
    Unknown(String),
}

impl StatusCategory {
    pub fn label(&self) -> &str {
        match self {
            Self::InFlight => "In Flight",
            Self::Scheduled => "Scheduled",
            Self::Landed => "Landed",
            Self::Delayed => "Delayed",
            Self::Cancelled => "Cancelled",
            Self::Unknown(text) => text,
        }
    }

    /// badge colour used by the info panel
    pub fn color(&self) -> &'static str {
        match self {
            Self::InFlight => "#00B894",
            Self::Scheduled => "#3498DB",
            Self::Landed => "#9B59B6",
            Self::Delayed => "#E74C3C",
            Self::Cancelled => "#95A5A6",
            Self::Unknown(_) => "#888888",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusInfo {
    pub category: StatusCategory,
    pub progress: f64,
    pub show_plane: bool,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    InFlight,
    Scheduled,
    Landed,
    Delayed,
    Cancelled,
}

const STATUS_RULES: [(Rule, &[&str]); 5] = [
    (Rule::InFlight, &["inflight", "departed", "enroute", "airborne"]),
    (Rule::Scheduled, &["scheduled", "checkin", "gate", "boarding"]),
    (Rule::Landed, &["landed", "arrived", "arrival"]),
    (Rule::Delayed, &["delayed"]),
    (Rule::Cancelled, &["cancelled", "canceled"]),
];

impl Rule {
    fn info(self) -> StatusInfo {
        let (category, progress, show_plane, show_progress) = match self {
            Rule::InFlight => (StatusCategory::InFlight, 0.6, true, true),
            Rule::Scheduled => (StatusCategory::Scheduled, 0.0, false, false),
            Rule::Landed => (StatusCategory::Landed, 1.0, false, true),
            Rule::Delayed => (StatusCategory::Delayed, 0.0, false, false),
            Rule::Cancelled => (StatusCategory::Cancelled, 0.0, false, false),
        };
        StatusInfo { category, progress, show_plane, show_progress }
    }
}

/// Map a raw upstream status onto a display category. Never fails; anything
/// unrecognized becomes [`StatusCategory::Unknown`] without progress display.
pub fn classify(raw_status: &str) -> StatusInfo {
    let lower = raw_status.to_lowercase();

    STATUS_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(rule, _)| rule.info())
        .unwrap_or_else(|| StatusInfo {
            category: StatusCategory::Unknown(raw_status.to_string()),
            progress: 0.0,
            show_plane: false,
            show_progress: false,
        })
}
