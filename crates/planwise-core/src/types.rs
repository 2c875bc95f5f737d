//! Domain types shared across the planner

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::confidence::ConfidenceAssessment;
use crate::{Error, Result};

/// Normalise a free-form label for comparison: lowercase, separators dropped.
fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Kind of event being planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Conference,
    Concert,
    Festival,
    NetworkingEvent,
    Exhibition,
    Workshop,
}

impl EventType {
    /// Label as shown in the form
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Conference => "Conference",
            EventType::Concert => "Concert",
            EventType::Festival => "Festival",
            EventType::NetworkingEvent => "Networking Event",
            EventType::Exhibition => "Exhibition",
            EventType::Workshop => "Workshop",
        }
    }

    /// All event types, in form order
    pub fn all() -> Vec<EventType> {
        vec![
            EventType::Conference,
            EventType::Concert,
            EventType::Festival,
            EventType::NetworkingEvent,
            EventType::Exhibition,
            EventType::Workshop,
        ]
    }

    /// Look up an event type by label, ignoring case and separators
    pub fn from_label(s: &str) -> Option<EventType> {
        let wanted = normalize_label(s);
        Self::all()
            .into_iter()
            .find(|t| normalize_label(t.label()) == wanted)
    }
}

/// Expected audience of an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudienceType {
    #[default]
    Mixed,
    Families,
    Public,
    Professionals,
    Students,
}

impl AudienceType {
    pub fn label(&self) -> &'static str {
        match self {
            AudienceType::Mixed => "Mixed",
            AudienceType::Families => "Families",
            AudienceType::Public => "Public",
            AudienceType::Professionals => "Professionals",
            AudienceType::Students => "Students",
        }
    }

    pub fn all() -> Vec<AudienceType> {
        vec![
            AudienceType::Mixed,
            AudienceType::Families,
            AudienceType::Public,
            AudienceType::Professionals,
            AudienceType::Students,
        ]
    }

    pub fn from_label(s: &str) -> Option<AudienceType> {
        let wanted = normalize_label(s);
        Self::all()
            .into_iter()
            .find(|a| normalize_label(a.label()) == wanted)
    }
}

/// How much AV and technical infrastructure the event needs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechRequirement {
    Low,
    #[default]
    Medium,
    High,
}

impl TechRequirement {
    pub fn label(&self) -> &'static str {
        match self {
            TechRequirement::Low => "Low",
            TechRequirement::Medium => "Medium",
            TechRequirement::High => "High",
        }
    }

    pub fn all() -> Vec<TechRequirement> {
        vec![
            TechRequirement::Low,
            TechRequirement::Medium,
            TechRequirement::High,
        ]
    }

    pub fn from_label(s: &str) -> Option<TechRequirement> {
        let wanted = normalize_label(s);
        Self::all()
            .into_iter()
            .find(|t| normalize_label(t.label()) == wanted)
    }
}

macro_rules! label_impls {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                $ty::from_label(s).ok_or_else(|| {
                    let options: Vec<&str> = $ty::all().iter().map(|v| v.label()).collect();
                    Error::InvalidInput(format!(
                        "unknown {} '{}' (expected one of: {})",
                        $what,
                        s,
                        options.join(", ")
                    ))
                })
            }
        }
    };
}

label_impls!(EventType, "event type");
label_impls!(AudienceType, "audience type");
label_impls!(TechRequirement, "tech requirement");

/// Validated form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequest {
    pub event_type: EventType,
    pub duration_hours: u32,
    /// Stated budget in rupees
    pub user_budget: u64,
    pub catering_required: bool,
}

impl EventRequest {
    pub const MIN_DURATION_HOURS: u32 = 1;
    pub const MAX_DURATION_HOURS: u32 = 24;
    pub const MIN_BUDGET: u64 = 1000;

    /// Build a request, range-checking duration and budget
    pub fn new(
        event_type: EventType,
        duration_hours: u32,
        user_budget: u64,
        catering_required: bool,
    ) -> Result<Self> {
        if !(Self::MIN_DURATION_HOURS..=Self::MAX_DURATION_HOURS).contains(&duration_hours) {
            return Err(Error::InvalidInput(format!(
                "duration must be between {} and {} hours, got {}",
                Self::MIN_DURATION_HOURS,
                Self::MAX_DURATION_HOURS,
                duration_hours
            )));
        }

        if user_budget < Self::MIN_BUDGET {
            return Err(Error::InvalidInput(format!(
                "budget must be at least {}, got {}",
                Self::MIN_BUDGET,
                user_budget
            )));
        }

        Ok(Self {
            event_type,
            duration_hours,
            user_budget,
            catering_required,
        })
    }
}

/// Audience and tech prediction shown to the user for confirmation.
///
/// Always fully populated; missing or unrecognised fields take the defaults
/// (`Mixed`, `Medium`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub audience_type: AudienceType,
    pub tech_requirement: TechRequirement,
}

impl Suggestion {
    pub fn new(audience_type: AudienceType, tech_requirement: TechRequirement) -> Self {
        Self {
            audience_type,
            tech_requirement,
        }
    }
}

/// Everything computed for one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPlan {
    pub request: EventRequest,
    pub suggestion: Suggestion,
    pub predicted_budget: u64,
    pub confidence: ConfidenceAssessment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_labels_round_trip() {
        for event_type in EventType::all() {
            assert_eq!(EventType::from_label(event_type.label()), Some(event_type));
        }
    }

    #[test]
    fn test_event_type_from_label_lenient() {
        assert_eq!(
            EventType::from_label("networking event"),
            Some(EventType::NetworkingEvent)
        );
        assert_eq!(
            EventType::from_label("networking-event"),
            Some(EventType::NetworkingEvent)
        );
        assert_eq!(
            EventType::from_label("NetworkingEvent"),
            Some(EventType::NetworkingEvent)
        );
        assert_eq!(EventType::from_label("WORKSHOP"), Some(EventType::Workshop));
        assert_eq!(EventType::from_label("wedding"), None);
    }

    #[test]
    fn test_from_str_error_lists_options() {
        let err = "General".parse::<AudienceType>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("General"));
        assert!(message.contains("Professionals"));
    }

    #[test]
    fn test_display_uses_form_labels() {
        assert_eq!(EventType::NetworkingEvent.to_string(), "Networking Event");
        assert_eq!(AudienceType::Students.to_string(), "Students");
        assert_eq!(TechRequirement::High.to_string(), "High");
    }

    #[test]
    fn test_suggestion_defaults() {
        let suggestion = Suggestion::default();
        assert_eq!(suggestion.audience_type, AudienceType::Mixed);
        assert_eq!(suggestion.tech_requirement, TechRequirement::Medium);
    }

    #[test]
    fn test_event_request_accepts_bounds() {
        assert!(EventRequest::new(EventType::Concert, 1, 1000, false).is_ok());
        assert!(EventRequest::new(EventType::Concert, 24, 1000, true).is_ok());
    }

    #[test]
    fn test_event_request_rejects_out_of_range() {
        assert!(matches!(
            EventRequest::new(EventType::Concert, 0, 5000, false),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            EventRequest::new(EventType::Concert, 25, 5000, false),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            EventRequest::new(EventType::Concert, 4, 999, false),
            Err(Error::InvalidInput(_))
        ));
    }
}
