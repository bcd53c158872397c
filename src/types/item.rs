use serde::{Deserialize, Serialize};

/// Closed category set for itinerary entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Activity,
    Meal,
    Transport,
    Accommodation,
}

impl Category {
    /// Marker color used by map renderers
    pub fn marker_color(&self) -> &'static str {
        match self {
            Category::Activity => "#1e40af",
            Category::Meal => "#ea580c",
            Category::Transport => "#059669",
            Category::Accommodation => "#7c3aed",
        }
    }

    /// Emoji icon used in marker popups and timeline badges
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Activity => "🏃‍♂️",
            Category::Meal => "🍽️",
            Category::Transport => "🚗",
            Category::Accommodation => "🏨",
        }
    }
}

/// One scheduled entry in the itinerary: an activity, meal, transport leg,
/// or lodging stop. The wire form is camelCase to match the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryItem {
    pub id: String,
    /// 1-based day the entry belongs to
    pub day: u32,
    pub title: String,
    pub description: String,
    /// Time of day, "HH:MM"
    pub time: String,
    pub location: String,
    /// `[latitude, longitude]`
    pub coordinates: [f64; 2],
    pub is_locked: bool,
    pub category: Category,
}

/// User-supplied fields for a new activity; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    pub title: String,
    pub description: String,
    pub time: String,
    pub location: String,
    pub coordinates: [f64; 2],
    pub category: Category,
}

/// Initial Mauritius itinerary loaded at startup.
pub fn seed_itinerary() -> Vec<ItineraryItem> {
    vec![
        ItineraryItem {
            id: "1".to_string(),
            day: 1,
            title: "Arrival & Check-in".to_string(),
            description: "Airport pickup and hotel check-in at Le Morne".to_string(),
            time: "14:00".to_string(),
            location: "Le Morne Brabant".to_string(),
            coordinates: [-20.4569, 57.3108],
            is_locked: false,
            category: Category::Accommodation,
        },
        ItineraryItem {
            id: "2".to_string(),
            day: 1,
            title: "Sunset Beach Walk".to_string(),
            description: "Romantic walk along Le Morne beach with stunning sunset views"
                .to_string(),
            time: "18:00".to_string(),
            location: "Le Morne Beach".to_string(),
            coordinates: [-20.4569, 57.3108],
            is_locked: false,
            category: Category::Activity,
        },
        ItineraryItem {
            id: "3".to_string(),
            day: 2,
            title: "Underwater Sea Walk".to_string(),
            description: "Explore marine life without diving skills at Blue Bay".to_string(),
            time: "09:00".to_string(),
            location: "Blue Bay Marine Park".to_string(),
            coordinates: [-20.4667, 57.7167],
            is_locked: false,
            category: Category::Activity,
        },
        ItineraryItem {
            id: "4".to_string(),
            day: 2,
            title: "Creole Lunch".to_string(),
            description: "Authentic Mauritian cuisine at local restaurant".to_string(),
            time: "13:00".to_string(),
            location: "Mahebourg".to_string(),
            coordinates: [-20.4082, 57.7],
            is_locked: false,
            category: Category::Meal,
        },
        ItineraryItem {
            id: "5".to_string(),
            day: 3,
            title: "Chamarel Seven Colored Earth".to_string(),
            description: "Visit the famous geological formation and Chamarel Waterfall"
                .to_string(),
            time: "10:00".to_string(),
            location: "Chamarel".to_string(),
            coordinates: [-20.4225, 57.3756],
            is_locked: false,
            category: Category::Activity,
        },
    ]
}
