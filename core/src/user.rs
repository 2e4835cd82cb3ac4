use serde::{Deserialize, Serialize};

/// Display-only aggregate shown on the home and profile headers.
///
/// The controller builds this once with placeholder values and never updates
/// it. It is a fallback for rendering before a screen has fetched the real
/// figures for the session user; screens that need authoritative numbers
/// query the backend themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub name: String,
    pub level: u32,
    pub points: u32,
    pub recycled_items: u32,
    pub energy_saved_kwh: f32,
    pub co2_reduced_kg: f32,
}

impl Default for UserSummary {
    fn default() -> Self {
        Self {
            name: "Eco Warrior".to_string(),
            level: 1,
            points: 0,
            recycled_items: 0,
            energy_saved_kwh: 0.0,
            co2_reduced_kg: 0.0,
        }
    }
}
