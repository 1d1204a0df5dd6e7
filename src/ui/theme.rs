// TokenDeck - ui/theme.rs
//
// Colour scheme, status/kind colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::{LogKind, TokenStatus};
use egui::Color32;

/// Colour for a token status badge.
pub fn token_status_colour(status: TokenStatus) -> Color32 {
    match status {
        TokenStatus::Enabled => Color32::from_rgb(22, 163, 74),    // Green 600
        TokenStatus::Disabled => Color32::from_rgb(217, 119, 6),   // Amber 600
        TokenStatus::Expired => Color32::from_rgb(185, 28, 28),    // Red 800
        TokenStatus::Exhausted => Color32::from_rgb(220, 38, 38),  // Red 600
        TokenStatus::Unknown => Color32::from_rgb(107, 114, 128),  // Gray 500
    }
}

/// Colour for a usage-log kind badge.
pub fn log_kind_colour(kind: LogKind) -> Color32 {
    match kind {
        LogKind::TopUp => Color32::from_rgb(22, 163, 74),   // Green 600
        LogKind::Usage => Color32::from_rgb(37, 99, 235),   // Blue 600
        LogKind::Unknown => Color32::from_rgb(107, 114, 128), // Gray 500
    }
}

/// Status bar colours.
pub const STATUS_BG: Color32 = Color32::from_rgb(31, 41, 55);       // Gray 800
pub const STATUS_TEXT: Color32 = Color32::from_rgb(209, 213, 219);  // Gray 300

/// Layout constants.
pub const ROW_HEIGHT: f32 = 22.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
pub const SEARCH_BOX_WIDTH: f32 = 220.0;
