use bevy::color::palettes::tailwind;
use bevy::prelude::*;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

pub const PANEL_WIDTH: f32 = 300.0;
pub const STATUS_BAR_HEIGHT: f32 = 22.0;
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;

// ---------------------------------------------------------------------------
// Type scale
// ---------------------------------------------------------------------------

pub const FONT_SM: f32 = 12.0;
pub const FONT_MD: f32 = 13.0;
pub const FONT_TITLE: f32 = 18.0;

// ---------------------------------------------------------------------------
// Colors (Tailwind Zinc dark palette)
// ---------------------------------------------------------------------------

/// Panel body background
pub const PANEL_BG: Color = Color::Srgba(tailwind::ZINC_900);
/// Default button background
pub const BUTTON_BG: Color = Color::Srgba(tailwind::ZINC_800);
/// Background of the active option in a selector row
pub const ACTIVE_BG: Color = Color::Srgba(tailwind::ZINC_600);
/// Save-to-profile accent, matching the sauce tones of the scene
pub const ACCENT_BG: Color = Color::srgb(0.353, 0.110, 0.110);
/// Status bar background
pub const STATUS_BAR_BG: Color = Color::Srgba(tailwind::ZINC_800);
/// Collection overlay backdrop
pub const OVERLAY_BG: Color = Color::srgba(0.0, 0.0, 0.0, 0.85);
/// Collection entry row background
pub const ROW_BG: Color = Color::Srgba(tailwind::ZINC_800);

pub const TEXT_PRIMARY: Color = Color::Srgba(tailwind::ZINC_100);
pub const TEXT_SECONDARY: Color = Color::Srgba(tailwind::ZINC_400);
