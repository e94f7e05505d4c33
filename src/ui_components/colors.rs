use eframe::egui::Color32;

// Deep space backdrop
pub const BG_SPACE_TOP: Color32 = Color32::from_rgb(6, 6, 22);
pub const BG_SPACE_BOTTOM: Color32 = Color32::from_rgb(18, 8, 40);
pub const BG_CARD: Color32 = Color32::from_rgb(20, 18, 44);
pub const BG_PANEL: Color32 = Color32::from_rgba_premultiplied(14, 12, 34, 215);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(236, 234, 255);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(170, 165, 210);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(110, 105, 150);

pub const ACCENT: Color32 = Color32::from_rgb(140, 110, 255);
pub const ACCENT_SOFT: Color32 = Color32::from_rgb(95, 75, 190);
pub const DANGER: Color32 = Color32::from_rgb(235, 90, 120);

pub const STAR: Color32 = Color32::from_rgb(255, 255, 255);
pub const RING: Color32 = Color32::from_rgb(150, 130, 255);
pub const GRID: Color32 = Color32::from_rgb(90, 80, 180);

/// Tile color for a roster color token; unknown tokens get the accent
pub fn token_color(token: &str) -> Color32 {
    match token {
        "violet" => Color32::from_rgb(150, 100, 255),
        "cyan" => Color32::from_rgb(60, 200, 230),
        "magenta" => Color32::from_rgb(220, 80, 200),
        "amber" => Color32::from_rgb(245, 170, 60),
        "indigo" => Color32::from_rgb(90, 90, 220),
        "gold" => Color32::from_rgb(235, 205, 90),
        "teal" => Color32::from_rgb(50, 180, 160),
        "rose" => Color32::from_rgb(240, 110, 140),
        _ => ACCENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_roster_token_has_its_own_color() {
        let colors: Vec<Color32> = crate::data::mock_roster()
            .iter()
            .map(|e| token_color(&e.color_token))
            .collect();
        assert!(colors.iter().all(|c| *c != ACCENT));
        assert_eq!(token_color("nebula"), ACCENT);
    }
}
