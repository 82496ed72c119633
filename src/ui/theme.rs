use ratatui::style::Color;

/// Fixed palette; the widget is meant to look like a menu-bar item, not a
/// themeable dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    pub overlay_border: Color,
    pub header_accent_fg: Color,
    pub header_accent_bg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub gauge_filled: Color,
    pub gauge_alert: Color,
    pub gauge_unfilled: Color,
    pub menu_selected_fg: Color,
    pub menu_selected_bg: Color,
    pub menu_check: Color,
    pub statusbar_bg: Color,
    pub pill_key_fg: Color,
    pub pill_key_bg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            overlay_border: Color::Rgb(88, 91, 112),
            header_accent_fg: Color::Rgb(17, 17, 27),
            header_accent_bg: Color::Rgb(137, 180, 250),
            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(147, 153, 178),
            gauge_filled: Color::Rgb(166, 227, 161),
            gauge_alert: Color::Rgb(243, 139, 168),
            gauge_unfilled: Color::Rgb(49, 50, 68),
            menu_selected_fg: Color::Rgb(17, 17, 27),
            menu_selected_bg: Color::Rgb(137, 180, 250),
            menu_check: Color::Rgb(166, 227, 161),
            statusbar_bg: Color::Rgb(24, 24, 37),
            pill_key_fg: Color::Rgb(17, 17, 27),
            pill_key_bg: Color::Rgb(137, 180, 250),
            pill_desc_fg: Color::Rgb(147, 153, 178),
            surface_bg: Color::Rgb(30, 30, 46),
        }
    }
}
