use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,
    pub selected: Color,
    pub today: Color,
    pub entry_marker: Color,
    pub weekday_header: Color,
    pub outside_day: Color,
    pub mood: Color,
    pub status_bar: Color,
    pub notice: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            cursor_bg: Color::Blue,
            cursor_fg: Color::White,
            selected: Color::Magenta,
            today: Color::Green,
            entry_marker: Color::Cyan,
            weekday_header: Color::Yellow,
            outside_day: Color::DarkGray,
            mood: Color::Gray,
            status_bar: Color::White,
            notice: Color::Red,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            cursor_bg: Color::Rgb(60, 56, 54),
            cursor_fg: Color::Rgb(235, 219, 178),
            selected: Color::Rgb(211, 134, 155),
            today: Color::Rgb(184, 187, 38),
            entry_marker: Color::Rgb(142, 192, 124),
            weekday_header: Color::Rgb(254, 128, 25),
            outside_day: Color::Rgb(146, 131, 116),
            mood: Color::Rgb(189, 174, 147),
            status_bar: Color::Rgb(235, 219, 178),
            notice: Color::Rgb(251, 73, 52),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            cursor_bg: Color::Rgb(59, 66, 82),
            cursor_fg: Color::Rgb(236, 239, 244),
            selected: Color::Rgb(180, 142, 173),
            today: Color::Rgb(163, 190, 140),
            entry_marker: Color::Rgb(129, 161, 193),
            weekday_header: Color::Rgb(235, 203, 139),
            outside_day: Color::Rgb(76, 86, 106),
            mood: Color::Rgb(216, 222, 233),
            status_bar: Color::Rgb(216, 222, 233),
            notice: Color::Rgb(191, 97, 106),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(Theme::get_by_name("solarized").name, "default");
    }

    #[test]
    fn theme_lookup_ignores_case() {
        assert_eq!(Theme::get_by_name("Nord").name, "nord");
    }

    #[test]
    fn every_listed_theme_resolves_to_itself() {
        for name in Theme::available_themes() {
            assert_eq!(Theme::get_by_name(name).name, name);
        }
    }
}
