use ratatui::style::Color;

/// Theme data structure containing all colors used in the application
#[derive(Debug, Clone)]
pub struct Theme {
    // Sidebar
    pub sidebar_bg: Color,
    pub sidebar_fg: Color,
    pub sidebar_border: Color,
    pub header_title: Color,
    pub header_version: Color,
    pub section_heading: Color,
    pub link_active_bg: Color,
    pub link_active_fg: Color,
    pub link_external: Color,
    pub menu_cursor_bg: Color,

    // Filter input
    pub filter_icon: Color,
    pub filter_text: Color,
    pub filter_placeholder: Color,
    pub filter_focused_border: Color,

    // Candidates
    pub candidate_selected_bg: Color,
    pub candidate_selected_fg: Color,
    pub selected_label_fg: Color,
    pub selected_label_bg: Color,

    // Content pane
    pub content_title: Color,
    pub content_text: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_help_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Sidebar
            sidebar_bg: Color::Rgb(27, 28, 29),
            sidebar_fg: Color::Gray,
            sidebar_border: Color::DarkGray,
            header_title: Color::White,
            header_version: Color::Gray,
            section_heading: Color::White,
            link_active_bg: Color::Rgb(60, 60, 60),
            link_active_fg: Color::White,
            link_external: Color::Gray,
            menu_cursor_bg: Color::Rgb(45, 45, 45),

            // Filter input
            filter_icon: Color::Rgb(0, 181, 173),
            filter_text: Color::White,
            filter_placeholder: Color::DarkGray,
            filter_focused_border: Color::Rgb(0, 181, 173),

            // Candidates
            candidate_selected_bg: Color::Rgb(60, 60, 60),
            candidate_selected_fg: Color::White,
            selected_label_fg: Color::Rgb(0x88, 0xff, 0xff),
            selected_label_bg: Color::Rgb(0x22, 0x22, 0x22),

            // Content pane
            content_title: Color::Yellow,
            content_text: Color::Reset,

            // Status bar
            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_help_text: Color::Gray,
        }
    }
}

/// Get the current theme
pub fn get_theme() -> Theme {
    Theme::default()
}
