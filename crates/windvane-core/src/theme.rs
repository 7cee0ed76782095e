use ratatui::style::Style;

/// Styles for the block roles of the documentation page.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub title: Style,
    pub heading: Style,
    pub subheading: Style,
    pub divider: Style,
    pub caption: Style,
    pub code: Style,
    pub formula: Style,
    pub image_frame: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            title: Style::default().bold(),
            heading: Style::default().cyan().bold(),
            subheading: Style::default().cyan(),
            divider: Style::default().dark_gray(),
            caption: Style::default().dark_gray().italic(),
            code: Style::default().green(),
            formula: Style::default().yellow(),
            image_frame: Style::default().blue(),
        }
    }
}
