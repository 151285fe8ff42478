use crate::step::StepKind;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub highlight: Color, // Yellow for the current step's targets
    pub compare: Color,   // Cyan
    pub link: Color,      // Pink for pointers and tree edges
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    current_line_bg: Color::Rgb(50, 50, 70),
    highlight: Color::Rgb(249, 226, 175),
    compare: Color::Rgb(148, 226, 213),
    link: Color::Rgb(245, 194, 231),
};

impl Theme {
    /// Accent used for a step's targets and its label in the step list
    pub fn step_color(&self, kind: StepKind) -> Color {
        match kind {
            StepKind::Insert => self.success,
            StepKind::Delete | StepKind::Fade => self.error,
            StepKind::Compare => self.compare,
            StepKind::Swap | StepKind::Move => self.secondary,
            StepKind::Highlight | StepKind::Scale => self.highlight,
            StepKind::Connect | StepKind::Disconnect => self.link,
        }
    }
}
