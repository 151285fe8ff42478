//! Helpers shared by the panes

use crate::engine::FrameSample;
use crate::step::{Step, StepKind, TargetRef};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus-dependent border colour
pub fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// What the structure pane needs to know about the step on screen
#[derive(Clone, Copy)]
pub struct Focus<'a> {
    pub step: Option<&'a Step>,
    pub sample: Option<FrameSample>,
}

impl Focus<'_> {
    pub fn touches(&self, target: TargetRef) -> bool {
        self.step.is_some_and(|s| s.targets().any(|t| t == target))
    }

    /// Style for an element, given its resting style
    pub fn style(&self, target: TargetRef, base: Style) -> Style {
        let Some(step) = self.step.filter(|_| self.touches(target)) else {
            return base;
        };
        let mut style = base
            .fg(DEFAULT_THEME.step_color(step.kind))
            .add_modifier(Modifier::BOLD);

        // Fading elements dim past the halfway point, appearing ones before it
        if let Some(sample) = self.sample {
            if sample.opacity < 0.5 {
                style = style.add_modifier(Modifier::DIM);
            }
            if step.kind == StepKind::Scale && sample.scale > 1.1 {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
        }
        if step.kind == StepKind::Swap {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }
}
