//! Step list pane with the cursor and the in-flight frame counter

use super::utils::pane_block;
use crate::engine::FrameSample;
use crate::step::Step;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Data needed to render the step list
pub struct StepsRenderData<'a> {
    pub steps: &'a [Step],
    /// Index of the next step to execute
    pub cursor: usize,
    pub sample: Option<FrameSample>,
}

/// Render the step list, keeping the cursor in view
pub fn render_steps_pane(
    frame: &mut Frame,
    area: Rect,
    data: StepsRenderData,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Steps ({}) ", data.steps.len());
    let block = pane_block(&title, is_focused);

    if data.steps.is_empty() {
        let paragraph = Paragraph::new("(no steps queued, press 1-9 to pick an operation)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let focus_row = data.cursor.min(data.steps.len() - 1);
    if focus_row < *scroll_offset {
        *scroll_offset = focus_row;
    } else if focus_row >= *scroll_offset + visible_height {
        *scroll_offset = focus_row + 1 - visible_height;
    }

    let items: Vec<ListItem> = data
        .steps
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, step)| step_item(i, step, &data))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn step_item<'a>(index: usize, step: &'a Step, data: &StepsRenderData) -> ListItem<'a> {
    let is_current = index == data.cursor;
    let done = index < data.cursor;

    let marker = if is_current { "▶ " } else { "  " };
    let text_style = if done {
        Style::default().fg(DEFAULT_THEME.comment)
    } else if is_current {
        Style::default()
            .fg(DEFAULT_THEME.fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(DEFAULT_THEME.highlight)),
        Span::styled(format!("{:>3} ", index + 1), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!("{:<10} ", step.kind.label()),
            Style::default().fg(DEFAULT_THEME.step_color(step.kind)),
        ),
        Span::styled(step.description.as_str(), text_style),
    ];

    if let Some(sample) = data.sample.filter(|s| s.step == index) {
        spans.push(Span::styled(
            format!("  {}/{}", sample.frame, sample.frames),
            Style::default().fg(DEFAULT_THEME.secondary),
        ));
    }

    let item = ListItem::new(Line::from(spans));
    if is_current {
        item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
    } else {
        item
    }
}
