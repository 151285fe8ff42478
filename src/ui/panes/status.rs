//! Status bar rendering with keybindings and playback indicators

use crate::engine::PlaybackState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub current_step: usize,
    pub total_steps: usize,
    pub state: PlaybackState,
    pub speed: f32,
    /// Name of the operation that produced the queue
    pub operation: Option<&'a str>,
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left side: position, operation and message
    let step_text = format!(" Step {}/{} ", data.current_step, data.total_steps);
    let bar_bg = Style::default().bg(DEFAULT_THEME.current_line_bg);

    let mut left_spans = vec![
        Span::styled(
            step_text,
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {:.2}x ", data.speed),
            Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black),
        ),
    ];
    if let Some(operation) = data.operation {
        left_spans.push(Span::styled(
            format!(" {} ", operation),
            bar_bg.fg(DEFAULT_THEME.highlight),
        ));
    }
    left_spans.push(Span::styled(" | ", bar_bg.fg(DEFAULT_THEME.comment)));
    left_spans.push(Span::styled(
        format!(" {} ", data.message),
        bar_bg.fg(DEFAULT_THEME.fg),
    ));

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar_bg)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar_bg.fg(DEFAULT_THEME.fg);
    let sep_style = bar_bg.fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in [
        (" ⎵ ", " play/pause "),
        (" → ", " step "),
        (" s/r/c ", " stop/reset/clear "),
        (" +/- ", " speed "),
        (" ⇥ ", " structure "),
        (" 1-9 ", " op "),
        ("q", " quit "),
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(key, key_style));
        right_spans.push(Span::styled(desc, desc_style));
    }

    let badge = match data.state {
        PlaybackState::Playing => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        PlaybackState::Paused => Some((" ⏸ PAUSED ", DEFAULT_THEME.highlight)),
        PlaybackState::Stopped => Some((" ■ STOPPED ", DEFAULT_THEME.error)),
        PlaybackState::Completed => Some((" END ", DEFAULT_THEME.error)),
        PlaybackState::Idle if data.total_steps > 0 && data.current_step == 0 => {
            Some((" START ", DEFAULT_THEME.success))
        }
        PlaybackState::Idle => None,
    };
    if let Some((text, color)) = badge {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar_bg)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
