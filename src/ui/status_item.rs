use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::app::Readout;
use crate::ui::theme::Theme;

/// The status-bar item: wattage text, a percentage bar, percentage text.
/// The bar turns to the alert color while the non-system limit is exceeded.
pub fn render(frame: &mut Frame, area: Rect, readout: &Readout, alert: bool, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " rambar ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(10),
            Constraint::Length(6),
        ])
        .split(inner);

    let watts = Paragraph::new(Span::styled(
        readout.watts_text.clone(),
        Style::default()
            .fg(theme.text_primary)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);
    frame.render_widget(watts, chunks[0]);

    let fill = if alert {
        theme.gauge_alert
    } else {
        theme.gauge_filled
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(fill).bg(theme.gauge_unfilled))
        .ratio(f64::from(readout.used_percent) / 100.0)
        .label("");
    // Breathing room between the wattage and the bar
    let bar_area = Rect {
        x: chunks[1].x + 1,
        width: chunks[1].width.saturating_sub(2),
        ..chunks[1]
    };
    frame.render_widget(gauge, bar_area);

    let percent = Paragraph::new(Span::styled(
        format!("{}%", readout.used_percent),
        Style::default()
            .fg(theme.text_primary)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Left);
    frame.render_widget(percent, chunks[2]);
}
