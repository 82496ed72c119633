use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::format::truncate_unicode;
use crate::menu::MenuEntry;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    entries: &[MenuEntry],
    selected: usize,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Keep the selected row visible on short terminals
    let visible = inner.height as usize;
    let offset = if selected >= visible && visible > 0 {
        selected + 1 - visible
    } else {
        0
    };

    let max_label = (inner.width as usize).saturating_sub(4);
    let lines: Vec<Line> = entries
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, entry)| menu_line(entry, i == selected, max_label, theme))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn menu_line<'a>(entry: &'a MenuEntry, selected: bool, max_label: usize, theme: &Theme) -> Line<'a> {
    if entry.separator {
        return Line::from(Span::styled(
            "─".repeat(max_label.saturating_add(4).min(40)),
            Style::default().fg(theme.overlay_border),
        ));
    }

    let mark = match entry.checked {
        Some(true) => Span::styled("✓ ", Style::default().fg(theme.menu_check)),
        Some(false) => Span::raw("  "),
        None => Span::raw("  "),
    };

    let label_style = if selected {
        Style::default()
            .fg(theme.menu_selected_fg)
            .bg(theme.menu_selected_bg)
            .add_modifier(Modifier::BOLD)
    } else if entry.selectable {
        Style::default().fg(theme.text_primary)
    } else {
        Style::default().fg(theme.text_secondary)
    };

    let label = truncate_unicode(&entry.label, max_label);
    let cursor = if selected {
        Span::styled("> ", Style::default().fg(theme.menu_selected_bg))
    } else {
        Span::raw("  ")
    };

    Line::from(vec![cursor, mark, Span::styled(label, label_style)])
}
