pub mod menu;
pub mod status_item;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::ui::theme::Theme;

pub fn draw(frame: &mut Frame, app: &App) {
    let theme = Theme::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    status_item::render(
        frame,
        chunks[0],
        &app.readout,
        app.limit_exceeded(),
        &theme,
    );

    let entries = app.menu_entries();
    menu::render(frame, chunks[1], &entries, app.selected, &theme);

    statusbar::render(frame, chunks[2], &theme);
}
