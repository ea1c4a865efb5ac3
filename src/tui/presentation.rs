use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use daybook::navigator::ViewMode;
use crate::tui::{calendar_views, dialogs, screen::CalendarScreen};

pub fn ui(f: &mut Frame, screen: &CalendarScreen) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(main_chunks[1]);

    let chunks = [main_chunks[0], content_chunks[0], content_chunks[1], main_chunks[2]];
    let theme = &screen.theme;

    let title_text = format!("daybook - {} View", match screen.navigator.view_mode() {
        ViewMode::Month => "Month",
        ViewMode::Week => "Week",
    });

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    match screen.navigator.view_mode() {
        ViewMode::Month => calendar_views::month::render(f, screen, chunks[1]),
        ViewMode::Week => calendar_views::week::render(f, screen, chunks[1]),
    }

    calendar_views::entry_list::render(f, screen, chunks[2]);

    let (status_text, status_color) = status_line(screen);
    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[3]);

    if screen.show_help {
        dialogs::help::render(f, theme);
    }
}

fn status_line(screen: &CalendarScreen) -> (String, ratatui::style::Color) {
    let navigator = &screen.navigator;

    if let Some(notice) = navigator.notice() {
        return (format!("{} (Esc to dismiss)", notice.message), screen.theme.notice);
    }

    let text = if navigator.is_loading() {
        "Loading…".to_string()
    } else {
        format!(
            "Entries: {} | Press 'q' to quit, '?' for help",
            navigator.entries().total_entries()
        )
    };
    (text, screen.theme.status_bar)
}
