use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use crate::tui::screen::CalendarScreen;

pub fn render(f: &mut Frame, screen: &CalendarScreen, area: ratatui::layout::Rect) {
    let theme = &screen.theme;
    let entries = screen.navigator.entries().on(screen.cursor);

    let title = format!("Entries on {}", screen.cursor.format("%B %d, %Y"));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(title, Style::default().fg(theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    if entries.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("No entries", Style::default().fg(theme.outside_day)),
        ]));
    }

    for entry in entries {
        let time_str = entry.created_at.format("%H:%M").to_string();

        lines.push(Line::from(vec![
            Span::styled(time_str, Style::default().fg(theme.today)),
            Span::raw(" "),
            Span::styled(entry.headline().to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]));

        for text in entry.content.lines() {
            lines.push(Line::from(format!("  {}", text)));
        }

        if let Some(mood) = entry.mood {
            lines.push(Line::from(vec![
                Span::styled(format!("  Mood: {} {}", mood.emoji(), mood), Style::default().fg(theme.mood)),
            ]));
        }

        lines.push(Line::from(""));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(content, area);
}
