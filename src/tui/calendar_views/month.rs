use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use chrono::{Datelike, NaiveDate};
use daybook::ui::month_view;
use crate::tui::screen::CalendarScreen;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn render(f: &mut Frame, screen: &CalendarScreen, area: ratatui::layout::Rect) {
    let theme = &screen.theme;
    let layout = month_view::calculate_layout(&screen.navigator, screen.cursor, screen.today);

    let month_name = NaiveDate::from_ymd_opt(layout.year, layout.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", layout.year, layout.month));

    let header: Vec<Span> = WEEKDAYS
        .iter()
        .map(|name| Span::styled(format!(" {}  ", name), Style::default().fg(theme.weekday_header)))
        .collect();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(month_name, Style::default().fg(theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(header),
    ];

    for week in &layout.weeks {
        let mut day_spans = Vec::new();

        for cell in &week.days {
            let mut style = Style::default();

            if !cell.is_current_month {
                style = style.fg(theme.outside_day);
            } else if cell.is_cursor {
                style = style.bg(theme.cursor_bg).fg(theme.cursor_fg).add_modifier(Modifier::BOLD);
            } else if cell.is_today {
                style = style.fg(theme.today).add_modifier(Modifier::BOLD);
            }

            day_spans.push(Span::styled(format!(" {:>2}", cell.date.day()), style));

            let marker = match cell.entry_count {
                0 => "   ".to_string(),
                1..=9 => format!("·{} ", cell.entry_count),
                _ => "·+ ".to_string(),
            };
            day_spans.push(Span::styled(marker, Style::default().fg(theme.entry_marker)));
        }

        lines.push(Line::from(day_spans));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("hjkl", Style::default().fg(Color::Cyan)),
        Span::raw(" = Move | "),
        Span::styled("{ }", Style::default().fg(Color::Cyan)),
        Span::raw(" = Month | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" = Week of day | "),
        Span::styled("t", Style::default().fg(Color::Green)),
        Span::raw(" = Today"),
    ]));

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
