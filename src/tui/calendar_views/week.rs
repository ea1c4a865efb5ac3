use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use daybook::ui::week_view;
use crate::tui::screen::CalendarScreen;

pub fn render(f: &mut Frame, screen: &CalendarScreen, area: ratatui::layout::Rect) {
    let theme = &screen.theme;
    let layout = week_view::calculate_layout(&screen.navigator, screen.cursor, screen.today);

    let week_range = format!("{} - {}",
        layout.range.start.format("%b %d"),
        layout.range.end.format("%b %d, %Y"));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(week_range, Style::default().fg(theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    for day in &layout.days {
        let marker = if day.is_cursor { ">" } else { " " };

        let style = if day.is_cursor {
            Style::default().bg(theme.cursor_bg).fg(theme.cursor_fg).add_modifier(Modifier::BOLD)
        } else if day.is_selected {
            Style::default().fg(theme.selected).add_modifier(Modifier::BOLD)
        } else if day.is_today {
            Style::default().fg(theme.today).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.weekday_header)
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.cursor_bg)),
            Span::styled(day.date.format(" %a %b %d ").to_string(), style),
        ]));

        if day.entries.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("    No entries", Style::default().fg(theme.outside_day)),
            ]));
        }

        for card in &day.entries {
            let emoji = card.mood.map(|m| m.emoji()).unwrap_or(" ");
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::raw(emoji),
                Span::raw(" "),
                Span::styled(card.headline.clone(), Style::default().fg(theme.entry_marker)),
            ]));
            for excerpt in &card.excerpt {
                lines.push(Line::from(vec![
                    Span::raw("     "),
                    Span::styled(excerpt.clone(), Style::default().fg(Color::Gray)),
                ]));
            }
        }

        lines.push(Line::from(""));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(content, area);
}
