use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use daybook::ui::theme::Theme;

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = f.size();
    let help_width = 52u16.min(area.width);
    let help_height = 20u16.min(area.height);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width,
        height: help_height,
    };

    f.render_widget(Clear, help_area);

    let section = Style::default().fg(theme.weekday_header);

    let help_text = vec![
        Line::from(vec![Span::styled("daybook Help", Style::default().fg(theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![Span::styled("Cursor:", section)]),
        Line::from("  h/l      - Previous/next day"),
        Line::from("  j/k      - Next/previous week"),
        Line::from("  t        - Jump to today"),
        Line::from(""),
        Line::from(vec![Span::styled("Navigation:", section)]),
        Line::from("  { / }    - Previous/next month or week"),
        Line::from("  m/w      - Month/Week view"),
        Line::from("  Enter    - Show the week of the cursor day"),
        Line::from("  r        - Reload entries"),
        Line::from(""),
        Line::from(vec![Span::styled("Other:", section)]),
        Line::from("  Esc      - Dismiss message"),
        Line::from("  ?        - Toggle this help"),
        Line::from("  q        - Quit"),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Help (q to close) ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
