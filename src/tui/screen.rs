use chrono::{Days, NaiveDate};
use crossterm::event::KeyCode;
use std::time::Duration;

use daybook::{
    navigator::{CalendarNavigator, Direction, FetchRequest, ViewMode},
    ui::theme::Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Fetch(FetchRequest),
    Redraw,
}

/// Calendar screen state owned by the UI loop: the navigator plus the
/// day cursor used to pick a drill-down target.
pub struct CalendarScreen {
    pub navigator: CalendarNavigator,
    pub cursor: NaiveDate,
    pub today: NaiveDate,
    pub theme: Theme,
    pub notice_ttl: Duration,
    pub show_help: bool,
}

impl CalendarScreen {
    pub fn new(navigator: CalendarNavigator, today: NaiveDate, theme: Theme, notice_ttl: Duration) -> Self {
        Self {
            cursor: navigator.state().reference_date(),
            navigator,
            today,
            theme,
            notice_ttl,
            show_help: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> KeyAction {
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc) {
                self.show_help = false;
            }
            return KeyAction::Redraw;
        }

        let action = match key {
            KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
            KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
            KeyCode::Char('{') => self.navigate(Direction::Previous),
            KeyCode::Char('}') => self.navigate(Direction::Next),
            KeyCode::Char('m') => KeyAction::Fetch(self.navigator.set_view_mode(ViewMode::Month)),
            KeyCode::Char('w') => KeyAction::Fetch(self.navigator.set_view_mode(ViewMode::Week)),
            KeyCode::Enter => KeyAction::Fetch(self.navigator.select_date(self.cursor)),
            KeyCode::Char('t') => {
                self.cursor = self.today;
                KeyAction::Fetch(self.navigator.jump_to_today(self.today))
            }
            KeyCode::Char('r') => KeyAction::Fetch(self.navigator.reload()),
            KeyCode::Char('?') => {
                self.show_help = true;
                KeyAction::Redraw
            }
            KeyCode::Esc => {
                self.navigator.dismiss_notice();
                KeyAction::Redraw
            }
            _ => KeyAction::Redraw,
        };

        self.keep_cursor_visible();
        action
    }

    fn move_cursor(&mut self, days: i64) -> KeyAction {
        let step = Days::new(days.unsigned_abs());
        let moved = if days >= 0 {
            self.cursor.checked_add_days(step)
        } else {
            self.cursor.checked_sub_days(step)
        };
        let Some(moved) = moved else {
            return KeyAction::Redraw;
        };

        self.cursor = moved;
        let range = self.navigator.range();
        if moved < range.start {
            self.navigate_keeping_cursor(Direction::Previous)
        } else if moved > range.end {
            self.navigate_keeping_cursor(Direction::Next)
        } else {
            KeyAction::Redraw
        }
    }

    fn navigate(&mut self, direction: Direction) -> KeyAction {
        let request = self.navigator.navigate(direction);
        self.cursor = self.navigator.state().reference_date();
        KeyAction::Fetch(request)
    }

    fn navigate_keeping_cursor(&mut self, direction: Direction) -> KeyAction {
        KeyAction::Fetch(self.navigator.navigate(direction))
    }

    fn keep_cursor_visible(&mut self) {
        if !self.navigator.range().contains(self.cursor) {
            self.cursor = self.navigator.state().reference_date();
        }
    }
}
