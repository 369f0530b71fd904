//! Interactive prompts: list selection, text input, yes/no confirmation

use std::io::{self, Stdout};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal, TerminalOptions, Viewport};

const MAX_SELECT_ROWS: u16 = 10;

#[derive(thiserror::Error, Debug)]
pub enum PromptError {
    #[error("prompt interrupted")]
    Interrupted,
    #[error("input closed")]
    Closed,
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptStep<T> {
    Pending,
    Done(T),
    Interrupted,
}

pub trait Prompter {
    /// Single choice from a list; returns the chosen index.
    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize, PromptError>;

    /// Free text; empty or whitespace-only answers are rejected with
    /// `empty_message` and asked again.
    fn input(&mut self, message: &str, empty_message: &str) -> Result<String, PromptError>;

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError>;
}

pub fn validate_non_empty(input: &str, empty_message: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err(empty_message.to_string())
    } else {
        Ok(())
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectState {
    pub len: usize,
    pub selected: usize,
}

impl SelectState {
    pub fn new(len: usize) -> Self {
        Self { len, selected: 0 }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptStep<usize> {
        if is_interrupt(&key) {
            return PromptStep::Interrupted;
        }
        if self.len == 0 {
            return PromptStep::Pending;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + self.len - 1) % self.len;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % self.len;
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.len - 1,
            KeyCode::Enter => return PromptStep::Done(self.selected),
            _ => {}
        }
        PromptStep::Pending
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputState {
    pub value: String,
    pub empty_message: String,
    pub error: Option<String>,
}

impl InputState {
    pub fn new(empty_message: &str) -> Self {
        Self {
            value: String::new(),
            empty_message: empty_message.to_string(),
            error: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptStep<String> {
        if is_interrupt(&key) {
            return PromptStep::Interrupted;
        }
        match key.code {
            KeyCode::Char(ch) => {
                self.value.push(ch);
                self.error = None;
            }
            KeyCode::Backspace => {
                self.value.pop();
                self.error = None;
            }
            KeyCode::Enter => match validate_non_empty(&self.value, &self.empty_message) {
                Ok(()) => return PromptStep::Done(self.value.clone()),
                Err(message) => self.error = Some(message),
            },
            _ => {}
        }
        PromptStep::Pending
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmState {
    pub default: bool,
}

impl ConfirmState {
    pub fn handle_key(&mut self, key: KeyEvent) -> PromptStep<bool> {
        if is_interrupt(&key) {
            return PromptStep::Interrupted;
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => PromptStep::Done(true),
            KeyCode::Char('n') | KeyCode::Char('N') => PromptStep::Done(false),
            KeyCode::Enter => PromptStep::Done(self.default),
            _ => PromptStep::Pending,
        }
    }

    pub fn hint(&self) -> &'static str {
        if self.default {
            "(Y/n)"
        } else {
            "(y/N)"
        }
    }
}

/// Prompts drawn in an inline viewport below the current output. Once
/// answered, the viewport is cleared and replaced by a one-line summary.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize, PromptError> {
        let rows = (choices.len() as u16).clamp(1, MAX_SELECT_ROWS);
        let mut state = SelectState::new(choices.len());
        let mut list_state = ListState::default();
        let index = run_inline(
            rows + 1,
            &mut state,
            |frame, state| {
                let [header, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)])
                    .areas(frame.area());
                frame.render_widget(Paragraph::new(question_line(message, "")), header);
                let items: Vec<ListItem> = choices
                    .iter()
                    .map(|choice| ListItem::new(choice.as_str()))
                    .collect();
                let list = List::new(items)
                    .highlight_symbol("❯ ")
                    .highlight_style(Style::default().fg(Color::Cyan));
                list_state.select(Some(state.selected));
                frame.render_stateful_widget(list, body, &mut list_state);
            },
            |state, key| state.handle_key(key),
        )?;
        let answer = choices.get(index).map(String::as_str).unwrap_or_default();
        write_summary(message, answer)?;
        Ok(index)
    }

    fn input(&mut self, message: &str, empty_message: &str) -> Result<String, PromptError> {
        let mut state = InputState::new(empty_message);
        let value = run_inline(
            2,
            &mut state,
            |frame, state| {
                let [header, footer] =
                    Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
                        .areas(frame.area());
                let line = question_line(message, &state.value);
                let cursor_x = header.x + line.width() as u16;
                frame.render_widget(Paragraph::new(line), header);
                if let Some(error) = &state.error {
                    let warning = Line::from(Span::styled(
                        format!(">> {error}"),
                        Style::default().fg(Color::Red),
                    ));
                    frame.render_widget(Paragraph::new(warning), footer);
                }
                frame.set_cursor_position((cursor_x, header.y));
            },
            |state, key| state.handle_key(key),
        )?;
        write_summary(message, &value)?;
        Ok(value)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        let mut state = ConfirmState { default };
        let answer = run_inline(
            1,
            &mut state,
            |frame, state| {
                let line = question_line(message, state.hint());
                frame.render_widget(Paragraph::new(line), frame.area());
            },
            |state, key| state.handle_key(key),
        )?;
        write_summary(message, if answer { "Yes" } else { "No" })?;
        Ok(answer)
    }
}

fn question_line<'a>(message: &'a str, answer: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled("? ", Style::default().fg(Color::Green)),
        Span::styled(message, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::raw(answer),
    ])
}

fn run_inline<S, T>(
    height: u16,
    state: &mut S,
    mut view: impl FnMut(&mut Frame, &S),
    mut on_key: impl FnMut(&mut S, KeyEvent) -> PromptStep<T>,
) -> Result<T, PromptError> {
    let mut terminal = Terminal::with_options(
        CrosstermBackend::new(io::stdout()),
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )?;
    enable_raw_mode()?;
    let outcome = drive(&mut terminal, state, &mut view, &mut on_key);
    let cleared = terminal.clear();
    disable_raw_mode()?;
    terminal.show_cursor()?;
    cleared?;
    outcome
}

fn drive<S, T>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut S,
    view: &mut impl FnMut(&mut Frame, &S),
    on_key: &mut impl FnMut(&mut S, KeyEvent) -> PromptStep<T>,
) -> Result<T, PromptError> {
    loop {
        terminal.draw(|frame| view(frame, state))?;
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match on_key(state, key) {
            PromptStep::Pending => {}
            PromptStep::Done(value) => return Ok(value),
            PromptStep::Interrupted => return Err(PromptError::Interrupted),
        }
    }
}

fn write_summary(message: &str, answer: &str) -> io::Result<()> {
    execute!(
        io::stdout(),
        SetForegroundColor(TermColor::Green),
        Print("? "),
        ResetColor,
        SetAttribute(Attribute::Bold),
        Print(message),
        SetAttribute(Attribute::Reset),
        Print(" "),
        SetForegroundColor(TermColor::Cyan),
        Print(answer),
        ResetColor,
        Print("\n"),
    )
}
