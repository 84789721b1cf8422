//! Interactive concern form.
//!
//! Mirrors the guided-report screen: an input box, a trigger that is
//! disabled while a request is in flight, and either the rendered analysis
//! or an inline error box underneath.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use guided_report_sdk::{ConcernScreen, Phase, SubmissionState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::markdown;

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

pub struct FormApp {
    screen: ConcernScreen,
    scroll: u16,
    ticks: usize,
    should_quit: bool,
}

impl FormApp {
    pub fn new(screen: ConcernScreen) -> Self {
        Self {
            screen,
            scroll: 0,
            ticks: 0,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &ConcernScreen {
        &self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('u') if ctrl => self.screen.edit(String::new()),
            KeyCode::Enter => {
                if self.screen.can_submit() {
                    self.scroll = 0;
                    // Outcome is observed through the state channel.
                    drop(self.screen.spawn_submit());
                }
            }
            KeyCode::Backspace => {
                let mut text = self.screen.state().concern_text;
                text.pop();
                self.screen.edit(text);
            }
            KeyCode::Char(c) if !ctrl => {
                let mut text = self.screen.state().concern_text;
                text.push(c);
                self.screen.edit(text);
            }
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            _ => {}
        }
    }

    pub fn render(&self, f: &mut Frame) {
        let state = self.screen.state();
        render_state(f, f.area(), &state, self.scroll, SPINNER[self.ticks % SPINNER.len()]);
    }
}

fn render_state(f: &mut Frame, area: Rect, state: &SubmissionState, scroll: u16, spinner: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Start New Guided Report",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Share your observations & suggestions",
            Style::default().fg(Color::Gray),
        )),
    ]);
    f.render_widget(header, chunks[0]);

    let input = Paragraph::new(format!("{}▏", state.concern_text))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Describe your concern "),
        );
    f.render_widget(input, chunks[1]);

    let trigger = if state.phase.is_pending() {
        Line::from(Span::styled(
            format!("{spinner} Analyzing…"),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Analyze   "),
            Span::styled("[Ctrl+U]", Style::default().fg(Color::Gray)),
            Span::raw(" Clear   "),
            Span::styled("[Esc]", Style::default().fg(Color::Gray)),
            Span::raw(" Quit"),
        ])
    };
    f.render_widget(Paragraph::new(trigger), chunks[2]);

    let body = match &state.phase {
        Phase::Idle => Paragraph::new(Line::from(Span::styled(
            "Your business case will appear here.",
            Style::default().fg(Color::DarkGray),
        )))
        .block(Block::default().borders(Borders::ALL).title(" Analysis ")),
        Phase::Pending => Paragraph::new("Turning your concern into a business case…")
            .block(Block::default().borders(Borders::ALL).title(" Analysis ")),
        Phase::Succeeded(analysis) => Paragraph::new(markdown::to_lines(analysis))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Analysis ")
                    .title_bottom(" ↑/↓ scroll "),
            ),
        Phase::Failed(message) => Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error "),
            ),
    };
    f.render_widget(body, chunks[3]);
}
