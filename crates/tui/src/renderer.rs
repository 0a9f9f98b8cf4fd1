use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use section_pager_core::SectionPager;
use section_pager_protocol::{NavKey, ViewCommand};

use crate::content::Section;

/// Longest wait between polls when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(100);
/// How long the border flashes after a haptic pulse.
const PULSE: Duration = Duration::from_millis(120);

/// Terminal-side projection of the pager's view commands.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub active: Vec<bool>,
    pub indicators: Vec<bool>,
    pub revealed: Vec<Vec<bool>>,
    pub pulses: usize,
}

impl ViewState {
    pub fn new(reveal_counts: &[usize]) -> Self {
        Self {
            active: vec![false; reveal_counts.len()],
            indicators: vec![false; reveal_counts.len()],
            revealed: reveal_counts.iter().map(|&n| vec![false; n]).collect(),
            pulses: 0,
        }
    }

    pub fn apply(&mut self, commands: &[ViewCommand]) {
        for command in commands {
            match *command {
                ViewCommand::ActivateSection { index } => set(&mut self.active, index, true),
                ViewCommand::DeactivateSection { index } => set(&mut self.active, index, false),
                ViewCommand::SetIndicator { index, active } => {
                    set(&mut self.indicators, index, active);
                }
                ViewCommand::RevealChild { section, child } => {
                    if let Some(children) = self.revealed.get_mut(section) {
                        set(children, child, true);
                    }
                }
                ViewCommand::ResetReveals { section } => {
                    if let Some(children) = self.revealed.get_mut(section) {
                        children.fill(false);
                    }
                }
                ViewCommand::Vibrate { .. } => self.pulses += 1,
            }
        }
    }

    /// The section currently shown, if exactly one is active.
    pub fn visible(&self) -> Option<usize> {
        let mut active = self.active.iter().enumerate().filter(|(_, on)| **on);
        match (active.next(), active.next()) {
            (Some((index, _)), None) => Some(index),
            _ => None,
        }
    }
}

fn set(flags: &mut [bool], index: usize, value: bool) {
    if let Some(flag) = flags.get_mut(index) {
        *flag = value;
    }
}

/// Map a key press to a pager input. Digits jump to a section (1-based).
pub fn key_input(code: KeyCode) -> Option<KeyInput> {
    match code {
        KeyCode::Down => Some(KeyInput::Nav(NavKey::ArrowDown)),
        KeyCode::Up => Some(KeyInput::Nav(NavKey::ArrowUp)),
        KeyCode::PageDown => Some(KeyInput::Nav(NavKey::PageDown)),
        KeyCode::PageUp => Some(KeyInput::Nav(NavKey::PageUp)),
        KeyCode::Home => Some(KeyInput::Nav(NavKey::Home)),
        KeyCode::End => Some(KeyInput::Nav(NavKey::End)),
        KeyCode::Char(' ') => Some(KeyInput::Nav(NavKey::Space)),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|d| KeyInput::Jump(i64::from(d) - 1)),
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyInput::Quit),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Nav(NavKey),
    Jump(i64),
    Quit,
}

pub fn run_tui(
    mut pager: SectionPager,
    sections: &[&'static Section],
    wheel_delta: f64,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_secs_f64() * 1_000.0;

    let mut view = ViewState::new(&pager.layout().reveal_counts);
    view.apply(&pager.mount(now_ms()));
    let mut pulse_until: Option<Instant> = None;

    loop {
        let pulses_before = view.pulses;
        let locked = pager.is_transitioning();
        let flashing = pulse_until.is_some_and(|until| Instant::now() < until);
        terminal.draw(|frame| draw(frame, &view, sections, locked, flashing))?;

        let wait = pager
            .next_deadline()
            .map_or(IDLE_POLL, |deadline| {
                Duration::from_secs_f64(((deadline - now_ms()) / 1_000.0).max(0.0))
            })
            .min(IDLE_POLL);

        let commands = if event::poll(wait)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key_input(key.code) {
                    Some(KeyInput::Quit) => break,
                    Some(KeyInput::Nav(nav)) => pager.key(nav, now_ms()),
                    Some(KeyInput::Jump(index)) => pager.go_to_section(index, now_ms()),
                    None => Vec::new(),
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => pager.wheel(wheel_delta, now_ms()),
                    MouseEventKind::ScrollUp => pager.wheel(-wheel_delta, now_ms()),
                    _ => Vec::new(),
                },
                _ => Vec::new(),
            }
        } else {
            pager.poll(now_ms())
        };
        view.apply(&commands);
        if view.pulses != pulses_before {
            pulse_until = Some(Instant::now() + PULSE);
        }
    }

    pager.unmount();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn draw(
    frame: &mut Frame,
    view: &ViewState,
    sections: &[&'static Section],
    locked: bool,
    flashing: bool,
) {
    let area = frame.area();
    let [header_area, body_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);
    let [page_area, dots_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(4)]).areas(body_area);

    let status = if locked { "settling" } else { "ready" };
    let header = Block::default()
        .title(format!(
            " section pager | wheel/↑↓/PgUp/PgDn/Home/End | 1-9 jump | q quit | {status} "
        ))
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_widget(header, header_area);

    render_page(frame, page_area, view, sections, flashing);
    render_dots(frame, dots_area, view);
}

fn render_page(
    frame: &mut Frame,
    area: Rect,
    view: &ViewState,
    sections: &[&'static Section],
    flashing: bool,
) {
    let border = if flashing { Color::Red } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let Some(index) = view.visible() else {
        frame.render_widget(block, area);
        return;
    };
    let Some(section) = sections.get(index) else {
        frame.render_widget(block, area);
        return;
    };

    let revealed = view.revealed.get(index);
    let mut lines = vec![
        Line::styled(
            section.title,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::default(),
    ];
    for (child, text) in section.lines.iter().enumerate() {
        let shown = revealed.is_some_and(|r| r.get(child).copied().unwrap_or(false));
        lines.push(if shown {
            Line::styled(*text, Style::default().fg(Color::White))
        } else {
            Line::default()
        });
    }

    let top_padding = area
        .height
        .saturating_sub(lines.len() as u16 + 2)
        / 2;
    let mut padded = vec![Line::default(); top_padding as usize];
    padded.extend(lines);

    let paragraph = Paragraph::new(padded)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_dots(frame: &mut Frame, area: Rect, view: &ViewState) {
    let top = dots_top_padding(area.height, view.indicators.len());
    let mut lines = vec![Line::default(); top as usize];
    for &active in &view.indicators {
        lines.push(if active {
            Line::styled("●", Style::default().fg(Color::Red))
        } else {
            Line::styled("○", Style::default().fg(Color::Gray))
        });
        lines.push(Line::default());
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Blank rows above the dot column so it sits vertically centered. Each dot
/// takes two rows.
fn dots_top_padding(height: u16, dots: usize) -> u16 {
    let rows = u16::try_from(dots).unwrap_or(u16::MAX).saturating_mul(2);
    height.saturating_sub(rows) / 2
}
