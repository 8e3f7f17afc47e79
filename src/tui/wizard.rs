use crate::shared::{ClipboardWriter, WizardLog};
use crate::templates::{load_template_document, TemplateSource};
use crate::wizard::screens::{tail_for_display, FieldInputRow, OutputPanel};
use crate::wizard::{
    project_wizard_view_model, wizard_action_from_key, AssembledPrompt, WizardBody,
    WizardController, WizardEffect, WizardStep, WizardViewModel,
};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const FIELD_ROW_HEIGHT: u16 = 3;

/// Collaborators the wizard needs besides its own state.
pub struct WizardRunContext<'a> {
    pub source: &'a TemplateSource,
    pub log: &'a WizardLog,
    pub clipboard: &'a mut dyn ClipboardWriter,
}

pub fn run_wizard_tui(
    controller: &mut WizardController,
    context: &mut WizardRunContext<'_>,
) -> Result<(), String> {
    let mut terminal = enter_terminal()?;
    let result = run_wizard_tui_loop(controller, context, &mut terminal);
    leave_terminal(&mut terminal)?;
    result
}

/// Replaces the whole surface with the load failure and waits for a key. There
/// is nothing else to interact with once the document failed to load.
pub fn show_load_error_tui(message: &str) -> Result<(), String> {
    let mut terminal = enter_terminal()?;
    let result = wait_on_load_error(&mut terminal, message);
    leave_terminal(&mut terminal)?;
    result
}

/// Drives the same transitions as the interactive loop from a fixed key list and
/// returns the plain-text output of the last result screen reached.
pub fn run_wizard_scripted(
    controller: &mut WizardController,
    context: &mut WizardRunContext<'_>,
    scripted_keys: Vec<KeyEvent>,
) -> Result<String, String> {
    let mut status_text = String::new();
    let mut last_output = None;
    for key in scripted_keys {
        let now = Instant::now();
        controller.expire_copy_feedback(now);
        let quit = handle_key(controller, context, key, &mut status_text, now);
        remember_output(controller, &mut last_output);
        if quit {
            break;
        }
    }
    match last_output {
        Some(prompt) => Ok(prompt.render_plain()),
        None => Err(format!(
            "scripted wizard never reached the output step (stopped at {})",
            controller.step().as_str()
        )),
    }
}

fn remember_output(controller: &WizardController, last_output: &mut Option<AssembledPrompt>) {
    if controller.step() == WizardStep::ShowOutput {
        *last_output = controller.assembled();
    }
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, String> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter wizard screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| format!("failed to create wizard terminal: {e}"))
}

fn leave_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), String> {
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave wizard screen: {e}"))
}

fn run_wizard_tui_loop(
    controller: &mut WizardController,
    context: &mut WizardRunContext<'_>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), String> {
    let mut status_text = String::new();
    loop {
        let now = Instant::now();
        controller.expire_copy_feedback(now);
        let view_model = project_wizard_view_model(controller, now);
        terminal
            .draw(|frame| draw_wizard_ui(frame, &view_model, &status_text))
            .map_err(|e| format!("failed to render wizard ui: {e}"))?;
        if !event::poll(POLL_INTERVAL).map_err(|e| format!("failed to poll wizard input: {e}"))? {
            continue;
        }
        let ev = event::read().map_err(|e| format!("failed to read wizard input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        if handle_key(controller, context, key, &mut status_text, Instant::now()) {
            return Ok(());
        }
    }
}

/// Returns true once the user asked to leave the wizard.
fn handle_key(
    controller: &mut WizardController,
    context: &mut WizardRunContext<'_>,
    key: KeyEvent,
    status_text: &mut String,
    now: Instant,
) -> bool {
    let step_before = controller.step();
    let Some(action) = wizard_action_from_key(controller.step(), key) else {
        return false;
    };
    let effect = match controller.apply_action(action) {
        Ok(effect) => effect,
        Err(err) => {
            context.log.debug(
                "wizard.transition_rejected",
                &format!("action={} {err}", action.as_str()),
            );
            return false;
        }
    };
    if controller.step() != step_before {
        status_text.clear();
    }
    apply_wizard_effect(controller, context, effect, status_text, now)
}

fn apply_wizard_effect(
    controller: &mut WizardController,
    context: &mut WizardRunContext<'_>,
    effect: WizardEffect,
    status_text: &mut String,
    now: Instant,
) -> bool {
    match effect {
        WizardEffect::None => false,
        WizardEffect::Quit => true,
        WizardEffect::CopySelected => {
            match controller.copy_selected(context.clipboard, now) {
                Ok(Some(label)) => {
                    context.log.info("clipboard.copied", &label);
                    *status_text = format!("{label} copied to clipboard");
                }
                Ok(None) => {}
                Err(err) => context.log.warn("clipboard.write_failed", &err.to_string()),
            }
            false
        }
        WizardEffect::Reload => {
            match load_template_document(context.source) {
                Ok(document) => {
                    let count = document.len();
                    controller.replace_document(document);
                    context.log.info(
                        "templates.reloaded",
                        &format!("source={} models={count}", context.source),
                    );
                    *status_text = format!("reloaded {count} models from {}", context.source);
                }
                Err(err) => {
                    context.log.error("templates.load_failed", &err.to_string());
                    *status_text = format!("reload failed: {err}");
                }
            }
            false
        }
    }
}

fn wait_on_load_error(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    message: &str,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|frame| draw_load_error(frame, message))
            .map_err(|e| format!("failed to render load error: {e}"))?;
        let ev = event::read().map_err(|e| format!("failed to read input: {e}"))?;
        if let Event::Key(key) = ev {
            if key.kind != KeyEventKind::Release {
                return Ok(());
            }
        }
    }
}

fn highlight() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn main_panel_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(1, 1, 0, 0))
}

pub(crate) fn draw_wizard_ui(frame: &mut Frame<'_>, view_model: &WizardViewModel, status: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let mut header_lines = vec![Line::from(Span::styled(
        view_model.title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];
    header_lines.push(Line::from(view_model.subtitle.unwrap_or_default()));
    header_lines.push(Line::from(if view_model.back_visible {
        format!("{}    [Esc] Back  [Home] Start over", view_model.step_line)
    } else {
        view_model.step_line.clone()
    }));
    let header = Paragraph::new(header_lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    match &view_model.body {
        WizardBody::Choices {
            items,
            description,
            selected,
        } => draw_choices(frame, chunks[1], items, *description, *selected),
        WizardBody::Fields {
            rows,
            focused,
            submit_label,
        } => draw_fields(frame, chunks[1], rows, *focused, submit_label),
        WizardBody::Output {
            panels,
            merged,
            selected,
            scroll,
        } => draw_output(frame, chunks[1], panels, *merged, *selected, *scroll),
    }

    let footer = Paragraph::new(vec![
        Line::from(view_model.hint_text),
        Line::from(format!("Status: {status}")),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);
}

fn draw_choices(
    frame: &mut Frame<'_>,
    area: Rect,
    items: &[String],
    description: Option<&str>,
    selected: usize,
) {
    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing to choose from.").block(main_panel_block()),
            area,
        );
        return;
    }
    let list_items = items.iter().map(|label| {
        let mut lines = vec![Line::from(Span::raw(label.clone()))];
        if let Some(description) = description {
            lines.push(Line::from(Span::styled(
                description.to_string(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        ListItem::new(Text::from(lines))
    });
    let list = List::new(list_items.collect::<Vec<_>>())
        .block(main_panel_block())
        .highlight_style(highlight());
    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// First field row to draw so that `focused` sits inside a window of
/// `visible` rows.
fn field_window_start(focused: usize, visible: usize, len: usize) -> usize {
    if len <= visible || focused < visible {
        return 0;
    }
    (focused + 1 - visible).min(len - visible)
}

fn draw_fields(
    frame: &mut Frame<'_>,
    area: Rect,
    rows: &[FieldInputRow],
    focused: usize,
    submit_label: &str,
) {
    let block = main_panel_block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = usize::from((inner.height.saturating_sub(1) / FIELD_ROW_HEIGHT).max(1));
    let first = field_window_start(focused, visible, rows.len());
    let shown = &rows[first..rows.len().min(first + visible)];

    let mut constraints: Vec<Constraint> = shown
        .iter()
        .map(|_| Constraint::Length(FIELD_ROW_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (offset, row) in shown.iter().enumerate() {
        let slot = slots[offset];
        let is_focused = first + offset == focused;
        let max_input_width = slot.width.saturating_sub(4) as usize;
        let display_value = tail_for_display(&row.value, max_input_width);
        let input_line = if row.value.is_empty() {
            Line::from(Span::styled(
                format!("> {}", row.placeholder),
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(format!("> {display_value}"))
        };
        let label_style = if is_focused {
            highlight()
        } else {
            Style::default().fg(Color::Cyan)
        };
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(row.label.clone(), label_style)),
                input_line,
            ]),
            slot,
        );
        if is_focused {
            frame.set_cursor_position((
                slot.x + 2 + display_value.chars().count() as u16,
                slot.y + 1,
            ));
        }
    }

    let mut submit_line = vec![Span::styled(
        format!("[ {submit_label} ]  (Enter)"),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )];
    if shown.len() < rows.len() {
        submit_line.push(Span::styled(
            format!(
                "  fields {}-{} of {}",
                first + 1,
                first + shown.len(),
                rows.len()
            ),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(submit_line)), slots[shown.len()]);
}

fn draw_output(
    frame: &mut Frame<'_>,
    area: Rect,
    panels: &[OutputPanel],
    merged: bool,
    selected: usize,
    scroll: usize,
) {
    if panels.is_empty() {
        return;
    }
    let direction = if merged {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let constraints: Vec<Constraint> = panels
        .iter()
        .map(|_| Constraint::Ratio(1, panels.len() as u32))
        .collect();
    let slots = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);

    for (idx, panel) in panels.iter().enumerate() {
        let border_style = if idx == selected {
            highlight()
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Line::from(format!(" {} ", panel.label)))
            .title(Line::from(format!(" [{}] ", panel.copy_label)).right_aligned())
            .padding(Padding::new(1, 1, 0, 0));
        let offset = if idx == selected {
            u16::try_from(scroll).unwrap_or(u16::MAX)
        } else {
            0
        };
        let text = Paragraph::new(panel.text.as_str())
            .wrap(Wrap { trim: false })
            .scroll((offset, 0))
            .block(block);
        frame.render_widget(text, slots[idx]);
    }
}

fn draw_load_error(frame: &mut Frame<'_>, message: &str) {
    let area = centered_rect(70, 30, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .padding(Padding::new(2, 2, 1, 1));
    let body = Paragraph::new(vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press any key to exit."),
    ])
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(body, area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
