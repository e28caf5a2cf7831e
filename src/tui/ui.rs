//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::session::{all_techniques, VisualTarget};
use crate::tui::app::App;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    if app.engine.view().is_running {
        render_session(frame, app, chunks[1]);
    } else {
        render_config(frame, app, chunks[1]);
    }
    render_status_bar(frame, app, chunks[2]);
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let technique = app.engine.technique().technique();
    let sound = if app.engine.sound_enabled() {
        "sound on"
    } else {
        "sound off"
    };
    let title = format!(
        " respira | {} | {} | {} ",
        technique.name,
        app.engine.duration(),
        sound
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render the configuration view shown while idle.
fn render_config(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let techniques = all_techniques();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(techniques.len() as u16 + 2), // Technique list
            Constraint::Length(3),                           // Settings
            Constraint::Min(0),                              // Hint
        ])
        .split(area);

    let items: Vec<ListItem<'_>> = techniques
        .iter()
        .map(|technique| {
            let selected = technique.id == app.engine.technique();
            let marker = if selected { "●" } else { "○" };
            let spans = vec![
                Span::styled(
                    format!("{marker} {}", technique.name),
                    Style::default().add_modifier(if selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
                Span::styled(
                    format!("  {}", technique.description),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Technique (h/l) "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let selected = techniques
        .iter()
        .position(|t| t.id == app.engine.technique());
    let mut state = ListState::default();
    state.select(selected);
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let sound = if app.engine.sound_enabled() {
        Span::styled("on", Style::default().fg(Color::Cyan))
    } else {
        Span::styled("off", Style::default().fg(Color::DarkGray))
    };
    let settings = Paragraph::new(Line::from(vec![
        Span::raw(format!("Duration (d): {}    Sound (s): ", app.engine.duration())),
        sound,
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Settings "));
    frame.render_widget(settings, chunks[1]);

    let hint = Paragraph::new("Press Space to begin")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, chunks[2]);
}

/// Render the active-session view: breathing circle, instruction, progress.
fn render_session(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let view = app.engine.view();
    let has_progress = view.progress.is_some();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Circle
            Constraint::Length(2), // Instruction
            Constraint::Length(if has_progress { 3 } else { 0 }),
        ])
        .split(area);

    render_circle(frame, &view.visual, chunks[0]);

    let instruction = Paragraph::new(view.instruction.clone())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(instruction, chunks[1]);

    if let Some(progress) = view.progress {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (progress * 100.0).round() as u16;
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(progress.clamp(0.0, 1.0))
            .label(format!("{percent}%"));
        frame.render_widget(gauge, chunks[2]);
    }
}

/// Draw the breathing circle as a centered disc scaled by the visual target.
fn render_circle(frame: &mut Frame<'_>, visual: &VisualTarget, area: Rect) {
    // Terminal cells are roughly twice as tall as wide, so the disc is
    // stretched horizontally to look round.
    let max_radius = usize::from(area.height.saturating_sub(1) / 2)
        .min(usize::from(area.width / 4))
        .max(1);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let radius = ((max_radius as f64) * visual.scale).round().max(1.0) as usize;

    let color = if visual.opacity >= 0.5 {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let mut lines = Vec::new();
    let r = radius as f64;
    for y in -(radius as i64)..=(radius as i64) {
        #[allow(clippy::cast_precision_loss)]
        let half = (r * r - (y as f64) * (y as f64)).max(0.0).sqrt() * 2.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let width = half.round() as usize;
        lines.push(Line::from(Span::styled(
            "█".repeat(width.max(1)),
            Style::default().fg(color),
        )));
    }

    // Vertically center within the area
    let height = lines.len() as u16;
    let pad = area.height.saturating_sub(height) / 2;
    let centered = Rect {
        x: area.x,
        y: area.y + pad,
        width: area.width,
        height: height.min(area.height),
    };

    let circle = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(circle, centered);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("h/l:technique | d:duration | s:sound | Space:start/stop | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
