//! UI rendering helpers for the terminal user interface.
//!
//! The widget is drawn top to bottom: header, now playing, seek bar,
//! transport + volume, playlist, footer. Everything comes from the
//! `SessionSnapshot`; nothing here touches the session.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::config::{PlaybackSettings, UiSettings};
use crate::session::{SessionSnapshot, Transport, format_duration, format_remaining};

const CONTROLS: [(&str, &str); 9] = [
    ("space/p", "play/pause"),
    ("enter", "play selected"),
    ("h/l", "prev/next"),
    ("H/L", "seek"),
    ("-/+", "volume"),
    ("j/k", "up/down"),
    ("u", "upload"),
    ("d", "remove"),
    ("q", "quit"),
];

/// Render the controls help text.
fn controls_text(playback: &PlaybackSettings) -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| match *k {
            "H/L" => format!("[{k}] {v} -/+{}s", playback.seek_step_seconds),
            "-/+" => format!("[{k}] {v} -/+{}%", playback.volume_step),
            _ => format!("[{k}] {v}"),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

fn seek_ratio(position: f64, duration: f64) -> f64 {
    if duration > 0.0 && position.is_finite() {
        (position / duration).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn transport_label(transport: Transport) -> &'static str {
    match transport {
        Transport::Empty => "■ stopped",
        Transport::Paused => "❚❚ paused",
        Transport::Playing => "▶ playing",
    }
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the whole widget into `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    snapshot: &SessionSnapshot,
    ui_settings: &UiSettings,
    playback_settings: &PlaybackSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(frame.area());
    let state = &snapshot.state;

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cadenza ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let now_playing = match snapshot.now_playing() {
        Some(entry) => format!("{}\n{}", entry.name, entry.artist),
        None => "Nothing loaded".to_string(),
    };
    let now_playing = Paragraph::new(now_playing)
        .block(padded(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[1]);

    // Seek bar
    let seek = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(seek_ratio(state.position, state.duration))
        .label(format!(
            "{}  {}",
            format_duration(state.position),
            format_remaining(state.position, state.duration)
        ));
    frame.render_widget(seek, chunks[2]);

    // Transport + volume
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);
    let transport = Paragraph::new(transport_label(state.transport()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(transport, row[0]);
    let volume = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" volume "))
        .percent(u16::from(state.volume.min(100)))
        .label(format!("{}%", state.volume));
    frame.render_widget(volume, row[1]);

    // Playlist
    let items: Vec<ListItem> = snapshot
        .playlist
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let marker = if state.current_index == Some(i) { "♪ " } else { "  " };
            ListItem::new(format!(
                "{marker}{}  ({} · {})",
                entry.name, entry.artist, entry.duration_label
            ))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" playlist "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if !snapshot.playlist.is_empty() {
        list_state.select(Some(app.selected.min(snapshot.playlist.len() - 1)));
    }
    frame.render_stateful_widget(list, chunks[4], &mut list_state);

    // Footer: upload prompt, hint, or the controls
    let (title, text) = match app.mode {
        InputMode::Upload => (
            " upload (enter stages, esc cancels) ",
            format!("path: {}_", app.upload_input),
        ),
        InputMode::Normal => match &app.hint {
            Some(hint) => (" ! ", hint.clone()),
            None => (" controls ", controls_text(playback_settings)),
        },
    };
    let footer = Paragraph::new(text)
        .block(padded(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_ratio_stays_in_unit_range() {
        assert_eq!(seek_ratio(0.0, 0.0), 0.0);
        assert_eq!(seek_ratio(50.0, 200.0), 0.25);
        assert_eq!(seek_ratio(300.0, 200.0), 1.0);
        assert_eq!(seek_ratio(f64::NAN, 200.0), 0.0);
    }

    #[test]
    fn controls_text_includes_configured_steps() {
        let playback = PlaybackSettings {
            seek_step_seconds: 7,
            volume_step: 3,
            ..PlaybackSettings::default()
        };
        let text = controls_text(&playback);
        assert!(text.contains("[H/L] seek -/+7s"));
        assert!(text.contains("[-/+] volume -/+3%"));
        assert!(text.starts_with("[space/p] play/pause"));
    }
}
