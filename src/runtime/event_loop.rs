use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode};
use crate::config;
use crate::playlist::collect_uploads;
use crate::session::{PlayerError, SessionController};
use crate::sink::MediaSink;
use crate::ui;

/// Main terminal event loop: pumps sink events, redraws from the latest
/// snapshot and dispatches keys. Returns `Ok(())` when the user quits.
pub fn run<S: MediaSink>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &mut SessionController<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let updates = session.watch();
    let mut snapshot = session.snapshot();

    loop {
        if let Err(e) = session.pump_events() {
            warn!("playback error: {e}");
            app.report(&e);
        }

        // Only the newest snapshot matters for drawing.
        if let Some(latest) = updates.try_iter().last() {
            snapshot = latest;
        }
        app.clamp_selection(snapshot.playlist.len());

        terminal.draw(|f| ui::draw(f, app, &snapshot, &settings.ui, &settings.playback))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, session) {
                    fade_out(session, settings.audio.quit_fade_out_ms);
                    break;
                }
            }
        }
    }

    Ok(())
}

const FADE_STEPS: u32 = 20;

/// Gain for each step of a quit fade, ending at silence.
fn fade_gains(steps: u32) -> impl Iterator<Item = f32> {
    (1..=steps).map(move |step| 1.0 - step as f32 / steps as f32)
}

/// Ramp the output down to silence before quitting.
fn fade_out<S: MediaSink>(session: &mut SessionController<S>, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        session.set_output_gain(0.0);
        return;
    }
    let step_ms = (fade_out_ms / u64::from(FADE_STEPS)).max(1);
    for gain in fade_gains(FADE_STEPS) {
        session.set_output_gain(gain);
        thread::sleep(Duration::from_millis(step_ms));
    }
    session.set_output_gain(0.0);
}

/// Surface a command failure on the status line.
fn report<T>(app: &mut App, result: Result<T, PlayerError>) {
    match result {
        Ok(_) => app.clear_hint(),
        Err(e) => {
            if !matches!(e, PlayerError::NoResourceSelected) {
                warn!("command failed: {e}");
            }
            app.report(&e);
        }
    }
}

/// Returns true when the user asked to quit.
fn handle_key_event<S: MediaSink>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    session: &mut SessionController<S>,
) -> bool {
    if app.mode == InputMode::Upload {
        match key.code {
            KeyCode::Esc => app.cancel_upload(),
            KeyCode::Backspace => app.pop_upload_char(),
            KeyCode::Enter => {
                if let Some(path) = app.take_upload_path() {
                    let uploads = collect_uploads(&[path.clone()], &settings.library);
                    if uploads.is_empty() {
                        app.set_hint(format!("Nothing to upload at {}", path.display()));
                    } else {
                        let mut last = 0;
                        for upload in uploads {
                            last = session.stage_upload(upload);
                        }
                        app.selected = last;
                        app.clear_hint();
                    }
                }
            }
            KeyCode::Char(c) if !c.is_control() => app.push_upload_char(c),
            _ => {}
        }
        return false;
    }

    let len = session.playlist().len();
    let seek_step = settings.playback.seek_step_seconds as f64;
    let volume_step = i64::from(settings.playback.volume_step);

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('u') => {
            app.clear_hint();
            app.enter_upload_mode();
        }
        KeyCode::Char('j') | KeyCode::Down => app.next(len),
        KeyCode::Char('k') | KeyCode::Up => app.prev(len),
        KeyCode::Enter => {
            if session.playlist().is_empty() {
                report(app, Err::<(), _>(PlayerError::NoResourceSelected));
            } else {
                let result = session.load_and_play(app.selected);
                report(app, result);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let result = session.toggle_play_pause();
            report(app, result);
        }
        KeyCode::Char('l') => {
            let result = session.skip_next();
            report(app, result);
        }
        KeyCode::Char('h') => {
            let result = session.skip_previous();
            report(app, result);
        }
        KeyCode::Char('L') | KeyCode::Right => {
            let result = session.seek_by(seek_step);
            report(app, result);
        }
        KeyCode::Char('H') | KeyCode::Left => {
            let result = session.seek_by(-seek_step);
            report(app, result);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            session.adjust_volume(volume_step);
        }
        KeyCode::Char('-') => {
            session.adjust_volume(-volume_step);
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if !session.playlist().is_empty() {
                let result = session.remove_track(app.selected);
                report(app, result);
                app.clamp_selection(session.playlist().len());
            }
        }
        KeyCode::Esc => app.clear_hint(),
        _ => {}
    }

    false
}
