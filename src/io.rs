use std::io;
use std::io::Write;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::debug;
use tracing::info;

use crate::driver::EventSource;
use crate::driver::StopToken;
use crate::events::AppEvent;
use crate::events::EngineEvent;
use crate::events::Event;

/// Converts a crossterm event into a toruslife event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => {
            debug!(?key_event, "key");

            if key_event.kind == KeyEventKind::Release {
                return None;
            }

            match key_event {
                KeyEvent {
                    code: KeyCode::Char('q') | KeyCode::Esc,
                    ..
                }
                | KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => Some(Event::AppEvent(AppEvent::Exit)),

                KeyEvent {
                    code: KeyCode::Char('p' | ' '),
                    ..
                } => Some(Event::AppEvent(AppEvent::TogglePause)),

                KeyEvent {
                    code: KeyCode::Char('r'),
                    ..
                } => Some(Event::EngineEvent(EngineEvent::Reseed)),

                _ => None,
            }
        }
        CrossTermEvent::Resize(cols, rows) => Some(Event::AppEvent(AppEvent::Resize { cols, rows })),
        _ => None,
    }
}

/// Events read from the terminal the process is attached to
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self, timeout: Duration) -> anyhow::Result<Option<Event>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(convert_event(event::read()?))
    }
}

/// Trip `stop` when the process is sent SIGINT or SIGTERM.
///
/// Can only be installed once per process.
pub fn stop_on_signal(stop: &StopToken) -> Result<(), ctrlc::Error> {
    let stop = stop.clone();

    ctrlc::set_handler(move || {
        info!("interrupt received");
        stop.stop();
    })
}

/// Puts the terminal in raw mode on an alternate screen for as long as it's alive.
///
/// Raw mode is what turns Ctrl-C into a key event instead of a signal. Signals sent from
/// elsewhere still arrive, see [`stop_on_signal`].
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }

        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();

        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Clear the screen and draw a rendered frame followed by a status line.
///
/// Lines are placed with cursor movements rather than `\n`, since raw mode doesn't return the
/// carriage on a line feed.
pub fn draw_frame<W: Write>(out: &mut W, frame: &str, status: &str) -> io::Result<()> {
    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    for line in frame.lines() {
        queue!(out, style::Print(line), cursor::MoveToNextLine(1))?;
    }

    queue!(out, style::Print(status), cursor::MoveToNextLine(1))?;

    out.flush()
}

#[cfg(test)]
mod test {
    use crossterm::event::Event as CrossTermEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyEventKind;
    use crossterm::event::KeyEventState;
    use crossterm::event::KeyModifiers;

    use super::convert_event;
    use super::draw_frame;
    use crate::events::AppEvent;
    use crate::events::EngineEvent;
    use crate::events::Event;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrossTermEvent {
        CrossTermEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn exit_keys() {
        let exit = Some(Event::AppEvent(AppEvent::Exit));

        assert_eq!(convert_event(key(KeyCode::Char('q'), KeyModifiers::NONE)), exit);
        assert_eq!(convert_event(key(KeyCode::Esc, KeyModifiers::NONE)), exit);
        assert_eq!(convert_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), exit);

        // a plain 'c' is not an interrupt
        assert_eq!(convert_event(key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn control_keys() {
        assert_eq!(
            convert_event(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Event::AppEvent(AppEvent::TogglePause))
        );
        assert_eq!(
            convert_event(key(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Event::EngineEvent(EngineEvent::Reseed))
        );
        assert_eq!(
            convert_event(CrossTermEvent::Resize(120, 40)),
            Some(Event::AppEvent(AppEvent::Resize {
                cols: 120,
                rows: 40
            }))
        );
    }

    #[test]
    fn key_releases_are_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );

        assert_eq!(convert_event(CrossTermEvent::Key(release)), None);
    }

    #[test]
    fn frame_contains_every_line() -> anyhow::Result<()> {
        let mut out = Vec::new();
        draw_frame(&mut out, "#.\n.#\n", "generation 0")?;

        let out = String::from_utf8(out)?;

        // clear screen, then home the cursor
        assert!(out.starts_with("\u{1b}[2J\u{1b}[1;1H"), "{out:?}");
        assert!(out.contains("#."));
        assert!(out.contains(".#"));
        assert!(out.contains("generation 0"));
        assert!(!out.contains('\n'));

        Ok(())
    }
}
