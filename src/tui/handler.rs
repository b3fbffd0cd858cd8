//! Event handler for the TUI
//!
//! Routes keyboard events to the handler for the current screen, and applies
//! background events (session changes, finished deliveries) to the app.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, MenuItem, ReturnsFocus, Screen, SheetFocus};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.toasts.remove_expired();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
        Event::SessionChanged(name) => {
            app.on_session_changed(name);
            Ok(())
        }
        Event::SubmissionFinished { target, outcome } => {
            app.on_submission_finished(target, outcome);
            Ok(())
        }
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global keys (work everywhere)
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('l') if ctrl && app.session.is_signed_in() => {
            app.logout();
            return Ok(());
        }
        _ => {}
    }

    if app.pending_confirm.is_some() {
        handle_confirm_key(app, key);
        return Ok(());
    }

    match app.screen {
        Screen::Login => handle_login_key(app, key),
        Screen::Dashboard => handle_dashboard_key(app, key),
        Screen::Attendance => handle_attendance_key(app, key, ctrl),
        Screen::Returns => handle_returns_key(app, key, ctrl),
    }
    Ok(())
}

/// Keys while the confirmation dialog is open
fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_pending(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_pending(),
        _ => {}
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    let form = &mut app.auth_form;
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::F(2) | KeyCode::Left | KeyCode::Right => form.switch_tab(),
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Enter => {
            // Enter moves through the fields and submits from the last one
            if form.focus + 1 < form.fields().len() {
                form.next_field();
            } else {
                app.submit_auth();
            }
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => form.push(c),
        _ => {}
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    let count = MenuItem::ALL.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.menu_index = (app.menu_index + 1) % count,
        KeyCode::Char('k') | KeyCode::Up => app.menu_index = (app.menu_index + count - 1) % count,
        KeyCode::Char('1') => app.open(Screen::Attendance),
        KeyCode::Char('2') => app.open(Screen::Returns),
        KeyCode::Enter => match MenuItem::ALL[app.menu_index % count] {
            MenuItem::Attendance => app.open(Screen::Attendance),
            MenuItem::Returns => app.open(Screen::Returns),
            MenuItem::Logout => app.logout(),
        },
        _ => {}
    }
}

fn handle_attendance_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    if ctrl {
        match key.code {
            KeyCode::Char('s') => app.submit_sheet(),
            KeyCode::Char('k') => app.request_clear_entries(),
            _ => {}
        }
        return;
    }

    let focus = app.sheet_focus();
    match key.code {
        KeyCode::Esc => app.screen = Screen::Dashboard,
        KeyCode::Tab => app.cycle_sheet_focus(true),
        KeyCode::BackTab => app.cycle_sheet_focus(false),
        KeyCode::Down if focus == SheetFocus::Entries => app.move_entry_selection(true),
        KeyCode::Up if focus == SheetFocus::Entries => app.move_entry_selection(false),
        KeyCode::Down => app.cycle_sheet_focus(true),
        KeyCode::Up => app.cycle_sheet_focus(false),
        KeyCode::Left | KeyCode::Right if focus == SheetFocus::ServiceType => {
            app.toggle_service_type()
        }
        KeyCode::Delete | KeyCode::Char('d') if focus == SheetFocus::Entries => {
            app.remove_selected_entry()
        }
        KeyCode::Enter if focus != SheetFocus::Entries => app.add_entry(),
        KeyCode::Backspace => app.sheet_backspace(),
        KeyCode::Char(c) => app.sheet_input(c),
        _ => {}
    }
}

fn handle_returns_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    if ctrl {
        if key.code == KeyCode::Char('s') {
            app.submit_returns();
        }
        return;
    }

    let focus = app.returns_focus();
    match key.code {
        KeyCode::Esc => app.screen = Screen::Dashboard,
        KeyCode::Tab => app.cycle_returns_focus(true),
        KeyCode::BackTab => app.cycle_returns_focus(false),
        KeyCode::Down if focus == ReturnsFocus::Attachments => app.move_attachment_selection(true),
        KeyCode::Up if focus == ReturnsFocus::Attachments => app.move_attachment_selection(false),
        KeyCode::Down => app.cycle_returns_focus(true),
        KeyCode::Up => app.cycle_returns_focus(false),
        KeyCode::Left | KeyCode::Right if focus == ReturnsFocus::Reason => app.cycle_reason(),
        KeyCode::Left | KeyCode::Right if focus == ReturnsFocus::Urgency => app.cycle_urgency(),
        KeyCode::Delete | KeyCode::Char('d') if focus == ReturnsFocus::Attachments => {
            app.remove_selected_attachment()
        }
        KeyCode::Enter if focus == ReturnsFocus::AttachPath => app.attach_file(),
        KeyCode::Enter => app.cycle_returns_focus(true),
        KeyCode::Backspace => app.returns_backspace(),
        KeyCode::Char(c) => app.returns_input(c),
        _ => {}
    }
}
