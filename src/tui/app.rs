//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use std::path::Path;
use std::sync::{mpsc, Arc};
use tokio::runtime::Handle;
use zeroize::Zeroizing;

use crate::auth::{build_authenticator, SessionContext};
use crate::config::{ReturnsPaths, Settings};
use crate::delivery::{build_sender, deliver_with_timeout, Delivery, DeliveryReceipt, ReportSender};
use crate::error::DeliveryError;
use crate::models::{LocationContext, Secret, ServiceType};
use crate::services::{AttendanceSheet, EntryField, ReturnField, ReturnsForm};

use super::event::{Event, SubmissionTarget};
use super::widgets::ToastQueue;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Dashboard,
    Attendance,
    Returns,
}

/// Entries of the dashboard menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Attendance,
    Returns,
    Logout,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [Self::Attendance, Self::Returns, Self::Logout];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Attendance => "Monthly Attendance Sheet",
            Self::Returns => "Returns Form",
            Self::Logout => "Logout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
    Confirm,
}

impl AuthField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Confirm => "Confirm Password",
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password | Self::Confirm)
    }
}

const LOGIN_FIELDS: &[AuthField] = &[AuthField::Email, AuthField::Password];
const SIGN_UP_FIELDS: &[AuthField] = &[
    AuthField::Name,
    AuthField::Email,
    AuthField::Password,
    AuthField::Confirm,
];

/// Login and sign-up inputs
#[derive(Default)]
pub struct AuthForm {
    pub tab: AuthTab,
    pub focus: usize,
    pub name: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub confirm: Zeroizing<String>,
    pub error: Option<String>,
}

impl AuthForm {
    pub fn fields(&self) -> &'static [AuthField] {
        match self.tab {
            AuthTab::Login => LOGIN_FIELDS,
            AuthTab::SignUp => SIGN_UP_FIELDS,
        }
    }

    pub fn focused(&self) -> AuthField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn value(&self, field: AuthField) -> &str {
        match field {
            AuthField::Name => &self.name,
            AuthField::Email => &self.email,
            AuthField::Password => self.password.as_str(),
            AuthField::Confirm => self.confirm.as_str(),
        }
    }

    fn slot(&mut self, field: AuthField) -> &mut String {
        match field {
            AuthField::Name => &mut self.name,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut *self.password,
            AuthField::Confirm => &mut *self.confirm,
        }
    }

    pub fn push(&mut self, c: char) {
        let field = self.focused();
        self.slot(field).push(c);
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        self.slot(field).pop();
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn prev_field(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn switch_tab(&mut self) {
        self.tab = match self.tab {
            AuthTab::Login => AuthTab::SignUp,
            AuthTab::SignUp => AuthTab::Login,
        };
        self.focus = 0;
        self.error = None;
    }

    /// Wipe both password fields
    pub fn clear_secrets(&mut self) {
        self.password = Zeroizing::new(String::new());
        self.confirm = Zeroizing::new(String::new());
    }
}

/// Focusable parts of the attendance screen, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFocus {
    District,
    Congregation,
    Entry(EntryField),
    ServiceType,
    Entries,
}

pub const SHEET_FOCUS_ORDER: [SheetFocus; 12] = [
    SheetFocus::District,
    SheetFocus::Congregation,
    SheetFocus::Entry(EntryField::SheetNumber),
    SheetFocus::Entry(EntryField::Month),
    SheetFocus::Entry(EntryField::Year),
    SheetFocus::Entry(EntryField::Day),
    SheetFocus::ServiceType,
    SheetFocus::Entry(EntryField::Members),
    SheetFocus::Entry(EntryField::Guests),
    SheetFocus::Entry(EntryField::Offerings),
    SheetFocus::Entry(EntryField::Notes),
    SheetFocus::Entries,
];

/// Focusable parts of the returns screen, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnsFocus {
    Field(ReturnField),
    Reason,
    Urgency,
    AttachPath,
    Attachments,
}

pub const RETURNS_FOCUS_ORDER: [ReturnsFocus; 13] = [
    ReturnsFocus::Field(ReturnField::CustomerName),
    ReturnsFocus::Field(ReturnField::CustomerEmail),
    ReturnsFocus::Field(ReturnField::CustomerPhone),
    ReturnsFocus::Field(ReturnField::OrderNumber),
    ReturnsFocus::Field(ReturnField::ReturnDate),
    ReturnsFocus::Field(ReturnField::ProductSku),
    ReturnsFocus::Field(ReturnField::ProductName),
    ReturnsFocus::Field(ReturnField::Quantity),
    ReturnsFocus::Reason,
    ReturnsFocus::Urgency,
    ReturnsFocus::Field(ReturnField::Notes),
    ReturnsFocus::AttachPath,
    ReturnsFocus::Attachments,
];

/// Destructive actions held until the user answers a yes/no prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ClearSheet,
}

impl ConfirmAction {
    pub fn message(&self) -> &'static str {
        match self {
            Self::ClearSheet => "Clear entire monthly sheet? This cannot be undone.",
        }
    }
}

fn step(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

/// Main application state
pub struct App<'a> {
    /// Application settings
    pub settings: &'a Settings,

    /// Paths configuration
    pub paths: &'a ReturnsPaths,

    runtime: Handle,

    /// Posts background results back into the event loop
    events: mpsc::Sender<Event>,

    sender: Arc<dyn ReportSender>,

    pub session: SessionContext,

    /// Name shown in the header while signed in
    pub user_name: Option<String>,

    /// Whether the app should quit
    pub should_quit: bool,

    pub screen: Screen,

    pub auth_form: AuthForm,

    pub menu_index: usize,

    pub sheet: AttendanceSheet,

    pub sheet_focus: usize,

    /// Selected row in the entries table
    pub selected_entry: usize,

    pub returns: ReturnsForm,

    pub returns_focus: usize,

    /// File path being typed for the next attachment
    pub attach_path: String,

    pub selected_attachment: usize,

    pub toasts: ToastQueue,

    /// Action waiting on the confirmation dialog
    pub pending_confirm: Option<ConfirmAction>,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(
        settings: &'a Settings,
        paths: &'a ReturnsPaths,
        runtime: Handle,
        events: mpsc::Sender<Event>,
    ) -> Self {
        let sender = build_sender(settings, paths);
        Self::with_collaborators(
            settings,
            paths,
            runtime,
            events,
            SessionContext::init(build_authenticator(settings, paths)),
            sender,
        )
    }

    /// Create an App around an existing session context and sender
    pub fn with_collaborators(
        settings: &'a Settings,
        paths: &'a ReturnsPaths,
        runtime: Handle,
        events: mpsc::Sender<Event>,
        mut session: SessionContext,
        sender: Arc<dyn ReportSender>,
    ) -> Self {
        let notify = events.clone();
        session.on_session_change(move |current| {
            let name = current.map(|s| s.display_name().to_string());
            let _ = notify.send(Event::SessionChanged(name));
        });

        Self {
            settings,
            paths,
            runtime,
            events,
            sender,
            session,
            user_name: None,
            should_quit: false,
            screen: Screen::Login,
            auth_form: AuthForm::default(),
            menu_index: 0,
            sheet: Self::fresh_sheet(settings),
            sheet_focus: 0,
            selected_entry: 0,
            returns: ReturnsForm::new(),
            returns_focus: 0,
            attach_path: String::new(),
            selected_attachment: 0,
            toasts: ToastQueue::new(),
            pending_confirm: None,
        }
    }

    fn fresh_sheet(settings: &Settings) -> AttendanceSheet {
        AttendanceSheet::new(LocationContext::new(
            settings.default_district.clone(),
            settings.default_congregation.clone(),
        ))
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn sheet_focus(&self) -> SheetFocus {
        SHEET_FOCUS_ORDER[self.sheet_focus % SHEET_FOCUS_ORDER.len()]
    }

    pub fn returns_focus(&self) -> ReturnsFocus {
        RETURNS_FOCUS_ORDER[self.returns_focus % RETURNS_FOCUS_ORDER.len()]
    }

    pub fn cycle_sheet_focus(&mut self, forward: bool) {
        self.sheet_focus = step(self.sheet_focus, SHEET_FOCUS_ORDER.len(), forward);
    }

    pub fn cycle_returns_focus(&mut self, forward: bool) {
        self.returns_focus = step(self.returns_focus, RETURNS_FOCUS_ORDER.len(), forward);
    }

    pub fn open(&mut self, screen: Screen) {
        self.screen = screen;
        match screen {
            Screen::Attendance => self.sheet_focus = 0,
            Screen::Returns => self.returns_focus = 0,
            _ => {}
        }
    }

    // Authentication

    /// Submit the login or sign-up tab
    pub fn submit_auth(&mut self) {
        let email = self.auth_form.email.trim().to_string();
        let password = Secret::new(self.auth_form.password.as_str());

        let result = match self.auth_form.tab {
            AuthTab::Login => self
                .runtime
                .block_on(self.session.sign_in(&email, &password))
                .map(|_| ()),
            AuthTab::SignUp => {
                let confirm = Secret::new(self.auth_form.confirm.as_str());
                let name = self.auth_form.name.trim().to_string();
                self.runtime
                    .block_on(self.session.sign_up(&name, &email, &password, &confirm))
                    .map(|_| ())
            }
        };

        match result {
            Ok(()) => {
                self.auth_form.clear_secrets();
                self.auth_form.error = None;
            }
            Err(e) => self.auth_form.error = Some(e.to_string()),
        }
    }

    /// Sign out and drop everything entered under the session
    pub fn logout(&mut self) {
        if self.sheet.is_submitting() || self.returns.is_submitting() {
            self.toasts.error("Wait for the submission in progress to finish");
            return;
        }
        self.runtime.block_on(self.session.sign_out());
        self.sheet = Self::fresh_sheet(self.settings);
        self.returns = ReturnsForm::new();
        self.attach_path.clear();
        self.auth_form = AuthForm::default();
    }

    /// React to the session context's change notification
    pub fn on_session_changed(&mut self, name: Option<String>) {
        match name {
            Some(name) => {
                self.toasts.success(format!("Welcome, {}", name));
                self.user_name = Some(name);
                self.menu_index = 0;
                self.screen = Screen::Dashboard;
            }
            None => {
                self.user_name = None;
                self.screen = Screen::Login;
            }
        }
    }

    // Attendance sheet

    /// Type into the focused location or entry field
    pub fn sheet_input(&mut self, c: char) {
        match self.sheet_focus() {
            SheetFocus::District | SheetFocus::Congregation => {
                let mut location = self.sheet.location().clone();
                match self.sheet_focus() {
                    SheetFocus::District => location.district.push(c),
                    _ => location.congregation.push(c),
                }
                if let Err(e) = self.sheet.set_location(location) {
                    self.toasts.error(e.to_string());
                }
            }
            SheetFocus::Entry(field) => {
                if self.sheet.is_submitting() {
                    return;
                }
                let mut value = self.sheet.draft().get(field).to_string();
                value.push(c);
                // Rejected keystrokes are simply dropped
                self.sheet.draft_mut().set_field(field, &value);
            }
            SheetFocus::ServiceType => match c {
                's' | 'S' => self.set_service_type(ServiceType::Sunday),
                'm' | 'M' => self.set_service_type(ServiceType::Midweek),
                ' ' => self.toggle_service_type(),
                _ => {}
            },
            SheetFocus::Entries => {}
        }
    }

    pub fn sheet_backspace(&mut self) {
        match self.sheet_focus() {
            SheetFocus::District | SheetFocus::Congregation => {
                let mut location = self.sheet.location().clone();
                match self.sheet_focus() {
                    SheetFocus::District => location.district.pop(),
                    _ => location.congregation.pop(),
                };
                if let Err(e) = self.sheet.set_location(location) {
                    self.toasts.error(e.to_string());
                }
            }
            SheetFocus::Entry(field) => {
                if self.sheet.is_submitting() {
                    return;
                }
                let mut value = self.sheet.draft().get(field).to_string();
                value.pop();
                self.sheet.draft_mut().set_field(field, &value);
            }
            SheetFocus::ServiceType => {
                if !self.sheet.is_submitting() {
                    self.sheet.draft_mut().set_service_type(None);
                }
            }
            SheetFocus::Entries => {}
        }
    }

    fn set_service_type(&mut self, service_type: ServiceType) {
        if !self.sheet.is_submitting() {
            self.sheet.draft_mut().set_service_type(Some(service_type));
        }
    }

    pub fn toggle_service_type(&mut self) {
        let next = self
            .sheet
            .draft()
            .service_type
            .map(|s| s.toggle())
            .unwrap_or_default();
        self.set_service_type(next);
    }

    pub fn add_entry(&mut self) {
        if self.sheet.state().is_terminal() {
            self.sheet.acknowledge();
        }
        match self.sheet.add_entry() {
            Ok(entry) => {
                self.toasts.success(format!(
                    "Entry added: sheet {}, day {}",
                    entry.sheet_number, entry.day
                ));
                self.selected_entry = self.sheet.entries().len().saturating_sub(1);
                // Back to the day field for the next service
                if let Some(pos) = SHEET_FOCUS_ORDER
                    .iter()
                    .position(|f| *f == SheetFocus::Entry(EntryField::Day))
                {
                    self.sheet_focus = pos;
                }
            }
            Err(e) => self.toasts.error(e.to_string()),
        }
    }

    pub fn remove_selected_entry(&mut self) {
        let Some(id) = self.sheet.entries().get(self.selected_entry).map(|e| e.id) else {
            return;
        };
        match self.sheet.remove_entry(id) {
            Ok(_) => {
                self.toasts.info("Entry removed");
                let len = self.sheet.entries().len();
                self.selected_entry = self.selected_entry.min(len.saturating_sub(1));
            }
            Err(e) => self.toasts.error(e.to_string()),
        }
    }

    /// Ask before wiping the whole ledger
    pub fn request_clear_entries(&mut self) {
        if self.sheet.entries().is_empty() {
            self.toasts.info("No entries to clear");
            return;
        }
        self.pending_confirm = Some(ConfirmAction::ClearSheet);
    }

    /// Run the action the dialog was opened for
    pub fn confirm_pending(&mut self) {
        if let Some(ConfirmAction::ClearSheet) = self.pending_confirm.take() {
            self.clear_entries();
        }
    }

    pub fn cancel_pending(&mut self) {
        self.pending_confirm = None;
    }

    fn clear_entries(&mut self) {
        match self.sheet.clear() {
            Ok(()) => {
                self.selected_entry = 0;
                self.toasts.info("All entries cleared");
            }
            Err(e) => self.toasts.error(e.to_string()),
        }
    }

    pub fn move_entry_selection(&mut self, down: bool) {
        let len = self.sheet.entries().len();
        if len == 0 {
            return;
        }
        self.selected_entry = if down {
            (self.selected_entry + 1).min(len - 1)
        } else {
            self.selected_entry.saturating_sub(1)
        };
    }

    /// Validate the sheet and hand it to the sender in the background
    pub fn submit_sheet(&mut self) {
        match self.sheet.begin_submission() {
            Ok(snapshot) => {
                self.toasts.info("Submitting monthly data...");
                self.spawn_delivery(SubmissionTarget::Sheet, Delivery::MonthlySheet(snapshot));
            }
            Err(e) => self.toasts.error(e.to_string()),
        }
    }

    // Returns form

    pub fn returns_input(&mut self, c: char) {
        if self.returns.is_submitting() {
            return;
        }
        // Typing into a finished form starts the next request
        if self.returns.state().is_terminal() {
            self.returns.acknowledge();
        }
        match self.returns_focus() {
            ReturnsFocus::Field(field) => {
                let mut value = self.returns.draft().get(field).to_string();
                value.push(c);
                self.returns.draft_mut().set_field(field, &value);
            }
            ReturnsFocus::Reason if c == ' ' => self.cycle_reason(),
            ReturnsFocus::Urgency if c == ' ' => self.cycle_urgency(),
            ReturnsFocus::AttachPath => self.attach_path.push(c),
            _ => {}
        }
    }

    pub fn returns_backspace(&mut self) {
        if self.returns.is_submitting() {
            return;
        }
        match self.returns_focus() {
            ReturnsFocus::Field(field) => {
                let mut value = self.returns.draft().get(field).to_string();
                value.pop();
                self.returns.draft_mut().set_field(field, &value);
            }
            ReturnsFocus::AttachPath => {
                self.attach_path.pop();
            }
            _ => {}
        }
    }

    pub fn cycle_reason(&mut self) {
        if self.returns.is_submitting() {
            return;
        }
        let draft = self.returns.draft_mut();
        draft.reason = draft.reason.next();
    }

    pub fn cycle_urgency(&mut self) {
        if self.returns.is_submitting() {
            return;
        }
        let draft = self.returns.draft_mut();
        draft.urgency = draft.urgency.next();
    }

    /// Attach the file named in the path field
    pub fn attach_file(&mut self) {
        let path = self.attach_path.trim().to_string();
        if path.is_empty() {
            self.toasts.error("Enter a file path to attach");
            return;
        }
        match self.returns.attach(Path::new(&path)) {
            Ok(file) => {
                let message = format!("Attached {} ({})", file.file_name, file.size_display());
                self.toasts.success(message);
                self.attach_path.clear();
                self.selected_attachment = self.returns.attachments().len().saturating_sub(1);
            }
            Err(e) => self.toasts.error(e.to_string()),
        }
    }

    pub fn remove_selected_attachment(&mut self) {
        match self.returns.remove_attachment(self.selected_attachment) {
            Ok(Some(file)) => {
                self.toasts.info(format!("Removed {}", file.file_name));
                let len = self.returns.attachments().len();
                self.selected_attachment = self.selected_attachment.min(len.saturating_sub(1));
            }
            Ok(None) => {}
            Err(e) => self.toasts.error(e.to_string()),
        }
    }

    pub fn move_attachment_selection(&mut self, down: bool) {
        let len = self.returns.attachments().len();
        if len == 0 {
            return;
        }
        self.selected_attachment = if down {
            (self.selected_attachment + 1).min(len - 1)
        } else {
            self.selected_attachment.saturating_sub(1)
        };
    }

    pub fn submit_returns(&mut self) {
        match self.returns.begin_submission() {
            Ok(request) => {
                self.toasts.info("Submitting return...");
                self.spawn_delivery(SubmissionTarget::Returns, Delivery::ReturnRequest(request));
            }
            Err(e) => self.toasts.error(e.to_string()),
        }
    }

    // Delivery

    fn spawn_delivery(&self, target: SubmissionTarget, delivery: Delivery) {
        let sender = Arc::clone(&self.sender);
        let events = self.events.clone();
        let timeout = self.settings.submit_timeout();
        self.runtime.spawn(async move {
            let outcome = deliver_with_timeout(sender.as_ref(), &delivery, timeout).await;
            let _ = events.send(Event::SubmissionFinished { target, outcome });
        });
    }

    /// Apply a finished background delivery to its form
    pub fn on_submission_finished(
        &mut self,
        target: SubmissionTarget,
        outcome: Result<DeliveryReceipt, DeliveryError>,
    ) {
        let (finished, message) = match target {
            SubmissionTarget::Sheet => (
                self.sheet.finish_submission(&outcome),
                self.sheet.status_message(),
            ),
            SubmissionTarget::Returns => (
                self.returns.finish_submission(&outcome),
                self.returns.status_message(),
            ),
        };

        if let Err(e) = finished {
            self.toasts.error(e.to_string());
            return;
        }
        if target == SubmissionTarget::Sheet && outcome.is_ok() {
            self.selected_entry = 0;
        }
        if let Some(message) = message {
            match outcome {
                Ok(_) => self.toasts.success(message),
                Err(_) => self.toasts.error(message),
            }
        }
    }
}
