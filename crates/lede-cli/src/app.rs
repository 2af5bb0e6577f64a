//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lede_core::{
  envelope::Pagination,
  lead::{Lead, LeadSource, LeadStatus},
  validate::{FieldError, LeadDraft},
};

use crate::client::ApiClient;

/// Page size used by the list view; matches the server default.
pub const PAGE_SIZE: u32 = 10;

// ─── Screen ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// The submission form.
  Form,
  /// The filtered, paginated list.
  List,
}

// ─── Form state ──────────────────────────────────────────────────────────────

/// The form's fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
  Name,
  Email,
  Phone,
  Company,
  Message,
  Source,
}

impl FormField {
  pub const ALL: [FormField; 6] = [
    FormField::Name,
    FormField::Email,
    FormField::Phone,
    FormField::Company,
    FormField::Message,
    FormField::Source,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      Self::Name => "Name *",
      Self::Email => "Email *",
      Self::Phone => "Phone *",
      Self::Company => "Company",
      Self::Message => "Message",
      Self::Source => "Source",
    }
  }

  /// The `field` key used in [`FieldError`] entries.
  pub fn key(&self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Email => "email",
      Self::Phone => "phone",
      Self::Company => "company",
      Self::Message => "message",
      Self::Source => "source",
    }
  }

  fn index(&self) -> usize {
    Self::ALL.iter().position(|f| f == self).unwrap_or(0)
  }

  pub fn next(&self) -> FormField {
    Self::ALL[(self.index() + 1) % Self::ALL.len()]
  }

  pub fn prev(&self) -> FormField {
    Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
  }
}

/// Draft field values and per-field error state for the form screen.
pub struct FormState {
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  pub company:    String,
  pub message:    String,
  /// Index into [`LeadSource::ALL`], cycled with ←/→.
  pub source_idx: usize,
  pub focus:      FormField,
  pub errors:     Vec<FieldError>,
}

impl Default for FormState {
  fn default() -> Self {
    Self {
      name:       String::new(),
      email:      String::new(),
      phone:      String::new(),
      company:    String::new(),
      message:    String::new(),
      source_idx: 0,
      focus:      FormField::Name,
      errors:     Vec::new(),
    }
  }
}

impl FormState {
  /// The draft as it would be submitted.
  pub fn draft(&self) -> LeadDraft {
    LeadDraft {
      name:    self.name.clone(),
      email:   self.email.clone(),
      phone:   self.phone.clone(),
      company: (!self.company.trim().is_empty())
        .then(|| self.company.clone()),
      message: (!self.message.trim().is_empty())
        .then(|| self.message.clone()),
      source:  Some(self.source().as_str().to_owned()),
    }
  }

  pub fn source(&self) -> LeadSource {
    LeadSource::ALL[self.source_idx % LeadSource::ALL.len()]
  }

  /// The error message for a form field, if its last check failed.
  pub fn error_for(&self, field: FormField) -> Option<&str> {
    self
      .errors
      .iter()
      .find(|e| e.field == field.key())
      .map(|e| e.message.as_str())
  }

  fn focused_text(&mut self) -> Option<&mut String> {
    match self.focus {
      FormField::Name => Some(&mut self.name),
      FormField::Email => Some(&mut self.email),
      FormField::Phone => Some(&mut self.phone),
      FormField::Company => Some(&mut self.company),
      FormField::Message => Some(&mut self.message),
      FormField::Source => None,
    }
  }
}

// ─── Stats ───────────────────────────────────────────────────────────────────

/// Counts for the stats strip above the list, computed client-side from a
/// large-limit fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
  pub total:     u64,
  pub new:       usize,
  pub qualified: usize,
  pub converted: usize,
}

// ─── App ─────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Submission form state.
  pub form: FormState,

  /// The current page of leads, as fetched.
  pub leads: Vec<Lead>,

  /// Pagination summary reported by the last list fetch.
  pub pagination: Pagination,

  /// 1-based page requested by the list view.
  pub page: u32,

  /// Status filter; `None` means all statuses.
  pub status_filter: Option<LeadStatus>,

  /// Cursor position within the fetched page.
  pub cursor: usize,

  /// Armed by the first `d` press; the second press deletes.
  pub confirm_delete: bool,

  /// Client-side dashboard counts.
  pub stats: Option<Stats>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::Form,
      form: FormState::default(),
      leads: Vec::new(),
      pagination: Pagination { total: 0, page: 1, pages: 0 },
      page: 1,
      status_filter: None,
      cursor: 0,
      confirm_delete: false,
      stats: None,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the current page with the current filter, then refresh stats.
  pub async fn refresh(&mut self) {
    self.status_msg = "Loading leads…".into();
    match self
      .client
      .list_leads(self.page, PAGE_SIZE, self.status_filter)
      .await
    {
      Ok((leads, pagination)) => {
        self.leads = leads;
        self.pagination = pagination;
        if self.cursor >= self.leads.len() {
          self.cursor = self.leads.len().saturating_sub(1);
        }
        self.status_msg = String::new();
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
    self.load_stats().await;
  }

  /// Recompute the stats strip the way the original dashboard widget does:
  /// one large unfiltered page, counted client-side.
  async fn load_stats(&mut self) {
    if let Ok((leads, pagination)) =
      self.client.list_leads(1, 1000, None).await
    {
      self.stats = Some(Stats {
        total:     pagination.total,
        new:       count_status(&leads, LeadStatus::New),
        qualified: count_status(&leads, LeadStatus::Qualified),
        converted: count_status(&leads, LeadStatus::Converted),
      });
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL)
      && key.code == KeyCode::Char('c')
    {
      return Ok(false);
    }

    // Global: Tab toggles between the two screens.
    if key.code == KeyCode::Tab && key.modifiers.is_empty() {
      self.toggle_screen().await;
      return Ok(true);
    }

    match self.screen {
      Screen::Form => self.handle_form_key(key).await,
      Screen::List => self.handle_list_key(key).await,
    }
  }

  async fn toggle_screen(&mut self) {
    self.screen = match self.screen {
      Screen::Form => {
        self.refresh().await;
        Screen::List
      }
      Screen::List => Screen::Form,
    };
  }

  // ── Form keys ─────────────────────────────────────────────────────────────

  async fn handle_form_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Down => self.form.focus = self.form.focus.next(),
      KeyCode::Up | KeyCode::BackTab => {
        self.form.focus = self.form.focus.prev()
      }

      KeyCode::Left if self.form.focus == FormField::Source => {
        let len = LeadSource::ALL.len();
        self.form.source_idx = (self.form.source_idx + len - 1) % len;
      }
      KeyCode::Right if self.form.focus == FormField::Source => {
        self.form.source_idx = (self.form.source_idx + 1) % LeadSource::ALL.len();
      }

      KeyCode::Enter => self.submit().await,

      KeyCode::Backspace => {
        if let Some(text) = self.form.focused_text() {
          text.pop();
        }
      }
      KeyCode::Char(c) => {
        let field = self.form.focus;
        if let Some(text) = self.form.focused_text() {
          text.push(c);
          // Typing clears the field's previous error.
          self.form.errors.retain(|e| e.field != field.key());
        }
      }

      _ => {}
    }
    Ok(true)
  }

  /// Validate the draft; on failure surface per-field errors and do not
  /// contact the API. On success create the lead, clear the form, and
  /// switch to the (refreshed) list view.
  async fn submit(&mut self) {
    let draft = self.form.draft();
    if let Err(errors) = draft.validate() {
      self.form.errors = errors;
      self.status_msg = "Please fix the errors in the form".into();
      return;
    }

    match self.client.create_lead(&draft).await {
      Ok(_) => {
        self.form = FormState::default();
        self.status_msg = "Lead submitted successfully!".into();
        self.page = 1;
        self.screen = Screen::List;
        self.refresh().await;
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  // ── List keys ─────────────────────────────────────────────────────────────

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Any key other than the second `d` disarms a pending delete.
    let was_armed = self.confirm_delete;
    self.confirm_delete = false;

    match key.code {
      KeyCode::Char('q') => return Ok(false),

      // Navigation within the page.
      KeyCode::Down | KeyCode::Char('j') => {
        if !self.leads.is_empty() && self.cursor + 1 < self.leads.len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }

      // Pagination; inert at the boundaries.
      KeyCode::Right | KeyCode::Char('n') => {
        if u64::from(self.page) < self.pagination.pages {
          self.page += 1;
          self.refresh().await;
        }
      }
      KeyCode::Left | KeyCode::Char('p') => {
        if self.page > 1 {
          self.page -= 1;
          self.refresh().await;
        }
      }

      // Status filter cycling; resets to the first page.
      KeyCode::Char('f') => {
        self.status_filter = next_filter(self.status_filter);
        self.page = 1;
        self.cursor = 0;
        self.refresh().await;
      }

      KeyCode::Char('r') => self.refresh().await,

      // Fetch the selected lead and surface the fields the table hides.
      KeyCode::Enter => self.show_selected_detail().await,

      // Inline status change on the selected row.
      KeyCode::Char('s') => self.cycle_selected_status().await,

      // Two-press delete.
      KeyCode::Char('d') => {
        if was_armed {
          self.delete_selected().await;
        } else if !self.leads.is_empty() {
          self.confirm_delete = true;
          self.status_msg = "Press d again to delete the selected lead".into();
        }
      }

      _ => {}
    }
    Ok(true)
  }

  async fn show_selected_detail(&mut self) {
    let Some(lead) = self.leads.get(self.cursor) else {
      return;
    };
    let id = lead.lead_id;

    match self.client.get_lead(id).await {
      Ok(lead) => {
        let message = lead.message.as_deref().unwrap_or("(no message)");
        self.status_msg =
          format!("{} <{}> — {}", lead.name, lead.email, message);
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  async fn cycle_selected_status(&mut self) {
    let Some(lead) = self.leads.get(self.cursor) else {
      return;
    };
    let (id, next) = (lead.lead_id, lead.status.next());

    match self.client.update_status(id, next).await {
      Ok(_) => {
        self.status_msg = "Status updated successfully".into();
        self.refresh().await;
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  async fn delete_selected(&mut self) {
    let Some(lead) = self.leads.get(self.cursor) else {
      return;
    };
    let id = lead.lead_id;

    match self.client.delete_lead(id).await {
      Ok(()) => {
        self.status_msg = "Lead deleted successfully".into();
        self.refresh().await;
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }
}

/// Cycle the list filter through all statuses and back to "all".
fn next_filter(current: Option<LeadStatus>) -> Option<LeadStatus> {
  match current {
    None => Some(LeadStatus::New),
    Some(LeadStatus::Converted) => None,
    Some(s) => Some(s.next()),
  }
}

fn count_status(leads: &[Lead], status: LeadStatus) -> usize {
  leads.iter().filter(|l| l.status == status).count()
}
