//! The composer: all mutable UI state in one struct, driven by [`Action`]s.

use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fauxchat_models::{
    organize, ChatMessage, ClockTime, Contact, PhoneStatus, RandomJitter, Sender,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tokio::sync::mpsc::UnboundedSender;

use crate::tui::Action;
use crate::view::{ChatView, CAPTURE_WIDTH};

/// Cosmetic "Organizing…" pause before the organizer pass runs.
const ORGANIZE_DELAY: Duration = Duration::from_millis(1000);
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

pub trait AppController {
    fn update(&mut self, action: Action);
    fn render(&mut self, f: &mut Frame);
    fn should_quit(&self) -> bool;
}

/// Which overlay is capturing keystrokes, and its edit buffer.
enum Modal {
    AddMessage { buffer: String },
    /// Second step of the manual add: the message's own time, independent
    /// of the status-bar clock.
    AddMessageTime { text: String, buffer: String },
    AttachPhoto { buffer: String },
    PasteScript { buffer: String },
    EditTime { buffer: String },
    EditBattery { buffer: String },
    EditName { buffer: String },
    EditStatus { buffer: String },
}

impl Modal {
    fn prompt(&self) -> &'static str {
        match self {
            Self::AddMessage { .. } => "Message text (Enter to continue, Esc to cancel)",
            Self::AddMessageTime { .. } => "Message time, HH:MM (Enter to add)",
            Self::AttachPhoto { .. } => "Photo path (Enter to attach)",
            Self::PasteScript { .. } => "Paste script (Ctrl+O organizes, Esc keeps draft)",
            Self::EditTime { .. } => "Status-bar time, HH:MM",
            Self::EditBattery { .. } => "Battery percentage, 0-100",
            Self::EditName { .. } => "Contact name",
            Self::EditStatus { .. } => "Contact status line",
        }
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self {
            Self::AddMessage { buffer }
            | Self::AddMessageTime { buffer, .. }
            | Self::AttachPhoto { buffer }
            | Self::PasteScript { buffer }
            | Self::EditTime { buffer }
            | Self::EditBattery { buffer }
            | Self::EditName { buffer }
            | Self::EditStatus { buffer } => buffer,
        }
    }
}

pub struct ComposerApp {
    phone: PhoneStatus,
    contact: Contact,
    messages: Vec<ChatMessage>,

    // Compose state
    compose_kind: Sender,
    pending_photo: Option<Vec<u8>>,
    script_draft: String,

    // Tools
    delete_mode: bool,
    selected: Option<usize>,
    organizing: bool,

    // Overlays
    modal: Option<Modal>,
    notification: Option<(String, Instant)>,

    tx: UnboundedSender<Action>,
    should_quit: bool,
}

impl ComposerApp {
    pub fn new(
        phone: PhoneStatus,
        contact: Contact,
        script_draft: String,
        tx: UnboundedSender<Action>,
    ) -> Self {
        Self {
            phone,
            contact,
            messages: Vec::new(),
            compose_kind: Sender::Received,
            pending_photo: None,
            script_draft,
            delete_mode: false,
            selected: None,
            organizing: false,
            modal: None,
            notification: None,
            tx,
            should_quit: false,
        }
    }

    fn show_notification(&mut self, msg: impl Into<String>) {
        self.notification = Some((msg.into(), Instant::now()));
    }

    // ── Message tools ────────────────────────────────────────────────

    fn add_manual_message(&mut self, text: &str, timestamp: ClockTime) {
        let message = ChatMessage::new(
            text.trim(),
            self.compose_kind,
            timestamp.to_string(),
            self.pending_photo.take(),
        );
        tracing::debug!(sender = %message.sender, "added manual message");
        self.messages.push(message);
    }

    fn toggle_delete_mode(&mut self) {
        self.delete_mode = !self.delete_mode;
        if self.delete_mode {
            if self.selected.is_none() && !self.messages.is_empty() {
                self.selected = Some(self.messages.len() - 1);
            }
            self.show_notification("Delete mode ON - Enter removes the selected bubble");
        } else {
            self.show_notification("Delete mode OFF");
        }
    }

    fn delete_selected(&mut self) {
        let Some(index) = self.selected else { return };
        if index >= self.messages.len() {
            return;
        }
        let removed = self.messages.remove(index);
        tracing::info!(id = %removed.id, "deleted message");
        if self.messages.is_empty() {
            self.selected = None;
        } else {
            self.selected = Some(index.min(self.messages.len() - 1));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.messages.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.messages.len() - 1;
        let current = self.selected.unwrap_or(last);
        let next = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            (current + delta.unsigned_abs()).min(last)
        };
        self.selected = Some(next);
    }

    // ── Organizer trigger ────────────────────────────────────────────

    fn start_organize(&mut self) {
        if self.organizing {
            self.show_notification("Organizer is already running");
            return;
        }
        if self.script_draft.trim().is_empty() {
            self.show_notification("Paste a script first!");
            return;
        }

        self.organizing = true;
        let script = self.script_draft.clone();
        let start = self.phone.clock;
        let tx = self.tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(ORGANIZE_DELAY).await;
            let mut turns: Vec<ChatMessage> = Vec::new();
            let mut jitter = RandomJitter::new();
            let action = match organize(&script, start, &mut jitter, &mut turns) {
                Ok(count) => {
                    tracing::info!(count, "organized script");
                    Action::ScriptOrganized(turns)
                }
                Err(err) => Action::OrganizeFailed(err.to_string()),
            };
            let _ = tx.send(action);
        });
    }

    fn export(&mut self) {
        match crate::export::export_screenshot(
            &self.phone,
            &self.contact,
            &self.messages,
            Path::new("."),
        ) {
            Ok(path) => self.show_notification(format!("Saved {}", path.display())),
            Err(err) => {
                tracing::error!(%err, "screenshot export failed");
                self.show_notification(format!("Export failed: {err}"));
            }
        }
    }

    // ── Key handling ─────────────────────────────────────────────────

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => {
                self.compose_kind = self.compose_kind.other();
            }
            KeyCode::Char('a') => {
                self.modal = Some(Modal::AddMessage {
                    buffer: String::new(),
                });
            }
            KeyCode::Char('p') => {
                self.modal = Some(Modal::AttachPhoto {
                    buffer: String::new(),
                });
            }
            KeyCode::Char('o') => {
                self.modal = Some(Modal::PasteScript {
                    buffer: self.script_draft.clone(),
                });
            }
            KeyCode::Char('t') => {
                self.modal = Some(Modal::EditTime {
                    buffer: self.phone.clock.to_string(),
                });
            }
            KeyCode::Char('b') => {
                self.modal = Some(Modal::EditBattery {
                    buffer: self.phone.battery().to_string(),
                });
            }
            KeyCode::Char('c') => {
                self.modal = Some(Modal::EditName {
                    buffer: self.contact.name.clone(),
                });
            }
            KeyCode::Char('s') => {
                self.modal = Some(Modal::EditStatus {
                    buffer: self.contact.status.clone(),
                });
            }
            KeyCode::Char('d') => self.toggle_delete_mode(),
            KeyCode::Char('x') => self.export(),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter if self.delete_mode => self.delete_selected(),
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let Some(mut modal) = self.modal.take() else {
            return;
        };

        match key.code {
            KeyCode::Esc => {
                // The paste box keeps its draft across open/close.
                if let Modal::PasteScript { buffer } = modal {
                    self.script_draft = buffer;
                }
                return;
            }
            KeyCode::Char('o')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(modal, Modal::PasteScript { .. }) =>
            {
                if let Modal::PasteScript { buffer } = modal {
                    self.script_draft = buffer;
                }
                self.start_organize();
                return;
            }
            KeyCode::Enter => {
                if matches!(modal, Modal::PasteScript { .. }) {
                    modal.buffer_mut().push('\n');
                    self.modal = Some(modal);
                    return;
                }
                self.submit_modal(modal);
                return;
            }
            KeyCode::Backspace => {
                modal.buffer_mut().pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                modal.buffer_mut().push(c);
            }
            _ => {}
        }

        self.modal = Some(modal);
    }

    fn submit_modal(&mut self, modal: Modal) {
        match modal {
            Modal::AddMessage { buffer } => {
                if buffer.trim().is_empty() && self.pending_photo.is_none() {
                    // Refused: keep the overlay open with the text intact.
                    self.show_notification("Type a message or attach a photo first");
                    self.modal = Some(Modal::AddMessage { buffer });
                } else {
                    // Each message carries its own time; the status-bar
                    // clock is only the default.
                    self.modal = Some(Modal::AddMessageTime {
                        text: buffer,
                        buffer: self.phone.clock.to_string(),
                    });
                }
            }
            Modal::AddMessageTime { text, buffer } => match buffer.parse::<ClockTime>() {
                Ok(timestamp) => self.add_manual_message(&text, timestamp),
                Err(err) => {
                    self.show_notification(err.to_string());
                    self.modal = Some(Modal::AddMessageTime { text, buffer });
                }
            },
            Modal::AttachPhoto { buffer } => {
                let path = buffer.trim();
                match std::fs::read(path) {
                    Ok(bytes) => {
                        self.show_notification(format!("Attached {path} ({} bytes)", bytes.len()));
                        self.pending_photo = Some(bytes);
                    }
                    Err(err) => self.show_notification(format!("Cannot read {path}: {err}")),
                }
            }
            Modal::PasteScript { buffer } => {
                self.script_draft = buffer;
            }
            Modal::EditTime { buffer } => match buffer.parse::<ClockTime>() {
                Ok(clock) => self.phone.clock = clock,
                Err(err) => self.show_notification(err.to_string()),
            },
            Modal::EditBattery { buffer } => {
                let raw = buffer.trim();
                match raw.parse::<u16>() {
                    Ok(value) => match PhoneStatus::new(self.phone.clock, value) {
                        Ok(phone) => self.phone = phone,
                        Err(err) => self.show_notification(err.to_string()),
                    },
                    Err(_) => {
                        self.show_notification(format!(
                            "Battery must be a number, got \"{raw}\""
                        ));
                    }
                }
            }
            Modal::EditName { buffer } => self.contact.name = buffer.trim().to_string(),
            Modal::EditStatus { buffer } => self.contact.status = buffer.trim().to_string(),
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_side_panel(&self, f: &mut Frame, area: Rect) {
        let kind_style = |kind: Sender| {
            if kind == self.compose_kind {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        };

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Compose as: "),
                Span::styled("received", kind_style(Sender::Received)),
                Span::raw(" / "),
                Span::styled("sent", kind_style(Sender::Sent)),
            ]),
            Line::from(format!(
                "Photo pending: {}",
                if self.pending_photo.is_some() { "yes" } else { "no" }
            )),
            Line::from(format!(
                "Script draft: {} line(s)",
                self.script_draft.lines().filter(|l| !l.trim().is_empty()).count()
            )),
            Line::from(vec![
                Span::raw("Delete mode: "),
                if self.delete_mode {
                    Span::styled("ON", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                } else {
                    Span::raw("off")
                },
            ]),
            Line::default(),
        ];

        if self.organizing {
            lines.push(Line::from(Span::styled(
                "Organizing…",
                Style::default().fg(Color::Yellow),
            )));
            lines.push(Line::default());
        }

        for help in [
            "Tab  switch compose side",
            "a    add message",
            "p    attach photo",
            "o    paste script / organize",
            "t    set time   b  set battery",
            "c    contact name   s  status",
            "d    delete mode   ↑/↓ select",
            "x    export screenshot",
            "q    quit",
        ] {
            lines.push(Line::from(Span::styled(
                help,
                Style::default().fg(Color::DarkGray),
            )));
        }

        let panel = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Controls"));
        f.render_widget(panel, area);
    }

    fn render_modal(&self, f: &mut Frame, modal: &Modal) {
        let tall = matches!(modal, Modal::PasteScript { .. });
        let area = centered_rect(60, if tall { 60 } else { 20 }, f.area());
        f.render_widget(Clear, area);

        let buffer = match modal {
            Modal::AddMessage { buffer }
            | Modal::AddMessageTime { buffer, .. }
            | Modal::AttachPhoto { buffer }
            | Modal::PasteScript { buffer }
            | Modal::EditTime { buffer }
            | Modal::EditBattery { buffer }
            | Modal::EditName { buffer }
            | Modal::EditStatus { buffer } => buffer.as_str(),
        };

        let input = Paragraph::new(buffer)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(modal.prompt()));
        f.render_widget(input, area);
    }
}

impl AppController for ComposerApp {
    fn update(&mut self, action: Action) {
        match action {
            Action::Key(key) => {
                if self.modal.is_some() {
                    self.handle_modal_key(key);
                } else {
                    self.handle_normal_key(key);
                }
            }
            Action::ScriptOrganized(turns) => {
                self.organizing = false;
                self.show_notification(format!("Organized {} message(s)", turns.len()));
                self.messages.extend(turns);
            }
            Action::OrganizeFailed(reason) => {
                self.organizing = false;
                self.show_notification(reason);
            }
            Action::Tick | Action::Resize(..) => {}
        }

        if let Some((_, since)) = self.notification {
            if since.elapsed() > NOTIFICATION_TTL {
                self.notification = None;
            }
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CAPTURE_WIDTH + 2), Constraint::Min(0)])
            .split(f.area());

        let title = if self.delete_mode {
            "Preview [delete mode]"
        } else {
            "Preview"
        };
        let border_style = if self.delete_mode {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(chunks[0]);
        f.render_widget(block, chunks[0]);
        f.render_widget(
            ChatView {
                phone: &self.phone,
                contact: &self.contact,
                messages: &self.messages,
                selected: self.selected,
                delete_mode: self.delete_mode,
            },
            inner,
        );

        self.render_side_panel(f, chunks[1]);

        if let Some(modal) = self.modal.as_ref() {
            self.render_modal(f, modal);
        } else if let Some((msg, _)) = self.notification.clone() {
            let area = centered_rect(60, 20, f.area());
            f.render_widget(Clear, area);
            let popup = Paragraph::new(msg)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Notification"))
                .style(Style::default().bg(Color::Blue).fg(Color::White));
            f.render_widget(popup, area);
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
