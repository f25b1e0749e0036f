//! Rendering of the capture area: status bar, contact header, chat bubbles.
//!
//! The live UI and the screenshot exporter share [`ChatView`] so what gets
//! exported is exactly what the preview shows, minus delete-mode decoration.

use fauxchat_models::{ChatMessage, Contact, PhoneStatus, Sender};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Widget};

/// Phone-like column width used by the exporter.
pub const CAPTURE_WIDTH: u16 = 46;

/// Fraction of the column a bubble may occupy, mirroring messenger layouts.
const BUBBLE_RATIO: u16 = 75;

/// The capture area as one renderable widget.
pub struct ChatView<'a> {
    pub phone: &'a PhoneStatus,
    pub contact: &'a Contact,
    pub messages: &'a [ChatMessage],
    /// Index of the bubble the deletion cursor sits on, if any.
    pub selected: Option<usize>,
    /// Applies the deletion-mode visual treatment.
    pub delete_mode: bool,
}

impl ChatView<'_> {
    /// Build the full line list at the given width, plus the line index at
    /// which each bubble starts (used to keep the selection visible).
    fn build(&self, width: u16) -> (Vec<Line<'static>>, Vec<usize>) {
        let mut lines = Vec::new();
        let mut bubble_starts = Vec::with_capacity(self.messages.len());

        lines.push(status_bar(self.phone, width));
        lines.extend(header_lines(self.contact));
        lines.push(Line::default());

        for (index, message) in self.messages.iter().enumerate() {
            bubble_starts.push(lines.len());
            let highlighted = self.delete_mode && self.selected == Some(index);
            lines.extend(bubble_lines(message, width, highlighted));
            lines.push(Line::default());
        }

        (lines, bubble_starts)
    }

    /// Total rendered height at the given width.
    pub fn height(&self, width: u16) -> u16 {
        let (lines, _) = self.build(width);
        u16::try_from(lines.len()).unwrap_or(u16::MAX)
    }
}

impl Widget for ChatView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (lines, bubble_starts) = self.build(area.width);

        // Bottom-anchored like a real chat, but never let the deletion
        // cursor scroll out of view.
        let mut skip = lines.len().saturating_sub(area.height as usize);
        if let Some(selected) = self.selected {
            if let Some(&start) = bubble_starts.get(selected) {
                skip = skip.min(start);
            }
        }

        let visible: Vec<Line<'static>> = lines.into_iter().skip(skip).collect();
        Paragraph::new(Text::from(visible)).render(area, buf);
    }
}

/// Status bar: clock on the left, battery gauge on the right.
fn status_bar(phone: &PhoneStatus, width: u16) -> Line<'static> {
    let clock = phone.clock.to_string();
    let filled = usize::from(phone.battery() / 20);
    let gauge: String = "▰".repeat(filled) + &"▱".repeat(5 - filled);
    let battery = format!("{gauge} {}%", phone.battery());

    let padding = usize::from(width)
        .saturating_sub(clock.chars().count() + battery.chars().count())
        .max(1);

    Line::from(vec![
        Span::styled(clock, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(padding)),
        Span::raw(battery),
    ])
}

/// Contact header: avatar initial plus name, presence line underneath.
fn header_lines(contact: &Contact) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(
                format!("({}) ", contact.initial()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                contact.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("    {}", contact.status),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// One bubble: optional photo placeholder, wrapped text, then a meta line
/// with the timestamp (and a read receipt on sent messages).
fn bubble_lines(message: &ChatMessage, width: u16, highlighted: bool) -> Vec<Line<'static>> {
    let bubble_width = (usize::from(width) * usize::from(BUBBLE_RATIO) / 100).max(8);
    let body_style = match message.sender {
        Sender::Sent => Style::default().fg(Color::LightGreen),
        Sender::Received => Style::default().fg(Color::White),
    };
    let body_style = if highlighted {
        body_style.fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        body_style
    };

    let mut lines = Vec::new();

    if message.image.is_some() {
        lines.push(aligned(
            Span::styled("[ photo ]".to_string(), body_style),
            message.sender,
        ));
    }

    for row in wrap_text(&message.text, bubble_width) {
        lines.push(aligned(Span::styled(row, body_style), message.sender));
    }

    let meta = match message.sender {
        Sender::Sent => format!("{} ✓✓", message.timestamp),
        Sender::Received => message.timestamp.clone(),
    };
    let meta_span = Span::styled(meta, Style::default().fg(Color::DarkGray));
    lines.push(match message.sender {
        Sender::Sent => Line::from(meta_span).right_aligned(),
        Sender::Received => Line::from(meta_span).left_aligned(),
    });

    lines
}

fn aligned(span: Span<'static>, sender: Sender) -> Line<'static> {
    match sender {
        Sender::Sent => Line::from(span).right_aligned(),
        Sender::Received => Line::from(span).left_aligned(),
    }
}

/// Greedy word wrap; words longer than the limit are hard-split.
fn wrap_text(text: &str, max: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max) {
                if chunk.len() == max {
                    rows.push(chunk.iter().collect());
                } else {
                    current = chunk.iter().collect();
                }
            }
            continue;
        }

        let sep = usize::from(!current.is_empty());
        if current.chars().count() + sep + word_len > max {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        rows.push(current);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use fauxchat_models::ClockTime;

    fn phone() -> PhoneStatus {
        PhoneStatus::new("14:58".parse::<ClockTime>().unwrap(), 87).unwrap()
    }

    #[test]
    fn wrap_keeps_short_text_on_one_row() {
        assert_eq!(wrap_text("oi tudo bem", 20), vec!["oi tudo bem"]);
    }

    #[test]
    fn wrap_splits_on_word_boundaries() {
        assert_eq!(
            wrap_text("uma frase um pouco mais longa", 12),
            vec!["uma frase um", "pouco mais", "longa"]
        );
    }

    #[test]
    fn wrap_handles_empty_text() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn wrap_rows_respect_the_limit() {
        for row in wrap_text("palavra supercalifragilisticexpialidocious fim", 10) {
            assert!(row.chars().count() <= 10, "{row}");
        }
    }

    #[test]
    fn status_bar_shows_clock_and_charge() {
        let line = status_bar(&phone(), CAPTURE_WIDTH);
        let rendered: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(rendered.starts_with("14:58"));
        assert!(rendered.ends_with("87%"));
    }

    #[test]
    fn sent_bubbles_carry_a_read_receipt() {
        let msg = ChatMessage::new("ok", Sender::Sent, "15:00", None);
        let lines = bubble_lines(&msg, CAPTURE_WIDTH, false);
        let meta: String = lines
            .last()
            .unwrap()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(meta, "15:00 ✓✓");
    }

    #[test]
    fn received_bubbles_do_not() {
        let msg = ChatMessage::new("ok", Sender::Received, "15:00", None);
        let lines = bubble_lines(&msg, CAPTURE_WIDTH, false);
        let meta: String = lines
            .last()
            .unwrap()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(meta, "15:00");
    }

    #[test]
    fn photo_messages_render_a_placeholder() {
        let msg = ChatMessage::new("", Sender::Received, "15:00", Some(vec![1, 2]));
        let lines = bubble_lines(&msg, CAPTURE_WIDTH, false);
        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(first, "[ photo ]");
    }

    #[test]
    fn view_height_grows_with_messages() {
        let contact = Contact::new("Maria", "online");
        let phone = phone();
        let empty = ChatView {
            phone: &phone,
            contact: &contact,
            messages: &[],
            selected: None,
            delete_mode: false,
        };
        let base = empty.height(CAPTURE_WIDTH);

        let messages = vec![ChatMessage::new("oi", Sender::Received, "15:00", None)];
        let one = ChatView {
            phone: &phone,
            contact: &contact,
            messages: &messages,
            selected: None,
            delete_mode: false,
        };
        assert!(one.height(CAPTURE_WIDTH) > base);
    }
}
