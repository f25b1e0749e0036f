//! Screenshot export: rasterise the capture area into an off-screen buffer
//! and write the rows to a text file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fauxchat_models::{ChatMessage, Contact, PhoneStatus};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::view::{ChatView, CAPTURE_WIDTH};

/// Render the conversation into a timestamped file next to `dir` and return
/// its path.
///
/// The export always renders without delete-mode decoration, whatever the
/// live toggle says.
pub fn export_screenshot(
    phone: &PhoneStatus,
    contact: &Contact,
    messages: &[ChatMessage],
    dir: &Path,
) -> anyhow::Result<PathBuf> {
    let view = ChatView {
        phone,
        contact,
        messages,
        selected: None,
        delete_mode: false,
    };

    let height = view.height(CAPTURE_WIDTH).max(1);
    let area = Rect::new(0, 0, CAPTURE_WIDTH, height);
    let mut buffer = Buffer::empty(area);
    view.render(area, &mut buffer);

    let mut rows = Vec::with_capacity(usize::from(height));
    for y in 0..height {
        let mut row = String::with_capacity(usize::from(CAPTURE_WIDTH));
        for x in 0..CAPTURE_WIDTH {
            row.push_str(buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()));
        }
        rows.push(row.trim_end().to_string());
    }
    while rows.last().is_some_and(String::is_empty) {
        rows.pop();
    }

    let name = format!(
        "fauxchat-{}.txt",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    );
    let path = dir.join(name);
    fs::write(&path, rows.join("\n") + "\n")
        .with_context(|| format!("failed to write screenshot to {}", path.display()))?;

    tracing::info!(path = %path.display(), messages = messages.len(), "exported screenshot");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fauxchat_models::{ClockTime, Sender};

    fn fixture() -> (PhoneStatus, Contact, Vec<ChatMessage>) {
        let phone = PhoneStatus::new("14:58".parse::<ClockTime>().unwrap(), 87).unwrap();
        let contact = Contact::new("Maria", "online");
        let messages = vec![
            ChatMessage::new("Oi, tudo bem?", Sender::Sent, "15:00", None),
            ChatMessage::new("Tudo certo!", Sender::Received, "15:01", None),
        ];
        (phone, contact, messages)
    }

    #[test]
    fn export_writes_the_capture_area() {
        let (phone, contact, messages) = fixture();
        let dir = std::env::temp_dir().join(format!("fauxchat-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let path = export_screenshot(&phone, &contact, &messages, &dir).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        assert!(contents.contains("14:58"));
        assert!(contents.contains("87%"));
        assert!(contents.contains("Maria"));
        assert!(contents.contains("Oi, tudo bem?"));
        assert!(contents.contains("15:00 ✓✓"));
        assert!(contents.contains("Tudo certo!"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn sent_bubbles_are_right_aligned_in_the_export() {
        let (phone, contact, messages) = fixture();
        let dir = std::env::temp_dir().join(format!("fauxchat-align-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let path = export_screenshot(&phone, &contact, &messages, &dir).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        let sent_row = contents
            .lines()
            .find(|l| l.contains("Oi, tudo bem?"))
            .unwrap();
        let received_row = contents.lines().find(|l| l.contains("Tudo certo!")).unwrap();

        assert!(sent_row.starts_with(' '), "sent bubble should be indented");
        assert!(received_row.starts_with("Tudo certo!"));

        fs::remove_dir_all(&dir).ok();
    }
}
