use super::errors::ClipboardError;

pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Platform clipboard. The handle is opened on first use so headless runs only
/// fail when something is actually copied.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ClipboardError::Unavailable("clipboard not initialized".to_string()));
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Keeps copied text in memory; used by scripted runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub writes: Vec<String>,
    pub fail_with: Option<String>,
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(message) = &self.fail_with {
            return Err(ClipboardError::Write(message.clone()));
        }
        self.writes.push(text.to_string());
        Ok(())
    }
}
