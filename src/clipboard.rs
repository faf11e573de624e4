//! System clipboard access

/// Write-only clipboard used by "copy code"
pub trait Clipboard: Send {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// The OS clipboard via arboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| e.to_string())
    }
}
