//! Services the controller borrows from its host: user prompts and drawing
//! storage.
//!
//! Both are traits so tests can script them. [`ConsolePrompter`] asks on the
//! terminal and is used when the window has no font to draw a prompt with;
//! see [`crate::prompt`] for the in-window one.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use ballworld_scene::Rgba;

/// Blocking user prompts. `None` means the user cancelled.
pub trait Prompter {
    fn request_text(&mut self, prompt: &str) -> Option<String>;

    /// `current` is the color the answer would replace.
    fn request_color(&mut self, title: &str, current: Rgba) -> Option<Rgba>;
}

/// Where the single drawing lives.
pub trait DrawingStore {
    /// Path shown in error messages.
    fn path(&self) -> PathBuf;

    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn read(&mut self) -> io::Result<Vec<u8>>;
}

// ── FileStore ─────────────────────────────────────────────────────────────

/// A drawing file on disk, read and written whole.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DrawingStore for FileStore {
    fn path(&self) -> PathBuf {
        std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        fs::write(&self.path, bytes)
    }

    fn read(&mut self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

// ── ConsolePrompter ───────────────────────────────────────────────────────

/// Prompts on a text stream, one line per answer.
///
/// An empty line or end of input cancels. Colors are re-asked until they
/// parse (`#rrggbb`, `#rrggbbaa`, `r,g,b` or `r,g,b,a`).
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompter<io::StdinLock<'static>, io::Stderr> {
    /// Reads answers from stdin and writes prompts to stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `prompt` and reads one trimmed, non-empty line.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = write!(self.output, "{prompt} ").and_then(|_| self.output.flush()) {
            log::warn!("could not write prompt: {e}");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let answer = line.trim();
                (!answer.is_empty()).then(|| answer.to_string())
            }
            Err(e) => {
                log::warn!("could not read answer: {e}");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn request_text(&mut self, prompt: &str) -> Option<String> {
        self.ask(prompt)
    }

    fn request_color(&mut self, title: &str, current: Rgba) -> Option<Rgba> {
        let prompt = format!("{title} [{current}]:");
        loop {
            let answer = self.ask(&prompt)?;
            match answer.parse::<Rgba>() {
                Ok(color) => return Some(color),
                Err(e) => {
                    if let Err(w) = writeln!(self.output, "{e}") {
                        log::warn!("could not write parse error: {w}");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> ConsolePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn text_is_trimmed() {
        let mut p = prompter("  42 \n");
        assert_eq!(p.request_text("Please input a value:").as_deref(), Some("42"));
        assert_eq!(String::from_utf8_lossy(&p.output), "Please input a value: ");
    }

    #[test]
    fn empty_line_and_eof_cancel() {
        assert_eq!(prompter("\n").request_text("?"), None);
        assert_eq!(prompter("").request_text("?"), None);
        assert_eq!(prompter("").request_color("Pick", Rgba::RED), None);
    }

    #[test]
    fn color_is_reasked_until_valid() {
        let mut p = prompter("purple\n#00ff00\n");
        assert_eq!(p.request_color("Choose Circle Color", Rgba::RED), Some(Rgba::GREEN));

        let out = String::from_utf8_lossy(&p.output);
        assert_eq!(out.matches("Choose Circle Color").count(), 2);
    }

    #[test]
    fn color_prompt_shows_current() {
        let mut p = prompter("0,0,255\n");
        assert_eq!(p.request_color("Choose Background Color", Rgba::BLACK), Some(Rgba::BLUE));
        assert!(String::from_utf8_lossy(&p.output).contains(&Rgba::BLACK.to_string()));
    }

    /// Output that rejects every write.
    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn unwritable_output_still_reads_answers() {
        let input = Cursor::new(b"purple\n#0000ff\n".to_vec());
        let mut p = ConsolePrompter::new(input, Closed);
        assert_eq!(p.request_color("Pick", Rgba::RED), Some(Rgba::BLUE));
    }

    #[test]
    fn file_store_round_trip() {
        let path = std::env::temp_dir().join(format!("ballworld-store-{}.dp", std::process::id()));
        let mut store = FileStore::new(&path);
        store.write(b"SPCI").unwrap();
        assert_eq!(store.read().unwrap(), b"SPCI");
        assert!(store.path().is_absolute());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut store = FileStore::new("/nonexistent-dir/ballworld/drawings.dp");
        assert_eq!(store.read().unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
