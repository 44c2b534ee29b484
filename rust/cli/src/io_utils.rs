//! Small I/O helpers shared by the commands.

use std::io::BufRead;

/// Reads one line from `stdin`, trimmed. `None` on EOF or a read error.
///
/// # Example
///
/// ```rust
/// # use hucoach_cli::io_utils::read_stdin_line;
/// let mut input = std::io::Cursor::new(b"bet 10\n".to_vec());
/// assert_eq!(read_stdin_line(&mut input), Some("bet 10".to_string()));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads a UTF-8 text file, dropping a leading byte order mark.
pub fn read_text(path: &str) -> std::io::Result<String> {
    let mut content = std::fs::read_to_string(path)?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_stdin_line_with_whitespace() {
        let mut cursor = Cursor::new(b"  raise 4  \n".to_vec());
        assert_eq!(read_stdin_line(&mut cursor), Some("raise 4".to_string()));
    }

    #[test]
    fn test_read_stdin_line_empty_after_trim() {
        let mut cursor = Cursor::new(b"   \n".to_vec());
        assert_eq!(read_stdin_line(&mut cursor), Some(String::new()));
    }

    #[test]
    fn test_strip_utf8_bom() {
        let mut s = "\u{feff}{}".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "{}");
        strip_utf8_bom(&mut s);
        assert_eq!(s, "{}");
    }

    #[test]
    fn test_read_text_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.jsonl");
        assert!(read_text(path.to_str().unwrap()).is_err());
    }
}
