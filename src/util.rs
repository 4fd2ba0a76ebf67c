use std::path::Path;

/// Show `path` relative to `base` when it lives under it.
pub fn relative_display(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => path.display().to_string(),
    }
}

/// Lossy UTF-8 excerpt of process output, cut at `max_bytes` on a char
/// boundary and marked when shortened.
pub fn output_excerpt(bytes: &[u8], max_bytes: usize) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut cut = max_bytes;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{} [truncated]", &text[..cut])
}

/// Resolve a command from the first non-empty environment variable in `vars`.
pub fn resolve_command(vars: &[&str], fallback: &str) -> Vec<String> {
    vars.iter()
        .filter_map(|var| std::env::var(var).ok())
        .filter_map(|value| shell_words::split(&value).ok())
        .find(|parts| !parts.is_empty())
        .unwrap_or_else(|| vec![fallback.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn excerpt_respects_char_boundaries() {
        assert_eq!(output_excerpt("héllo".as_bytes(), 2), "h [truncated]");
        assert_eq!(output_excerpt("héllo".as_bytes(), 3), "hé [truncated]");
        assert_eq!(output_excerpt(b"  short\n", 10), "short");
    }

    #[test]
    fn relative_display_strips_base_when_possible() {
        let base = Path::new("/work");
        assert_eq!(relative_display(Path::new("/work/out/a.md"), base), "out/a.md");
        assert_eq!(relative_display(Path::new("/elsewhere/a.md"), base), "/elsewhere/a.md");
        assert_eq!(relative_display(base, base), "/work");
    }

    #[test]
    #[serial]
    fn resolve_command_prefers_first_set_variable() {
        std::env::set_var("ADRM_TEST_VISUAL", "code --wait");
        std::env::set_var("ADRM_TEST_EDITOR", "nano");
        assert_eq!(
            resolve_command(&["ADRM_TEST_VISUAL", "ADRM_TEST_EDITOR"], "vi"),
            vec!["code", "--wait"]
        );
        std::env::set_var("ADRM_TEST_VISUAL", "   ");
        assert_eq!(
            resolve_command(&["ADRM_TEST_VISUAL", "ADRM_TEST_EDITOR"], "vi"),
            vec!["nano"]
        );
        std::env::remove_var("ADRM_TEST_VISUAL");
        std::env::remove_var("ADRM_TEST_EDITOR");
        assert_eq!(resolve_command(&["ADRM_TEST_VISUAL"], "vi"), vec!["vi"]);
    }
}
