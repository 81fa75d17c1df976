//! Upload filename safety helpers.
//!
//! Uploaded image files are stored under a fixed uploads directory; the
//! filename that lands on disk must never escape it or carry characters
//! that break headers or shells.

/// Image file extensions accepted for recipe uploads.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Whether a filename has an accepted image extension.
///
/// The name must contain a dot; the extension is compared case-insensitively.
pub fn is_allowed_image(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_lowercase();
            ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

/// Sanitize a user-supplied filename for storage.
pub fn sanitize_filename(filename: &str) -> String {
    // Remove path components
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    // Replace dangerous characters
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // Ensure not empty and not too long
    let sanitized = sanitized.trim();
    if sanitized.is_empty() {
        return "unnamed_file".to_string();
    }

    // Truncate if too long (preserve extension)
    if sanitized.len() > 255 {
        if let Some(dot_pos) = sanitized.rfind('.') {
            let ext = &sanitized[dot_pos..];
            let name = truncate_to_bytes(&sanitized[..dot_pos], 255 - ext.len());
            return format!("{}{}", name, ext);
        }
        return truncate_to_bytes(sanitized, 255).to_string();
    }

    sanitized.to_string()
}

/// Longest prefix of `s` that fits in `max` bytes, cut on a char boundary.
fn truncate_to_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let end = s
        .char_indices()
        .take_while(|(idx, c)| idx + c.len_utf8() <= max)
        .last()
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);
    &s[..end]
}
