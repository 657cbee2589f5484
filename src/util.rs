use std::time::SystemTime;

/// The current time, formatted for RPL_CREATED.
pub fn time_str() -> String {
    humantime::format_rfc3339_seconds(SystemTime::now()).to_string()
}

/// Returns the longest prefix of `s` that is at most `max` bytes long and ends on a char boundary.
pub fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Whether `s` starts with a channel prefix.
pub fn is_channel_name(s: &str) -> bool {
    s.starts_with('#') || s.starts_with('&')
}

pub fn is_valid_channel_name(s: &str) -> bool {
    // https://tools.ietf.org/html/rfc2811.html#section-2.1
    let ctrl_g = 7 as char;
    1 < s.len()
        && is_channel_name(s)
        && s.chars().all(|c| c != ' ' && c != ',' && c != ctrl_g && c != ':')
}

pub fn is_valid_nickname(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with(|c| c == '#' || c == '&' || c == ':')
        && s.chars().all(|c| ' ' < c && c != ',' && c != ':' && c != '\x7f')
}

// mod tests
