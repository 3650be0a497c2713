//! Available-copies defaulting on the book form

/// New value for the available-copies input after total copies changed.
///
/// Returns `None` when the input should be left alone. A new record
/// (available empty or zero) mirrors the total; an existing one is only
/// clamped so that it never exceeds the total.
pub fn available_copies_for(total: &str, available: &str) -> Option<String> {
    let total_count: i64 = total.trim().parse().ok()?;
    if total_count < 0 {
        return None;
    }

    let available = available.trim();
    let current: i64 = available.parse().unwrap_or(0);
    let is_new = available.is_empty() || current == 0;

    if is_new || current > total_count {
        Some(total_count.to_string())
    } else {
        None
    }
}
