use rust_decimal::Decimal;

/// Format a decimal amount as dollars with thousand separators,
/// e.g. `1234567.89` → `"$1,234,567.89"`, `-42.5` → `"-$42.50"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let formatted = format!("{:.2}", val.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{dec_part}")
}

/// Format a percentage with one decimal place, e.g. `75.0` → `"75.0%"`.
pub(crate) fn format_percent(percent: f64) -> String {
    format!("{percent:.1}%")
}

/// Truncate a string to `max` visible characters, appending "…" when cut.
/// Counts chars, not bytes, so multi-byte text stays intact.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max - 1).collect();
    format!("{kept}…")
}

/// Fixed-width text meter: `meter(0.5, 10)` → `"[█████░░░░░]"`. The fill
/// ratio is clamped so over-100% usage still renders a full bar.
pub(crate) fn meter(ratio: f64, width: usize) -> String {
    let clamped = ratio.clamp(0.0, 1.0);
    let filled = (clamped * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Move a list cursor down by one, keeping it inside the visible page.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, scrolling when it leaves the page.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
