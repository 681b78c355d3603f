#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_under_thousand() {
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.5)), "-$42.50");
}

#[test]
fn test_format_amount_millions() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
    assert_eq!(format_amount(dec!(10000000)), "$10,000,000.00");
}

#[test]
fn test_format_amount_pads_cents() {
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
    assert_eq!(format_amount(dec!(5)), "$5.00");
}

// ── format_percent ────────────────────────────────────────────

#[test]
fn test_format_percent() {
    assert_eq!(format_percent(75.0), "75.0%");
    assert_eq!(format_percent(0.0), "0.0%");
    assert_eq!(format_percent(112.55), "112.6%");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_and_exact() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_cuts_with_ellipsis() {
    assert_eq!(truncate("hello world", 5), "hell…");
    assert_eq!(truncate("hello", 1), "…");
}

#[test]
fn test_truncate_degenerate() {
    assert_eq!(truncate("", 5), "");
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── meter ─────────────────────────────────────────────────────

#[test]
fn test_meter_empty_and_full() {
    assert_eq!(meter(0.0, 4), "[░░░░]");
    assert_eq!(meter(1.0, 4), "[████]");
}

#[test]
fn test_meter_half() {
    assert_eq!(meter(0.5, 4), "[██░░]");
}

#[test]
fn test_meter_clamps_out_of_range() {
    assert_eq!(meter(1.5, 4), "[████]");
    assert_eq!(meter(-0.5, 4), "[░░░░]");
}

// ── scroll helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_and_pages() {
    let (mut index, mut scroll) = (0, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (1, 0));

    scroll_down(&mut index, &mut scroll, 10, 3);
    scroll_down(&mut index, &mut scroll, 10, 3);
    // Cursor hits row 3, page of 3 scrolls to keep it visible
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (4, 2);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (4, 2));
}

#[test]
fn test_scroll_up_and_top() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));

    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_up_saturates() {
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));

    scroll_to_bottom(&mut index, &mut scroll, 0, 4);
    // Empty list leaves the cursor alone
    assert_eq!((index, scroll), (9, 6));
}
