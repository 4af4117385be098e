use pv_yield_toolbox::format::{
    bar_chart, format_decimal, format_grouped, format_thousands, NumberStyle,
};
use rstest::rstest;

#[rstest]
#[case(900_000.0, "900.000")]
#[case(485_000.4, "485.000")]
#[case(1_234_567.6, "1.234.568")]
#[case(999.0, "999")]
#[case(0.0, "0")]
#[case(-0.3, "0")]
#[case(-12_345.0, "-12.345")]
fn german_thousands(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(format_thousands(value, NumberStyle::German), expected);
}

#[test]
fn english_thousands_use_comma() {
    assert_eq!(format_thousands(900_000.0, NumberStyle::English), "900,000");
}

#[test]
fn grouped_with_decimals() {
    assert_eq!(format_grouped(1234.56, 1, NumberStyle::German), "1.234,6");
    assert_eq!(format_grouped(1234.56, 1, NumberStyle::English), "1,234.6");
    assert_eq!(format_grouped(900.0, 1, NumberStyle::German), "900,0");
}

#[rstest]
#[case(53.888_888, "53,9")]
#[case(40.0, "40,0")]
#[case(0.0, "0,0")]
#[case(100.0, "100,0")]
fn german_percent(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(format_decimal(value, 1, NumberStyle::German), expected);
}

#[test]
fn bar_chart_scales_to_largest_value() {
    let lines = bar_chart(
        &[("Gen", 1000.0), ("Self", 500.0), ("Surplus", 0.0)],
        10,
        NumberStyle::German,
    );
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], format!("Gen     | {} 1.000", "█".repeat(10)));
    assert_eq!(lines[1], format!("Self    | {} 500", "█".repeat(5)));
    assert_eq!(lines[2], "Surplus |  0");
}

#[test]
fn bar_chart_with_all_zero_values_draws_no_bars() {
    let lines = bar_chart(&[("a", 0.0), ("b", 0.0)], 20, NumberStyle::English);
    assert!(lines.iter().all(|l| !l.contains('█')));
}
