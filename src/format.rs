//! 결과 표시용 숫자 서식과 텍스트 막대그래프.

/// 숫자 표기 방식. 독일식은 천 단위 `.`, 소수점 `,`을 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    German,
    English,
}

impl NumberStyle {
    fn group_separator(self) -> char {
        match self {
            NumberStyle::German => '.',
            NumberStyle::English => ',',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            NumberStyle::German => ',',
            NumberStyle::English => '.',
        }
    }
}

/// 정수로 반올림한 뒤 천 단위 구분자를 넣는다. 예: 900000 → "900.000"
pub fn format_thousands(value: f64, style: NumberStyle) -> String {
    format_grouped(value, 0, style)
}

/// 소수 `digits`자리까지 표시하고 정수부는 천 단위로 묶는다.
pub fn format_grouped(value: f64, digits: usize, style: NumberStyle) -> String {
    let raw = format!("{:.*}", digits, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(raw.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(style.group_separator());
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push(style.decimal_separator());
        grouped.push_str(frac);
    }

    let is_zero = raw.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

/// 소수 `digits`자리 표기 (천 단위 구분 없음). 예: 53.888, 1 → "53,9"
pub fn format_decimal(value: f64, digits: usize, style: NumberStyle) -> String {
    let raw = format!("{:.*}", digits, value);
    match style {
        NumberStyle::German => raw.replace('.', ","),
        NumberStyle::English => raw,
    }
}

/// 라벨과 값 목록을 가로 막대그래프 줄로 그린다. 가장 큰 값이 `width` 칸을 채운다.
pub fn bar_chart(rows: &[(&str, f64)], width: usize, style: NumberStyle) -> Vec<String> {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    rows.iter()
        .map(|(label, value)| {
            let len = if max > 0.0 {
                ((value.max(0.0) / max) * width as f64).round() as usize
            } else {
                0
            };
            format!(
                "{label:<label_width$} | {bar} {num}",
                bar = "█".repeat(len),
                num = format_thousands(*value, style),
            )
        })
        .collect()
}
