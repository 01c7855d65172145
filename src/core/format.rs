//! Display formatting helpers.

/// Formats a rupee amount rounded to the nearest whole rupee with Indian
/// digit grouping: `123456.7` becomes `₹1,23,457`.
///
/// Indian grouping places the first separator after three digits and
/// subsequent separators every two digits (thousand, lakh, crore).
#[must_use]
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_indian(&digits);
    if rounded < 0.0 {
        format!("-\u{20b9}{grouped}")
    } else {
        format!("\u{20b9}{grouped}")
    }
}

/// Inserts Indian-system separators into a plain digit string.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let reversed: Vec<char> = head.chars().rev().collect();
    let mut parts: Vec<String> = reversed
        .chunks(2)
        .map(|chunk| chunk.iter().rev().collect())
        .collect();
    parts.reverse();

    format!("{},{tail}", parts.join(","))
}

/// Derives the style key for an impact category: lowercased with spaces
/// hyphenated (`"High Impact"` -> `"high-impact"`).
///
/// The key selects the badge style and doubles as the badge's style
/// identity, so the mapping must stay stable across the table rows and
/// the badge itself.
#[must_use]
pub fn impact_style_key(category: &str) -> String {
    category.to_lowercase().replace(' ', "-")
}
