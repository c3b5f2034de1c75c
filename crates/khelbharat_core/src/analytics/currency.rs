//! Indian rupee display formatting.

/// Formats an amount with a rupee sign and Indian digit grouping.
///
/// `140000.0` → `₹1,40,000`; fractions keep at most two digits and drop
/// trailing zeros. Non-finite input renders as `₹0`.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0".to_string();
    }

    let total_cents = (amount.abs() * 100.0).round() as u64;
    let whole = total_cents / 100;
    let cents = total_cents % 100;

    let mut formatted = String::new();
    if amount < 0.0 && total_cents > 0 {
        formatted.push('-');
    }
    formatted.push('₹');
    formatted.push_str(&group_indian(whole));
    match cents {
        0 => {}
        c if c % 10 == 0 => formatted.push_str(&format!(".{}", c / 10)),
        c => formatted.push_str(&format!(".{c:02}")),
    }
    formatted
}

/// Groups the last three digits, then every two digits leftwards.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
