use crate::poller::DashboardState;

/// Whole units with `,` grouping, e.g. `97,123`.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Market cap in trillions, e.g. `$1.92T`.
pub fn format_market_cap(value: f64) -> String {
    format!("${:.2}T", value / 1e12)
}

pub fn format_change(change_24h: f64) -> String {
    let sign = if change_24h >= 0.0 { "+" } else { "" };
    format!("{sign}{change_24h:.2}%")
}

/// One status line per refresh.
pub fn render(state: &DashboardState) -> String {
    let price = &state.price;
    let snapshot = &price.snapshot;
    format!(
        "[{}] BTC ${} ({} 24h) | €{} | £{} | cap {} | {} | sentiment {} ({}) | \"{}\"",
        state.last_update.format("%H:%M:%S"),
        format_amount(snapshot.usd),
        format_change(snapshot.change_24h),
        format_amount(snapshot.eur),
        format_amount(snapshot.gbp),
        format_market_cap(snapshot.market_cap),
        if price.cached { "cached" } else { "live" },
        state.sentiment.sentiment,
        state.sentiment.index,
        state.wisdom.rule,
    )
}
