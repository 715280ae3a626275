use crate::types::ExtractedIndicators;

const UNAVAILABLE: &str = "N/A";

/// Plain-text rendering of the indicators, laid out like the dashboard:
/// technical analysis first, then the trade view.
pub fn render_report(indicators: &ExtractedIndicators) -> String {
    let mut report = String::new();

    report.push_str("Technical Analysis\n");
    report.push_str(&format!("  Trend:          {}\n", indicators.trend));
    report.push_str(&format!("  Strength:       {}\n", indicators.strength));
    report.push_str(&format!("  Support:        {}\n", format_level(indicators.support)));
    report.push_str(&format!("  Resistance:     {}\n", format_level(indicators.resistance)));
    report.push('\n');
    report.push_str("Trade Analysis\n");
    report.push_str(&format!("  Direction:      {}\n", indicators.direction));
    report.push_str(&format!("  Confidence:     {}%\n", indicators.confidence));
    report.push_str(&format!("  Buy Signal:     {}%\n", indicators.signals.buy));
    report.push_str(&format!("  Sell Signal:    {}%\n", indicators.signals.sell));
    report.push_str(&format!("  Neutral Signal: {}%\n", indicators.signals.neutral));
    report.push_str(&format!(
        "  Risk Factors:   {}\n",
        indicators.risk_factor.as_deref().unwrap_or(UNAVAILABLE)
    ));

    report
}

fn format_level(level: Option<f64>) -> String {
    match level {
        Some(value) => value.to_string(),
        None => UNAVAILABLE.to_string(),
    }
}
