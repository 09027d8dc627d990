//! Handler for the `quote` command.

use rust_decimal::Decimal;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::QuoteArgs;
use crate::adapter::inbound::cli::output;
use crate::application::pricing::{
    PricingEngine, PricingOverrides, PricingRequest, PricingResult, RejectionStats,
};
use crate::domain::{SafetyStatus, ScoredCandidate};
use crate::error::Result;
use crate::infrastructure::config::Settings;

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Buy")]
    buy: Decimal,
    #[tabled(rename = "Sell")]
    sell: Decimal,
    #[tabled(rename = "Spread")]
    spread: Decimal,
    #[tabled(rename = "Margin")]
    margin: Decimal,
    #[tabled(rename = "Score")]
    score: String,
}

impl CandidateRow {
    fn new(rank: usize, scored: &ScoredCandidate) -> Self {
        let candidate = scored.candidate();
        Self {
            rank,
            buy: candidate.buy_price(),
            sell: candidate.sell_price(),
            spread: candidate.spread(),
            margin: candidate.margin(),
            score: format!("{:.2}", scored.total()),
        }
    }
}

/// Execute `quote`.
pub fn execute(args: &QuoteArgs) -> Result<()> {
    let settings = Settings::load_or_default(args.config.as_deref())?;
    settings.init_logging(output::current().log_level());

    let engine = PricingEngine::new(settings.pricing_config());
    let request = PricingRequest::new(args.source, args.settlement)
        .with_history(args.history.clone())
        .with_overrides(PricingOverrides {
            top_n_alternatives: args.top,
            ..PricingOverrides::default()
        });
    let result = engine.run(&request)?;

    if output::is_json() {
        output::json_output(serde_json::to_value(&result)?);
        return Ok(());
    }
    if output::is_quiet() {
        if let Some(optimal) = &result.optimal {
            let candidate = optimal.candidate();
            println!("{} {}", candidate.buy_price(), candidate.sell_price());
        }
        return Ok(());
    }

    render(&result);
    Ok(())
}

fn render(result: &PricingResult) {
    let meta = &result.meta;
    output::header(env!("CARGO_PKG_VERSION"));

    output::section("Market");
    output::field("Source grade", meta.config.source_grade);
    output::field("Settlement", meta.config.settlement_grade);
    output::field("Volatility", format_optional(meta.volatility_used));
    output::field("Moving avg", format_optional(meta.ma_used));

    let Some(optimal) = &result.optimal else {
        output::section("Recommendation");
        output::warning("no candidate satisfies the pricing constraints");
        render_rejections(&meta.rejections);
        output::hint("widen the spread or discount window, or lower margin_min");
        return;
    };

    let candidate = optimal.candidate();
    output::section("Recommendation");
    output::field("Buy", output::positive(candidate.buy_price()));
    output::field("Sell", output::positive(candidate.sell_price()));
    output::field("Spread", candidate.spread());
    output::field("Discount", candidate.discount_from_public());
    output::field("Buy discount", candidate.buy_discount());
    output::field("Margin", candidate.margin());
    output::field("Score", format!("{:.2}", optimal.total()));

    output::section("Score breakdown");
    let breakdown = optimal.breakdown();
    output::field("Profit target", format!("{:.2}", breakdown.profit_target_proximity));
    output::field("Competitive", format!("{:.2}", breakdown.competitiveness));
    output::field("Spread", format!("{:.2}", breakdown.spread_utility));
    output::field("Volatility", format!("{:.2}", breakdown.volatility_safety));
    output::field("MA reversion", format!("{:.2}", breakdown.ma_reversion_safety));

    output::section("Safety");
    let status = match meta.safety_status {
        SafetyStatus::Safe => output::positive(meta.safety_status),
        SafetyStatus::Caution => output::caution(meta.safety_status),
        SafetyStatus::Warning | SafetyStatus::NoSolution => output::negative(meta.safety_status),
    };
    output::field("Status", status);
    for warning in &meta.warnings {
        output::warning(&warning.to_string());
    }

    if !result.alternatives.is_empty() {
        output::section("Alternatives");
        let rows: Vec<CandidateRow> = result
            .alternatives
            .iter()
            .enumerate()
            .map(|(i, scored)| CandidateRow::new(i + 1, scored))
            .collect();
        output::lines(&Table::new(rows).to_string());
    }

    output::section("Search");
    output::field("Candidates", meta.candidate_count);
    render_rejections(&meta.rejections);
    output::field("Elapsed", format!("{:.2} ms", meta.elapsed_ms));
}

fn render_rejections(rejections: &RejectionStats) {
    output::field("Evaluated", rejections.evaluated);
    output::field("Rejected", rejections.rejected());
    if rejections.rejected() > 0 {
        output::note(&format!(
            "discount {} / ordering {} / margin {}",
            rejections.discount, rejections.ordering, rejections.margin
        ));
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| output::muted("n/a"), |v| format!("{v:.0}"))
}
