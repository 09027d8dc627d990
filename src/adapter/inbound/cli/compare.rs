//! Handler for the `compare` command.

use rust_decimal::Decimal;
use serde_json::json;

use crate::adapter::inbound::cli::command::CompareArgs;
use crate::adapter::inbound::cli::output;
use crate::application::comparison::{compare, resolve_display_code, Comparison, InternalQuote};
use crate::domain::Grade;
use crate::error::Result;
use crate::infrastructure::config::Settings;

/// Execute `compare`.
pub fn execute(args: &CompareArgs) -> Result<()> {
    let settings = Settings::load_or_default(args.config.as_deref())?;
    settings.init_logging(output::current().log_level());
    let settlement_grade = settings.pricing_config().settlement_grade;

    let display_code = resolve_display_code(&args.grade)?;
    let quote = InternalQuote {
        name: args.name.clone().unwrap_or_else(|| args.grade.clone()),
        display_code,
        buy_price: args.buy,
        sell_price: args.sell,
    };
    let comparison = compare(&quote, args.settlement, settlement_grade)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "compare",
            "comparison": comparison,
        }));
        return Ok(());
    }

    let Some(comparison) = comparison else {
        output::warning("quote has no buy or sell price to compare");
        return Ok(());
    };
    if output::is_quiet() {
        println!("{:.2} {:.2}", comparison.buy_percent, comparison.sell_percent);
        return Ok(());
    }

    render(&comparison, settlement_grade);
    Ok(())
}

fn render(comparison: &Comparison, settlement_grade: Grade) {
    output::header(env!("CARGO_PKG_VERSION"));

    output::section(&comparison.name);
    output::field("Display code", comparison.display_code);
    output::field("Grade", output::highlight(comparison.grade));
    output::field("Purity", format!("{:.1}%", comparison.purity_percent));
    output::field(
        "Reference",
        format!("{} ({settlement_grade})", comparison.reference_price),
    );

    if comparison.original_buy > Decimal::ZERO {
        output::section("Buy");
        output::field("Quoted", comparison.original_buy);
        output::field("Equivalent", comparison.converted_buy.round_dp(0));
        output::field(
            "Difference",
            signed(comparison.buy_diff.round_dp(0), comparison.buy_percent),
        );
    }
    if comparison.original_sell > Decimal::ZERO {
        output::section("Sell");
        output::field("Quoted", comparison.original_sell);
        output::field("Equivalent", comparison.converted_sell.round_dp(0));
        output::field(
            "Difference",
            signed(comparison.sell_diff.round_dp(0), comparison.sell_percent),
        );
    }
}

fn signed(diff: Decimal, percent: f64) -> String {
    let text = format!("{diff} ({percent:+.2}%)");
    if diff.is_sign_negative() {
        output::negative(text)
    } else {
        output::positive(text)
    }
}
