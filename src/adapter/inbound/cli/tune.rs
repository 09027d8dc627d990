//! Handler for the `tune` command.

use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tabled::{Table, Tabled};
use tracing::info;

use crate::adapter::inbound::cli::command::TuneArgs;
use crate::adapter::inbound::cli::output;
use crate::application::tuning::{Annealing, Objective, RandomSearch, TuningOutcome};
use crate::domain::{Algorithm, WeightVector};
use crate::error::Result;
use crate::infrastructure::config::{Settings, TuningSettings};
use crate::port::{LogObserver, ObserverRegistry, TuningEvent, TuningObserver};

/// Drives a terminal progress bar from tuning events.
struct ProgressObserver {
    bar: ProgressBar,
}

impl TuningObserver for ProgressObserver {
    fn observe(&self, event: TuningEvent) {
        match event {
            TuningEvent::Started { iterations, .. } => {
                self.bar.set_length(iterations as u64);
            }
            TuningEvent::Improved { objective, .. } => {
                self.bar.set_message(format!("best {objective:.2}"));
            }
            TuningEvent::Progress { iteration, .. } => {
                self.bar.set_position(iteration as u64);
            }
            TuningEvent::Finished { .. } => self.bar.finish_and_clear(),
        }
    }
}

#[derive(Tabled)]
struct WeightRow {
    #[tabled(rename = "Dimension")]
    dimension: &'static str,
    #[tabled(rename = "Baseline")]
    baseline: String,
    #[tabled(rename = "Tuned")]
    tuned: String,
}

fn weight_rows(baseline: &WeightVector, tuned: &WeightVector) -> Vec<WeightRow> {
    const NAMES: [&str; 5] = [
        "profit_target_proximity",
        "competitiveness",
        "spread_utility",
        "volatility_safety",
        "ma_reversion_safety",
    ];
    NAMES
        .iter()
        .zip(baseline.as_array().iter().zip(tuned.as_array()))
        .map(|(name, (base, tuned))| WeightRow {
            dimension: *name,
            baseline: format!("{base:.4}"),
            tuned: format!("{tuned:.4}"),
        })
        .collect()
}

/// Fold command-line overrides into the `[tuning]` table.
fn merge_overrides(mut tuning: TuningSettings, args: &TuneArgs) -> TuningSettings {
    if let Some(algorithm) = args.algorithm {
        tuning.algorithm = algorithm;
    }
    if args.iterations.is_some() {
        tuning.iterations = args.iterations;
    }
    if args.seed.is_some() {
        tuning.seed = args.seed;
    }
    if args.deadline_secs.is_some() {
        tuning.deadline_secs = args.deadline_secs;
    }
    tuning
}

/// Execute `tune`.
pub fn execute(args: &TuneArgs) -> Result<()> {
    let settings = Settings::load(&args.config)?;
    settings.init_logging(output::current().log_level());

    let tuning = merge_overrides(settings.tuning.clone(), args);
    tuning.validate()?;

    let objective = Objective::new(
        settings.pricing_config(),
        tuning.scenarios.clone(),
        tuning.targets.clone(),
    )?;

    let algorithm = tuning.algorithm;
    let budget = tuning.budget(algorithm);
    let seed = tuning.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    info!(%algorithm, seed, scenarios = objective.scenarios().len(), "Starting weight tuning");

    let bar = output::progress_bar(budget.iterations as u64);
    let mut observers = ObserverRegistry::new();
    observers.register(Box::new(LogObserver));
    observers.register(Box::new(ProgressObserver { bar: bar.clone() }));

    let outcome = match algorithm {
        Algorithm::Random => RandomSearch::new(tuning.random_search_config()).run(
            &objective,
            budget,
            &mut rng,
            &observers,
        )?,
        Algorithm::Annealing => Annealing::new(tuning.annealing_config()).run(
            &objective,
            budget,
            &mut rng,
            &observers,
        )?,
    };
    bar.finish_and_clear();

    if output::is_json() {
        output::json_output(json!({
            "command": "tune",
            "seed": seed,
            "scenarios": objective.scenarios().len(),
            "outcome": outcome,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        let w = outcome.best_weights;
        println!(
            "{} {} {} {} {}",
            w.profit_target_proximity,
            w.competitiveness,
            w.spread_utility,
            w.volatility_safety,
            w.ma_reversion_safety
        );
        return Ok(());
    }

    render(&outcome, &objective.base_weights(), seed);
    Ok(())
}

fn render(outcome: &TuningOutcome, baseline: &WeightVector, seed: u64) {
    output::header(env!("CARGO_PKG_VERSION"));

    output::section("Tuning");
    output::field("Algorithm", outcome.algorithm);
    output::field("Seed", seed);
    output::field("Iterations", outcome.iterations);
    output::field("Accepted", outcome.accepted_moves);
    if outcome.stopped_early {
        output::warning("deadline reached before the iteration budget was spent");
    }

    output::section("Objective");
    output::field("Baseline", format!("{:.4}", outcome.baseline_objective));
    output::field("Best", format!("{:.4}", outcome.best_objective));
    let improvement = format!("{:.2}%", outcome.percent_improvement);
    if outcome.percent_improvement > 0.0 {
        output::field("Improvement", output::positive(improvement));
    } else {
        output::field("Improvement", output::muted(improvement));
    }

    output::section("Weights");
    output::lines(&Table::new(weight_rows(baseline, &outcome.best_weights)).to_string());

    if outcome.percent_improvement > 0.0 {
        let w = &outcome.best_weights;
        output::hint("apply the tuned weights in your settings file:");
        output::lines(&format!(
            "[pricing.weights]\n\
             profit_target_proximity = {:.4}\n\
             competitiveness = {:.4}\n\
             spread_utility = {:.4}\n\
             volatility_safety = {:.4}\n\
             ma_reversion_safety = {:.4}",
            w.profit_target_proximity,
            w.competitiveness,
            w.spread_utility,
            w.volatility_safety,
            w.ma_reversion_safety
        ));
    } else {
        output::success("baseline weights are already optimal for these scenarios");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> TuneArgs {
        TuneArgs {
            config: PathBuf::from("karat.toml"),
            algorithm: None,
            iterations: None,
            seed: None,
            deadline_secs: None,
        }
    }

    #[test]
    fn test_merge_keeps_settings_without_flags() {
        let tuning = TuningSettings {
            seed: Some(3),
            iterations: Some(10),
            ..TuningSettings::default()
        };
        let merged = merge_overrides(tuning.clone(), &args());
        assert_eq!(merged, tuning);
    }

    #[test]
    fn test_merge_flags_win() {
        let tuning = TuningSettings {
            seed: Some(3),
            ..TuningSettings::default()
        };
        let merged = merge_overrides(
            tuning,
            &TuneArgs {
                algorithm: Some(Algorithm::Annealing),
                seed: Some(9),
                deadline_secs: Some(5),
                ..args()
            },
        );
        assert_eq!(merged.algorithm, Algorithm::Annealing);
        assert_eq!(merged.seed, Some(9));
        assert_eq!(merged.deadline_secs, Some(5));
    }

    #[test]
    fn test_weight_rows_cover_every_dimension() {
        let rows = weight_rows(&WeightVector::default(), &WeightVector::default());
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].baseline, "0.5000");
    }
}
