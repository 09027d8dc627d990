use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use karat::application::pricing::{PricingConfig, PricingEngine, PricingRequest, PricingResult};
use karat::application::tuning::{Objective, ObjectiveTargets, Scenario};

/// Source price used across the reference scenarios.
pub const SOURCE: Decimal = dec!(11_000_000);

/// Defaults with the margin floor removed, so rich settlement prices
/// produce many feasible candidates.
pub fn open_margin_config() -> PricingConfig {
    PricingConfig {
        margin_min: Decimal::ZERO,
        ..PricingConfig::default()
    }
}

pub fn run(config: PricingConfig, request: &PricingRequest) -> PricingResult {
    PricingEngine::new(config)
        .run(request)
        .expect("pricing run should succeed")
}

pub fn rich_request() -> PricingRequest {
    PricingRequest::new(SOURCE, dec!(17_500_000))
        .with_history(vec![dec!(17_300_000), dec!(17_400_000), dec!(17_500_000)])
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(SOURCE, dec!(17_500_000)),
        Scenario {
            name: Some("drift".into()),
            history: vec![dec!(17_600_000), dec!(17_700_000), dec!(17_800_000)],
            ..Scenario::new(dec!(11_200_000), dec!(17_800_000))
        },
    ]
}

/// A market whose lot value does not fit in a `Decimal`.
pub fn overflowing_scenario() -> Scenario {
    Scenario {
        name: Some("overflow".into()),
        ..Scenario::new(Decimal::from_i128_with_scale(10_i128.pow(28), 0), dec!(16_000_000))
    }
}

pub fn objective() -> Objective {
    Objective::new(open_margin_config(), scenarios(), ObjectiveTargets::default())
        .expect("valid objective")
}
