//! Pricing engine orchestrator.
//!
//! One synchronous call wires generation, scoring, selection and safety
//! classification together. The engine holds only its base configuration,
//! so a single instance can be shared across threads.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{PricingConfig, PricingOverrides};
use super::generator::generate;
use super::result::{PricingResult, ResultMeta};
use super::safety::classify;
use super::scorer::score_all;
use super::selector::select;
use crate::domain::{MarketContext, RunStatus, SafetyStatus};
use crate::error::{InputError, Result};

/// Reference prices, optional settlement history and per-call overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    #[serde(rename = "sourceReferencePrice")]
    pub source_price: Decimal,
    #[serde(rename = "settlementReferencePrice")]
    pub settlement_price: Decimal,
    /// Settlement prices, oldest first.
    #[serde(rename = "historicalSettlementPrices", default)]
    pub history: Vec<Decimal>,
    #[serde(rename = "configOverrides", default)]
    pub overrides: PricingOverrides,
}

impl PricingRequest {
    #[must_use]
    pub fn new(source_price: Decimal, settlement_price: Decimal) -> Self {
        Self {
            source_price,
            settlement_price,
            history: Vec::new(),
            overrides: PricingOverrides::default(),
        }
    }

    #[must_use]
    pub fn with_history(mut self, history: Vec<Decimal>) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: PricingOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    fn validate(&self) -> std::result::Result<(), InputError> {
        if self.settlement_price <= Decimal::ZERO {
            return Err(InputError::NonPositivePrice {
                field: "settlement_price",
                value: self.settlement_price,
            });
        }
        if let Some(point) = self.history.iter().find(|p| **p <= Decimal::ZERO) {
            return Err(InputError::NonPositivePrice {
                field: "history",
                value: *point,
            });
        }
        Ok(())
    }
}

/// Deterministic pricing pipeline over a base configuration.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    #[must_use]
    pub const fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Base configuration that request overrides are merged onto.
    #[must_use]
    pub const fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Price one request.
    ///
    /// An infeasible market (including a non-positive source price) is a
    /// `NO_VALID_CANDIDATES` result, not an error.
    ///
    /// # Errors
    ///
    /// Returns a config error when the merged configuration is invalid, and
    /// an input error for a non-positive settlement price or history point
    /// or for prices whose lot value overflows `Decimal`.
    pub fn run(&self, request: &PricingRequest) -> Result<PricingResult> {
        let started = Instant::now();

        let config = self.config.with_overrides(&request.overrides);
        config.validate()?;
        request.validate()?;

        let context = MarketContext::new(
            request.source_price,
            request.settlement_price,
            &request.history,
        );
        let set = generate(context.source_price(), context.settlement_price(), &config)?;

        let volatility_used = context.volatility();
        let ma_used = context.moving_average();

        if set.is_empty() {
            debug!(
                source = %request.source_price,
                settlement = %request.settlement_price,
                "no feasible candidates"
            );
            return Ok(PricingResult {
                optimal: None,
                alternatives: Vec::new(),
                meta: ResultMeta {
                    candidate_count: 0,
                    status: RunStatus::NoValidCandidates,
                    volatility_used,
                    ma_used,
                    safety_status: SafetyStatus::NoSolution,
                    warnings: Vec::new(),
                    timestamp: Utc::now(),
                    elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
                    config,
                    rejections: set.rejections,
                },
            });
        }

        let scored = score_all(&set.candidates, &context, &config);
        let selection = select(&scored, config.top_n_alternatives);
        let assessment = classify(selection.optimal.as_ref(), volatility_used, ma_used, &config);

        if let Some(optimal) = &selection.optimal {
            debug!(
                buy = %optimal.candidate().buy_price(),
                sell = %optimal.candidate().sell_price(),
                margin = %optimal.candidate().margin(),
                total = optimal.total(),
                candidates = set.len(),
                safety = %assessment.status,
                "selected optimal candidate"
            );
        }

        Ok(PricingResult {
            optimal: selection.optimal,
            alternatives: selection.alternatives,
            meta: ResultMeta {
                candidate_count: set.len(),
                status: selection.status,
                volatility_used,
                ma_used,
                safety_status: assessment.status,
                warnings: assessment.warnings,
                timestamp: Utc::now(),
                elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
                config,
                rejections: set.rejections,
            },
        })
    }
}
