//! Annually rebalanced portfolio simulation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use jerez_data::{TimeSeriesStore, Universe};
use jerez_metrics::lookup::{market_cap_at, revenue_at};
use jerez_metrics::{MetricEvaluator, Snapshot};
use jerez_traits::{AlignmentConfig, JerezError, Metric, Result, Symbol};

use crate::weights::{WeightingPolicy, derive_weights, normalize};

/// Scheme name of the metric-weighted portfolio.
pub const METRIC_WEIGHTED: &str = "metric_weighted";
/// Scheme name of the static revenue-weighted benchmark.
pub const REVENUE_WEIGHTED: &str = "revenue_weighted";

/// Backtest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// First year of the horizon; portfolios are formed here.
    pub start_year: i32,
    /// Last year of the horizon, inclusive.
    pub end_year: i32,
    /// Weighting policy for the metric-weighted scheme.
    pub weighting: WeightingPolicy,
    /// Fiscal period alignment policy for all lookups.
    pub alignment: AlignmentConfig,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            start_year: 2015,
            end_year: 2024,
            weighting: WeightingPolicy::ProportionalToRank,
            alignment: AlignmentConfig::default(),
        }
    }
}

impl BacktestConfig {
    /// Validates the configuration before any computation starts.
    ///
    /// # Errors
    ///
    /// Returns [`JerezError::Config`] when the year range is empty.
    pub fn validate(&self) -> Result<()> {
        if self.start_year >= self.end_year {
            return Err(JerezError::Config(format!(
                "backtest needs at least two years, got {}..={}",
                self.start_year, self.end_year
            )));
        }
        Ok(())
    }
}

/// Which tickers a scheme held and dropped in one year.
#[derive(Debug, Clone, Serialize)]
pub struct YearMembership {
    /// Calendar year.
    pub year: i32,
    /// Constituents held after this year's rebalance.
    pub held: Vec<Symbol>,
    /// Constituents dropped at this year's rebalance. Dropped tickers
    /// never re-enter.
    pub dropped: Vec<Symbol>,
}

/// Full result of one backtest run.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestReport {
    /// NAV series per scheme, starting at 1.0 in the start year.
    pub navs: BTreeMap<String, Vec<(i32, f64)>>,
    /// Metric-weighted constituent history, one entry per year.
    pub membership: Vec<YearMembership>,
    /// Metric-weighted weight vector per rebalance year.
    pub metric_weight_history: Vec<(i32, BTreeMap<Symbol, f64>)>,
    /// The benchmark's weights, fixed at the start year for the whole run.
    pub revenue_weights: BTreeMap<Symbol, f64>,
}

impl BacktestReport {
    /// Annualized return of a scheme over the full horizon.
    #[must_use]
    pub fn annualized_return(&self, scheme: &str) -> Option<f64> {
        let series = self.navs.get(scheme)?;
        let &(first_year, first_nav) = series.first()?;
        let &(last_year, last_nav) = series.last()?;
        let years = f64::from(last_year - first_year);
        (years > 0.0 && first_nav > 0.0).then(|| (last_nav / first_nav).powf(1.0 / years) - 1.0)
    }
}

/// Drives the yearly rebalancing loop.
///
/// The year loop is strictly sequential, since each year's weights depend
/// on the previous year's survivor set. Metric recomputation within a year
/// fans out across tickers through the evaluator.
#[derive(Debug)]
pub struct RebalancingSimulator {
    config: BacktestConfig,
    evaluator: MetricEvaluator,
}

impl RebalancingSimulator {
    /// Creates a simulator after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`JerezError::Config`] for an empty year range.
    pub fn new(config: BacktestConfig) -> Result<Self> {
        config.validate()?;
        let evaluator = MetricEvaluator::new(config.alignment);
        Ok(Self { config, evaluator })
    }

    /// Creates a simulator sharing an existing evaluator (and its cache).
    ///
    /// # Errors
    ///
    /// Returns [`JerezError::Config`] for an empty year range.
    pub fn with_evaluator(config: BacktestConfig, evaluator: MetricEvaluator) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, evaluator })
    }

    /// Runs the backtest for one metric over a universe.
    ///
    /// Tickers need an available metric, a positive market cap and positive
    /// revenue at the start year to enter; everything else is excluded up
    /// front, which is not an error. A year in which every constituent has
    /// lost the metric freezes the metric-weighted scheme's NAV rather than
    /// raising.
    ///
    /// # Errors
    ///
    /// Returns [`JerezError::Config`] when the universe resolves to nothing.
    pub fn run(
        &self,
        metric: &dyn Metric,
        store: &TimeSeriesStore,
        universe: &Universe,
    ) -> Result<BacktestReport> {
        let symbols = universe.resolve(store)?;
        let start = self.config.start_year;

        // Initialization: qualify tickers and form both portfolios.
        let initial_snapshot = self.evaluator.snapshot(metric, store, &symbols, start);
        let mut constituents: Vec<Symbol> = Vec::new();
        let mut last_caps: BTreeMap<Symbol, f64> = BTreeMap::new();
        let mut initial_revenues: BTreeMap<Symbol, f64> = BTreeMap::new();

        for symbol in &symbols {
            let Some(record) = store.get(symbol) else {
                continue;
            };
            let has_metric = initial_snapshot
                .get(symbol)
                .copied()
                .flatten()
                .is_some_and(f64::is_finite);
            let cap = market_cap_at(record, start, self.config.alignment);
            let revenue = revenue_at(record, start, self.config.alignment);
            if let (true, Some(cap), Some(revenue)) = (has_metric, cap, revenue) {
                constituents.push(symbol.clone());
                last_caps.insert(symbol.clone(), cap);
                initial_revenues.insert(symbol.clone(), revenue);
            }
        }

        debug!(
            year = start,
            qualified = constituents.len(),
            universe = symbols.len(),
            "formed initial portfolios"
        );

        let member_snapshot: Snapshot = constituents
            .iter()
            .map(|s| (s.clone(), initial_snapshot.get(s).copied().flatten()))
            .collect();
        let mut metric_weights =
            derive_weights(self.config.weighting, metric.direction(), &member_snapshot);
        let revenue_weights = normalize(initial_revenues);

        let mut metric_nav = vec![(start, 1.0)];
        let mut revenue_nav = vec![(start, 1.0)];
        let mut membership = vec![YearMembership {
            year: start,
            held: constituents.clone(),
            dropped: Vec::new(),
        }];
        let mut metric_weight_history = vec![(start, metric_weights.clone())];
        let initial_constituents = constituents.clone();
        let mut survivors = constituents;

        for year in (start + 1)..=self.config.end_year {
            // NAV update with the weight vectors active since last year.
            let mut factors: BTreeMap<Symbol, f64> = BTreeMap::new();
            for symbol in &initial_constituents {
                let current = store
                    .get(symbol)
                    .and_then(|r| market_cap_at(r, year, self.config.alignment));
                // A missing market cap holds that slice of capital flat for
                // the year instead of compounding an undefined return.
                let factor = match (last_caps.get(symbol), current) {
                    (Some(&previous), Some(cap)) => cap / previous,
                    _ => 1.0,
                };
                factors.insert(symbol.clone(), factor);
                if let Some(cap) = current {
                    last_caps.insert(symbol.clone(), cap);
                }
            }

            let metric_growth = portfolio_growth(&metric_weights, &factors);
            let revenue_growth = portfolio_growth(&revenue_weights, &factors);
            metric_nav.push((year, metric_nav.last().expect("seeded").1 * metric_growth));
            revenue_nav.push((year, revenue_nav.last().expect("seeded").1 * revenue_growth));

            // Full rebalance of the metric-weighted scheme over survivors.
            let snapshot = self.evaluator.snapshot(metric, store, &survivors, year);
            let dropped: Vec<Symbol> = survivors
                .iter()
                .filter(|s| {
                    snapshot
                        .get(*s)
                        .copied()
                        .flatten()
                        .filter(|v| v.is_finite())
                        .is_none()
                })
                .cloned()
                .collect();
            survivors.retain(|s| !dropped.contains(s));
            metric_weights = derive_weights(self.config.weighting, metric.direction(), &snapshot);

            debug!(
                year,
                held = survivors.len(),
                dropped = dropped.len(),
                metric_growth,
                revenue_growth,
                "rebalanced"
            );

            metric_weight_history.push((year, metric_weights.clone()));
            membership.push(YearMembership {
                year,
                held: survivors.clone(),
                dropped,
            });
        }

        let mut navs = BTreeMap::new();
        navs.insert(METRIC_WEIGHTED.to_string(), metric_nav);
        navs.insert(REVENUE_WEIGHTED.to_string(), revenue_nav);

        Ok(BacktestReport {
            navs,
            membership,
            metric_weight_history,
            revenue_weights,
        })
    }
}

/// Weighted growth factor for one year; an empty weight vector freezes the
/// scheme at a factor of 1.0.
fn portfolio_growth(
    weights: &BTreeMap<Symbol, f64>,
    factors: &BTreeMap<Symbol, f64>,
) -> f64 {
    if weights.is_empty() {
        return 1.0;
    }
    weights
        .iter()
        .map(|(symbol, w)| w * factors.get(symbol).copied().unwrap_or(1.0))
        .sum()
}
