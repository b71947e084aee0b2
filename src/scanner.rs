//! Token scanner - orchestrates a full scan
//!
//! Pipeline: validate, classify, short-circuit non-contracts, then fan the
//! nine checks plus market and logo fetches out over a JoinSet and fan the
//! results back in under an overall deadline. Each spawned check carries its
//! own timeout so one slow RPC cannot eat the budget; a blown deadline aborts
//! what is left and the report ships partial with UNKNOWN placeholders.

use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chain::{classifier, ChainClient};
use crate::chain::metadata;
use crate::checks::{self, honeypot::ConservativeDetector, honeypot::HoneypotDetector, CheckContext};
use crate::market::ExternalDataAggregator;
use crate::market::logo::generate_placeholder;
use crate::models::errors::{ScanError, ScanResult};
use crate::models::{
    AccountSummary, AddressClassification, LogoResult, MarketSnapshot, RiskTier,
    SafetyCheckOutcome, ScannerConfig, TokenMetadata, TokenRiskReport,
};
use crate::registry::{SeiTokenRegistry, TokenRegistry};
use crate::scoring;
use crate::utils::cache::ReportCache;

const CHECK_COUNT: usize = checks::ALL_CHECKS.len();

/// One unit of fan-in: which slot a finished task fills.
enum TaskOutput {
    Check(usize, SafetyCheckOutcome),
    Market(MarketSnapshot),
    Logo(LogoResult),
}

pub struct TokenScanner {
    client: ChainClient,
    config: ScannerConfig,
    registry: Arc<dyn TokenRegistry>,
    detector: Arc<dyn HoneypotDetector>,
    aggregator: Arc<ExternalDataAggregator>,
    cache: ReportCache,
}

impl TokenScanner {
    pub fn new(config: ScannerConfig) -> ScanResult<Self> {
        let client = ChainClient::new(&config)?;
        let registry = Arc::new(SeiTokenRegistry::new(&config));
        let aggregator = Arc::new(ExternalDataAggregator::new(&config));
        let cache = ReportCache::new(config.cache_ttl_secs, config.chain_id);

        Ok(Self {
            client,
            config,
            registry,
            detector: Arc::new(ConservativeDetector),
            aggregator,
            cache,
        })
    }

    /// Swap in a simulation-backed honeypot detector.
    pub fn with_detector(mut self, detector: Arc<dyn HoneypotDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn cache_stats(&self) -> crate::utils::cache::CacheStats {
        self.cache.stats()
    }

    /// Run a full scan. Only an invalid address or an unreachable chain can
    /// fail this; everything else degrades into the report. A per-call
    /// deadline overrides the configured one for this scan only.
    pub async fn scan(
        &self,
        address: &str,
        requested_by: Option<String>,
        deadline: Option<Duration>,
    ) -> ScanResult<TokenRiskReport> {
        let started = Instant::now();
        let deadline = deadline.unwrap_or(self.config.overall_deadline);
        classifier::validate_address(address)?;

        info!("🔍 Scanning {}", address);
        let classification = classifier::classify(&self.client, address).await?;

        if !classification.kind.runs_battery() {
            return self.simple_report(classification, requested_by, started).await;
        }

        // Cache key includes block height so a new block invalidates
        let block = match self.client.block_number().await {
            Ok(block) => block,
            Err(e) if e.is_fatal() => return Err(e),
            Err(_) => 0,
        };
        if let Some(cached) = self.cache.get(address, block) {
            return Ok(cached);
        }

        let token_metadata = metadata::fetch_metadata(&self.client, address).await?;
        let report = self
            .run_battery(classification, token_metadata, requested_by, started, deadline)
            .await?;

        self.cache.insert(address, block, report.clone());
        Ok(report)
    }

    /// Wallet and native-asset reports: no battery, perfect score.
    async fn simple_report(
        &self,
        classification: AddressClassification,
        requested_by: Option<String>,
        started: Instant,
    ) -> ScanResult<TokenRiskReport> {
        let account = if classification.kind == crate::models::AddressKind::Wallet {
            let balance = self.client.get_balance(&classification.address).await?;
            let tx_count = self
                .client
                .get_transaction_count(&classification.address)
                .await?;
            Some(AccountSummary {
                balance_wei: balance.to_string(),
                transaction_count: tx_count,
            })
        } else {
            None
        };

        let address = classification.address.clone();
        Ok(TokenRiskReport {
            report_id: Uuid::new_v4(),
            address,
            requested_by,
            classification,
            metadata: None,
            account,
            checks: vec![],
            market: MarketSnapshot::none(),
            logo: generate_placeholder(""),
            risk_score: 100,
            risk_tier: RiskTier::Low,
            warnings: vec![],
            scanned_at: Utc::now(),
            latency_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Fan the checks plus market and logo fetches out, fan back in under
    /// the overall deadline.
    async fn run_battery(
        &self,
        classification: AddressClassification,
        token_metadata: TokenMetadata,
        requested_by: Option<String>,
        started: Instant,
        overall_deadline: Duration,
    ) -> ScanResult<TokenRiskReport> {
        let ctx = CheckContext {
            address: classification.address.clone(),
            metadata: Some(token_metadata.clone()),
            config: self.config.clone(),
        };

        let mut set: JoinSet<TaskOutput> = JoinSet::new();

        for (slot, name) in checks::ALL_CHECKS.iter().enumerate() {
            let client = self.client.clone();
            let registry = Arc::clone(&self.registry);
            let detector = Arc::clone(&self.detector);
            let ctx = ctx.clone();
            let name = *name;
            let timeout = self.config.check_timeout;

            set.spawn(async move {
                let run = run_check(name, &client, registry.as_ref(), detector.as_ref(), &ctx);
                let outcome = match tokio::time::timeout(timeout, run).await {
                    Ok(outcome) => outcome,
                    Err(_) => SafetyCheckOutcome::unknown(name, "check timed out"),
                };
                TaskOutput::Check(slot, outcome)
            });
        }

        let aggregator = Arc::clone(&self.aggregator);
        let market_address = classification.address.clone();
        set.spawn(async move { TaskOutput::Market(aggregator.market_snapshot(&market_address).await) });

        let aggregator = Arc::clone(&self.aggregator);
        let logo_address = classification.address.clone();
        let symbol = token_metadata.symbol.clone();
        set.spawn(async move { TaskOutput::Logo(aggregator.token_logo(&logo_address, &symbol).await) });

        let deadline = tokio::time::Instant::now() + overall_deadline;
        let mut check_slots: Vec<Option<SafetyCheckOutcome>> = vec![None; CHECK_COUNT];
        let mut market: Option<MarketSnapshot> = None;
        let mut logo: Option<LogoResult> = None;
        let mut deadline_blown = false;

        loop {
            let joined = match tokio::time::timeout_at(deadline, set.join_next()).await {
                Ok(Some(joined)) => joined,
                Ok(None) => break,
                Err(_) => {
                    warn!("⏱️ Scan deadline exceeded for {}", classification.address);
                    set.abort_all();
                    deadline_blown = true;
                    break;
                }
            };

            match joined {
                Ok(TaskOutput::Check(slot, outcome)) => check_slots[slot] = Some(outcome),
                Ok(TaskOutput::Market(snapshot)) => market = Some(snapshot),
                Ok(TaskOutput::Logo(result)) => logo = Some(result),
                Err(e) => warn!("⚠️ Scan task panicked: {}", e),
            }
        }

        // Unfilled slots carry the deadline error code so the report shows
        // WHY the check never settled
        let reason = if deadline_blown {
            ScanError::deadline_exceeded("scan deadline exceeded").to_string()
        } else {
            "check task failed".to_string()
        };
        let checks_out: Vec<SafetyCheckOutcome> = check_slots
            .into_iter()
            .enumerate()
            .map(|(slot, outcome)| {
                outcome.unwrap_or_else(|| {
                    SafetyCheckOutcome::unknown(checks::ALL_CHECKS[slot], reason.clone())
                })
            })
            .collect();

        let verdict = scoring::score(&checks_out);
        let warnings = scoring::collect_warnings(&checks_out);
        let address = classification.address.clone();

        let report = TokenRiskReport {
            report_id: Uuid::new_v4(),
            address,
            requested_by,
            classification,
            metadata: Some(token_metadata.clone()),
            account: None,
            checks: checks_out,
            market: market.unwrap_or_else(MarketSnapshot::none),
            logo: logo.unwrap_or_else(|| generate_placeholder(&token_metadata.symbol)),
            risk_score: verdict.score,
            risk_tier: verdict.tier,
            warnings,
            scanned_at: Utc::now(),
            latency_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            "✅ Scan of {} complete: score {} ({}) in {}ms",
            report.address,
            report.risk_score,
            report.risk_tier.as_str(),
            report.latency_ms
        );
        Ok(report)
    }
}

async fn run_check(
    name: &'static str,
    client: &ChainClient,
    registry: &dyn TokenRegistry,
    detector: &dyn HoneypotDetector,
    ctx: &CheckContext,
) -> SafetyCheckOutcome {
    match name {
        checks::CHECK_SUPPLY => checks::supply::run(client, ctx).await,
        checks::CHECK_OWNERSHIP => checks::ownership::run(client, ctx).await,
        checks::CHECK_LIQUIDITY => checks::liquidity::run(client, ctx).await,
        checks::CHECK_HONEYPOT => checks::honeypot::run(detector, ctx).await,
        checks::CHECK_BLACKLIST => checks::blacklist::run(client, ctx).await,
        checks::CHECK_TRANSFER => checks::transfer::run(client, ctx).await,
        checks::CHECK_FEES => checks::fees::run(client, ctx).await,
        checks::CHECK_HOLDERS => checks::holders::run(registry, ctx).await,
        checks::CHECK_VERIFICATION => checks::verification::run(registry, ctx).await,
        other => SafetyCheckOutcome::unknown(other.to_string(), "unknown check"),
    }
}
