//! Generation driver: the bounded loop producing sessions and transactions.

use crate::catalog::{Catalog, CatalogBuilder};
use crate::generators::{geo, timestamp};
use crate::ids::IdGenerator;
use crate::inventory::InventoryLedger;
use crate::journey::{Journey, JourneySimulator};
use crate::settlement::{CheckoutOutcome, Settlement};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use synth_core::{
    ConfigError, ConversionStatus, Dataset, DeviceProfile, GenerationConfig, Referrer, Session,
    SessionGeo, User,
};
use tracing::{info, warn};

/// Inclusive range of session durations in seconds.
pub const SESSION_DURATION_RANGE: (u32, u32) = (30, 1800);

/// Chance per iteration of attempting an independent transaction.
pub const INDEPENDENT_TRANSACTION_PROBABILITY: f64 = 0.2;

const DEVICE_TYPES: &[&str] = &["mobile", "desktop", "tablet"];
const OPERATING_SYSTEMS: &[&str] = &["iOS", "Android", "Windows", "macOS"];
const BROWSERS: &[&str] = &["Chrome", "Safari", "Firefox", "Edge"];

/// Counters describing how a generation run went.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationStats {
    /// Loop iterations executed
    pub iterations: u64,

    /// The iteration ceiling stopped the loop before both targets were met
    pub ceiling_reached: bool,

    pub sessions: usize,
    pub converted_sessions: usize,
    pub session_transactions: usize,
    pub independent_transactions: usize,

    /// Converted sessions whose checkout failed to reserve a cart line
    pub aborted_checkouts: usize,

    /// Converted sessions not settled because the transaction target was met
    pub unsettled_conversions: usize,

    /// Units reserved by aborted checkouts and never returned to stock
    pub stranded_units: u64,

    pub initial_stock: u64,
    pub remaining_stock: u64,
}

impl GenerationStats {
    pub fn transactions(&self) -> usize {
        self.session_transactions + self.independent_transactions
    }
}

/// Drives catalog building, session simulation and settlement.
///
/// All randomness comes from one RNG seeded from the configuration. The
/// catalog is built first, so it depends only on the seed and the catalog
/// counts.
pub struct DataGenerator {
    config: GenerationConfig,
    rng: StdRng,
    ids: IdGenerator,
    now: DateTime<Utc>,
}

impl DataGenerator {
    /// Create a generator, rejecting invalid configurations.
    pub fn new(config: GenerationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let now = config.anchor();
        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            ids: IdGenerator::new(),
            now,
            config,
        })
    }

    /// The reference instant of this run.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Build the catalog and run the simulation loop to completion.
    pub fn generate(mut self) -> Result<(Dataset, GenerationStats), ConfigError> {
        let catalog = CatalogBuilder::new(&self.config, self.now).build(&mut self.rng)?;
        let ledger = InventoryLedger::new(catalog.products.clone());
        let mut stats = GenerationStats {
            initial_stock: ledger.total_stock(),
            ..Default::default()
        };

        let (sessions, transactions) = self.simulate(&catalog, &ledger, &mut stats);

        stats.remaining_stock = ledger.total_stock();
        info!(
            "Dataset generation complete: {} sessions (target {}), {} transactions (target {}), {} units left in stock",
            sessions.len(),
            self.config.num_sessions,
            transactions.len(),
            self.config.num_transactions,
            stats.remaining_stock
        );

        let Catalog {
            categories, users, ..
        } = catalog;
        let dataset = Dataset {
            categories,
            products: ledger.into_products(),
            users,
            sessions,
            transactions,
        };
        Ok((dataset, stats))
    }

    /// Run the loop until both targets are met or the ceiling is reached.
    fn simulate(
        &mut self,
        catalog: &Catalog,
        ledger: &InventoryLedger,
        stats: &mut GenerationStats,
    ) -> (Vec<Session>, Vec<synth_core::Transaction>) {
        let target_sessions = self.config.num_sessions;
        let target_transactions = self.config.num_transactions;
        let max_iterations = self.config.max_iterations();

        let simulator = JourneySimulator::new(&catalog.categories, &catalog.products, ledger);
        let settlement = Settlement::new(ledger, self.now, self.config.timespan_days)
            .with_rollback(self.config.rollback_failed_checkout);

        let mut sessions = Vec::with_capacity(target_sessions);
        let mut transactions = Vec::with_capacity(target_transactions);
        let started = Instant::now();

        info!(
            "Starting generation: {} sessions, {} transactions (iteration ceiling {})",
            target_sessions, target_transactions, max_iterations
        );

        while (sessions.len() < target_sessions || transactions.len() < target_transactions)
            && stats.iterations < max_iterations
        {
            stats.iterations += 1;

            if sessions.len() < target_sessions {
                if let Some(user) = catalog.users.choose(&mut self.rng) {
                    let session = self.build_session(&simulator, user);
                    let converted = session.conversion_status == ConversionStatus::Converted;
                    if converted {
                        stats.converted_sessions += 1;
                    }

                    if converted && transactions.len() < target_transactions {
                        match settlement.settle_session(&mut self.rng, &mut self.ids, &session) {
                            CheckoutOutcome::Committed(txn) => {
                                transactions.push(txn);
                                stats.session_transactions += 1;
                            }
                            CheckoutOutcome::Aborted(aborted) => {
                                stats.aborted_checkouts += 1;
                                stats.stranded_units += aborted.stranded_units();
                            }
                            CheckoutOutcome::NothingToSettle => {}
                        }
                    } else if converted {
                        stats.unsettled_conversions += 1;
                    }

                    sessions.push(session);
                }
            }

            if transactions.len() < target_transactions
                && self.rng.gen_bool(INDEPENDENT_TRANSACTION_PROBABILITY)
            {
                if let Some(user) = catalog.users.choose(&mut self.rng) {
                    if let Some(txn) = settlement.settle_independent(
                        &mut self.rng,
                        &mut self.ids,
                        &user.user_id,
                        &catalog.products,
                    ) {
                        transactions.push(txn);
                        stats.independent_transactions += 1;
                    }
                }
            }

            if stats.iterations % self.config.progress_interval == 0 {
                info!(
                    "Progress: {}/{} sessions, {}/{} transactions (iteration {}, {:?} elapsed)",
                    sessions.len(),
                    target_sessions,
                    transactions.len(),
                    target_transactions,
                    stats.iterations,
                    started.elapsed()
                );
            }
        }

        stats.sessions = sessions.len();
        stats.ceiling_reached =
            sessions.len() < target_sessions || transactions.len() < target_transactions;
        if stats.ceiling_reached {
            warn!(
                "Iteration ceiling {} reached with {}/{} sessions and {}/{} transactions",
                max_iterations,
                sessions.len(),
                target_sessions,
                transactions.len(),
                target_transactions
            );
        }

        (sessions, transactions)
    }

    /// Simulate one session for `user` and wrap it in a session record.
    fn build_session(&mut self, simulator: &JourneySimulator<'_>, user: &User) -> Session {
        let rng = &mut self.rng;
        let session_id = self.ids.next_session_id(rng);
        let start_time =
            timestamp::within_last_days(rng, self.now, self.config.timespan_days as i64);
        let duration_seconds =
            rng.gen_range(SESSION_DURATION_RANGE.0..=SESSION_DURATION_RANGE.1);

        let Journey {
            page_views,
            viewed_products,
            cart,
            converted,
        } = simulator.simulate(rng, start_time, duration_seconds);

        let geo_data = SessionGeo {
            city: user.geo_data.city.clone(),
            state: user.geo_data.state.clone(),
            country: user.geo_data.country.clone(),
            ip_address: geo::ipv4(rng),
        };
        let device_profile = DeviceProfile {
            device_type: pick(rng, DEVICE_TYPES),
            os: pick(rng, OPERATING_SYSTEMS),
            browser: pick(rng, BROWSERS),
        };
        let referrer = Referrer::ALL
            .choose(rng)
            .copied()
            .unwrap_or(Referrer::Direct);

        Session {
            session_id,
            user_id: user.user_id.clone(),
            start_time,
            end_time: start_time + Duration::seconds(duration_seconds as i64),
            duration_seconds,
            geo_data,
            device_profile,
            viewed_products,
            page_views,
            conversion_status: ConversionStatus::from_outcome(converted, cart.is_empty()),
            cart_contents: cart,
            referrer,
        }
    }
}

fn pick<R: Rng>(rng: &mut R, pool: &[&str]) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}
