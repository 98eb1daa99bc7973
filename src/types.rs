//! Domain types shared by the sampler, the aggregator and the HTTP surface

pub mod account;
pub mod analytics;
pub mod network;
pub mod transaction;

pub use account::AccountSummary;
pub use analytics::{AnalyticsSnapshot, CategoryCount, DailyVolume, LedgerSample, SampleStatus, SnapshotReport};
pub use network::{NetworkStatsEntry, NetworkStatsReading};
pub use transaction::{Outcome, TransactionRecord};
