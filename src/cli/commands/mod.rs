pub mod account;
pub mod network_stats;
pub mod serve;
pub mod snapshot;
pub mod test_rpc;
