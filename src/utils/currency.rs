//! Conversion between lamports and SOL
//!
//! The ledger reports balances and fees as integer lamports; the dashboard
//! shows SOL.

/// Lamports per SOL
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Convert a lamport amount to SOL
///
/// # Examples
/// ```
/// use ledger_analytics::utils::currency::lamports_to_sol;
///
/// assert_eq!(lamports_to_sol(2_000_000_000), 2.0);
/// assert_eq!(lamports_to_sol(5_000), 0.000005);
/// ```
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL
}

/// Format a lamport amount as dual SOL + lamports display
///
/// # Examples
/// ```
/// use ledger_analytics::utils::currency::format_lamports_as_sol;
///
/// assert_eq!(
///     format_lamports_as_sol(1_500_000_000),
///     "1.500000000 SOL (1500000000 lamports)"
/// );
/// ```
pub fn format_lamports_as_sol(lamports: u64) -> String {
    format!("{:.9} SOL ({} lamports)", lamports_to_sol(lamports), lamports)
}
