pub mod pool;
pub mod token;
pub mod wallet_entry;

// Re-export for easier access
pub use pool::{DEFAULT_INVESTMENT_USD, ESTIMATED_FEE_RATE, PoolRecord, TransactionCounts};
pub use token::TokenDescriptor;
pub use wallet_entry::WalletTokenEntry;
