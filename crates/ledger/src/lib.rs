//! Signed FIFO ledger: the consumption rule and the serialized holder that
//! applies it to the single shared ledger.

mod engine;
mod store;

pub use engine::{apply, Action, Ledger, LedgerError, Sign};
pub use store::{LedgerStore, Replay, ReplayedStep, EXAMPLE_SEQUENCE};
