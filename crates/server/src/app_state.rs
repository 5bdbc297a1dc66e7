use ledger::LedgerStore;

#[derive(Debug, Default)]
pub(crate) struct AppState {
    pub(crate) ledger: LedgerStore,
}
