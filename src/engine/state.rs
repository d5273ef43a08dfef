use crate::Amount;
use crate::account::{Account, AccountKind, Status};
use crate::model::Slot;

/// Point-in-time view of one account, as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub user: String,
    pub slot: Slot,
    pub kind: AccountKind,
    pub status: Status,
    pub balance: Amount,
    pub overdraft: Amount,
    pub payees: usize,
}

impl AccountSummary {
    pub fn new(user: &str, slot: Slot, account: &Account) -> Self {
        Self {
            user: user.to_owned(),
            slot,
            kind: account.kind(),
            status: account.status(),
            balance: account.balance(),
            overdraft: account.overdraft().balance(),
            payees: account.payees().len(),
        }
    }
}
