//! Operation processing engine.
//!
//! The engine owns the account directory and applies operations to it.
//! Every operation on an existing account re-authenticates through the
//! directory before touching the account.
//! Also supports async stream of operations.

use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::Amount;
use crate::account::{Account, AccountHandle};
use crate::credential::Credential;
use crate::directory::Directory;
use crate::model::{Operation, Target};

mod state;
pub use state::AccountSummary;

mod error;
pub use error::EngineError;

/// The operation processing engine.
#[derive(Debug, Default)]
pub struct Bank {
    directory: Directory,
}

/// Public API
impl Bank {
    pub fn new() -> Self {
        Self {
            directory: Directory::new(),
        }
    }

    /// Run the engine with the given operation stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Operation> + Unpin) {
        while let Some(op) = stream.next().await {
            // a failed operation should not stop the engine, it is logged by `apply`
            let _ = self.apply(op);
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Return one summary per account, ordered by user then slot.
    ///
    /// The slot is the account's position among the accounts sharing its
    /// credential, which is how operations address it.
    pub fn summaries(&self) -> Vec<AccountSummary> {
        let mut summaries: Vec<_> = self
            .directory
            .snapshot()
            .into_iter()
            .flat_map(|(user, accounts)| {
                let mut seen: Vec<Credential> = Vec::with_capacity(accounts.len());
                accounts
                    .into_iter()
                    .map(|handle| {
                        let account = handle.lock();
                        let slot = seen
                            .iter()
                            .filter(|c| c.validate(account.credential()))
                            .count();
                        seen.push(account.credential().clone());
                        AccountSummary::new(&user, slot, &account)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        summaries.sort_by(|a, b| (&a.user, a.slot).cmp(&(&b.user, b.slot)));
        summaries
    }

    /// Apply a single operation on top of the current state
    pub fn apply(&mut self, op: Operation) -> Result<(), EngineError> {
        let name = op.name();
        let user = op.user().to_owned();
        let amount = op.amount();

        let result = self.dispatch(op);
        Self::log_result(name, &user, amount, &result);
        result
    }
}

/// Private API
impl Bank {
    /// Small helper to log `apply` results
    fn log_result<E: std::fmt::Display>(
        op: &str,
        user: &str,
        amount: Option<Amount>,
        result: &Result<(), E>,
    ) {
        match (result, amount) {
            (Ok(()), Some(amt)) => info!(user, amount = %amt, "{op} applied"),
            (Ok(()), None) => info!(user, "{op} applied"),
            (Err(e), Some(amt)) => info!(user, amount = %amt, reason = %e, "{op} skipped"),
            (Err(e), None) => info!(user, reason = %e, "{op} skipped"),
        }
    }

    fn dispatch(&mut self, op: Operation) -> Result<(), EngineError> {
        match op {
            Operation::Open { user, secret, kind } => {
                Account::open(&self.directory, Credential::new(user, &secret), kind);
                Ok(())
            }
            Operation::Deposit { target, amount } => {
                Ok(self.locate(&target)?.lock().deposit(amount)?)
            }
            Operation::Withdraw { target, amount } => {
                Ok(self.locate(&target)?.lock().withdraw(amount)?)
            }
            Operation::RegisterPayee { target, payee } => {
                let handle = self.locate(&target)?;
                handle
                    .lock()
                    .register_payee(payee.sort_code, payee.account_number, payee.name);
                Ok(())
            }
            Operation::Payment {
                target,
                payee,
                amount,
            } => Ok(self.locate(&target)?.lock().make_payment(&payee, amount)?),
            Operation::Interest { target } => {
                Ok(self.locate(&target)?.lock().calculate_interest()?)
            }
            Operation::Close { target } => Ok(self.locate(&target)?.lock().close()?),
            Operation::Reactivate { target } => {
                self.locate(&target)?.lock().reactivate();
                Ok(())
            }
        }
    }

    /// Authenticate through the directory and pick the targeted account
    fn locate(&self, target: &Target) -> Result<AccountHandle, EngineError> {
        let credential = Credential::new(target.user.as_str(), &target.secret);
        self.directory
            .find_by_credential(&credential)
            .into_iter()
            .nth(target.slot)
            .ok_or_else(|| EngineError::AccountNotFound(target.user.clone(), target.slot))
    }
}
