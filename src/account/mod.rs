//! Bank accounts and the overdraft and interest policies they are built from.
//!
//! An account's policies are chosen from its [`AccountKind`] when it is
//! opened and never change afterwards.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::Amount;
use crate::credential::Credential;
use crate::directory::Directory;

mod error;
pub use error::{AccountError, MoneyOperation};

pub mod interest;
pub use interest::InterestPolicy;

pub mod overdraft;
pub use overdraft::OverdraftPolicy;

/// Shared, lockable account. Balance mutations are serialized per account.
pub type AccountHandle = Arc<Mutex<Account>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountKind {
    #[default]
    Current,
    Savings,
}

impl AccountKind {
    /// Policies bound to an account of this kind at open time.
    ///
    /// Current accounts get an overdraft facility and no interest; every
    /// other kind gets interest and no overdraft.
    pub fn policies(self) -> (OverdraftPolicy, InterestPolicy) {
        match self {
            AccountKind::Current => (OverdraftPolicy::facility(), InterestPolicy::None),
            AccountKind::Savings => (OverdraftPolicy::None, InterestPolicy::Flat),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccountKind::Current => "current",
            AccountKind::Savings => "savings",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "current" => Some(AccountKind::Current),
            "savings" => Some(AccountKind::Savings),
            _ => None,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Open,
    Closed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Open => f.write_str("open"),
            Status::Closed => f.write_str("closed"),
        }
    }
}

/// A registered payment destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payee {
    pub sort_code: String,
    pub account_number: String,
    pub name: String,
}

impl Payee {
    pub fn new(
        sort_code: impl Into<String>,
        account_number: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            sort_code: sort_code.into(),
            account_number: account_number.into(),
            name: name.into(),
        }
    }
}

/// A bank account.
///
/// The effective balance is the main balance plus the overdraft
/// sub-balance, see [`Account::balance`].
#[derive(Debug)]
pub struct Account {
    id: Uuid,
    credential: Credential,
    kind: AccountKind,
    status: Status,
    balance: Amount,
    overdraft: OverdraftPolicy,
    interest: InterestPolicy,
    payees: Vec<Payee>,
}

/// Lifecycle
impl Account {
    /// Create an open account with zero balance, without registering it.
    pub fn new(credential: Credential, kind: AccountKind) -> Self {
        let (overdraft, interest) = kind.policies();
        Self {
            id: Uuid::new_v4(),
            credential,
            kind,
            status: Status::Open,
            balance: Amount::ZERO,
            overdraft,
            interest,
            payees: Vec::new(),
        }
    }

    /// Open a new account and register it in `directory`.
    pub fn open(
        directory: &Directory,
        credential: Credential,
        kind: AccountKind,
    ) -> AccountHandle {
        let account = Self::new(credential, kind);
        debug!(
            account = %account.id,
            user = account.credential.username(),
            kind = %kind,
            "account opened"
        );

        let handle = Arc::new(Mutex::new(account));
        directory.add(Arc::clone(&handle));
        handle
    }

    /// Open a current account, the default kind.
    pub fn open_default(directory: &Directory, credential: Credential) -> AccountHandle {
        Self::open(directory, credential, AccountKind::default())
    }

    /// Close the account. Only allowed when the main balance is exactly zero.
    pub fn close(&mut self) -> Result<(), AccountError> {
        if !self.balance.is_zero() {
            return Err(AccountError::NonZeroBalance(self.balance));
        }
        self.status = Status::Closed;
        Ok(())
    }

    pub fn reactivate(&mut self) {
        self.status = Status::Open;
    }

    /// Check `credential` against the one the account was opened with.
    pub fn login(&self, credential: &Credential) -> Result<(), AccountError> {
        if !self.credential.validate(credential) {
            return Err(AccountError::FailedLogin(credential.username().to_owned()));
        }
        Ok(())
    }
}

/// Accessors
impl Account {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Effective balance: main balance plus overdraft sub-balance.
    pub fn balance(&self) -> Amount {
        self.balance.saturating_add(self.overdraft.balance())
    }

    pub fn main_balance(&self) -> Amount {
        self.balance
    }

    pub fn overdraft(&self) -> &OverdraftPolicy {
        &self.overdraft
    }

    pub fn has_overdraft_facility(&self) -> bool {
        self.overdraft.has_facility()
    }

    pub fn interest(&self) -> InterestPolicy {
        self.interest
    }

    pub fn payees(&self) -> &[Payee] {
        &self.payees
    }
}

/// Balance operations
impl Account {
    /// Deposit `amount`.
    ///
    /// An outstanding overdraft is repaid first and only what remains is
    /// credited to the main balance.
    pub fn deposit(&mut self, amount: Amount) -> Result<(), AccountError> {
        if amount.is_negative() {
            return Err(AccountError::NegativeAmount(MoneyOperation::Deposit, amount));
        }

        let overflow = AccountError::Overflow(MoneyOperation::Deposit, amount);
        if self.overdraft.balance().is_negative() {
            // repaying the overdraft only shrinks it, so just the credit can overflow
            let credited = self.overdraft.balance().checked_add(amount).ok_or(overflow.clone())?;
            if credited > Amount::ZERO {
                self.balance.checked_add(credited).ok_or(overflow)?;
            }
            let remainder = self.overdraft.deposit(amount);
            self.balance += remainder;
        } else {
            self.balance = self.balance.checked_add(amount).ok_or(overflow)?;
        }
        Ok(())
    }

    /// Withdraw `amount`.
    ///
    /// Covered by the main balance when it can be. Otherwise the main balance
    /// is drained and the shortfall is drawn from the overdraft facility,
    /// fine included.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), AccountError> {
        if amount.is_negative() {
            return Err(AccountError::NegativeAmount(MoneyOperation::Withdrawal, amount));
        }

        if self.balance > Amount::ZERO && amount <= self.balance {
            self.balance -= amount;
            return Ok(());
        }

        if !self.overdraft.has_facility() {
            return Err(AccountError::InsufficientFunds(self.balance(), amount));
        }

        let covered = self.balance.max(Amount::ZERO);
        self.overdraft.withdraw(amount - covered)?;
        self.balance -= covered;
        Ok(())
    }

    /// Append a payee. Names are not deduplicated.
    pub fn register_payee(
        &mut self,
        sort_code: impl Into<String>,
        account_number: impl Into<String>,
        name: impl Into<String>,
    ) {
        self.payees.push(Payee::new(sort_code, account_number, name));
    }

    /// Pay `amount` to the first payee registered under `payee_name`.
    ///
    /// Debits the main balance only; the overdraft is not consulted.
    pub fn make_payment(&mut self, payee_name: &str, amount: Amount) -> Result<(), AccountError> {
        if amount.is_negative() {
            return Err(AccountError::NegativeAmount(MoneyOperation::Payment, amount));
        }

        if !self.payees.iter().any(|p| p.name == payee_name) {
            return Err(AccountError::PayeeNotFound(payee_name.to_owned()));
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(AccountError::Overflow(MoneyOperation::Payment, amount))?;
        Ok(())
    }

    /// Credit interest on the main balance, as calculated by the interest
    /// policy.
    pub fn calculate_interest(&mut self) -> Result<(), AccountError> {
        let interest = self.interest.calculate(self.balance);
        self.balance = self
            .balance
            .checked_add(interest)
            .ok_or(AccountError::Overflow(MoneyOperation::Interest, interest))?;
        Ok(())
    }
}
