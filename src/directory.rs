//! Username-indexed store of accounts with authenticated lookup.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::account::AccountHandle;
use crate::credential::Credential;

/// Maps a username to every account opened under it, in opening order.
///
/// All access goes through a single lock. Account locks are only taken after
/// the directory lock has been released.
#[derive(Debug, Default)]
pub struct Directory {
    accounts: Mutex<HashMap<String, Vec<AccountHandle>>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `account` under its credential's username.
    pub fn add(&self, account: AccountHandle) {
        let username = account.lock().credential().username().to_owned();
        debug!(user = %username, "account added to directory");

        self.accounts
            .lock()
            .entry(username)
            .or_default()
            .push(account);
    }

    /// Accounts registered under `credential`'s username that also accept
    /// `credential` at login.
    ///
    /// An unknown username yields an empty list.
    pub fn find_by_credential(&self, credential: &Credential) -> Vec<AccountHandle> {
        let candidates = match self.accounts.lock().get(credential.username()) {
            Some(accounts) => accounts.clone(),
            None => return Vec::new(),
        };

        candidates
            .into_iter()
            .filter(|handle| {
                let account = handle.lock();
                match account.login(credential) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(account = %account.id(), reason = %e, "login rejected");
                        false
                    }
                }
            })
            .collect()
    }

    /// Snapshot of every registered account, grouped by username.
    pub fn snapshot(&self) -> Vec<(String, Vec<AccountHandle>)> {
        self.accounts
            .lock()
            .iter()
            .map(|(user, accounts)| (user.clone(), accounts.iter().map(Arc::clone).collect()))
            .collect()
    }

    /// Total number of registered accounts.
    pub fn len(&self) -> usize {
        self.accounts.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every account.
    pub fn clear(&self) {
        self.accounts.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Account, AccountKind};

    const USERNAME: &str = "dave.green";
    const PASSWORD: &str = "secret1234";

    fn credential() -> Credential {
        Credential::new(USERNAME, PASSWORD)
    }

    #[test]
    fn new_directory_is_empty() {
        let directory = Directory::new();
        assert!(directory.is_empty());
        assert!(directory.find_by_credential(&credential()).is_empty());
    }

    #[test]
    fn find_returns_opened_account() {
        let directory = Directory::new();
        Account::open_default(&directory, credential());

        assert_eq!(directory.find_by_credential(&credential()).len(), 1);
    }

    #[test]
    fn find_returns_every_account_in_opening_order() {
        let directory = Directory::new();
        let opened: Vec<_> = [AccountKind::Current, AccountKind::Savings, AccountKind::Current]
            .into_iter()
            .map(|kind| Account::open(&directory, credential(), kind).lock().id())
            .collect();

        let found: Vec<_> = directory
            .find_by_credential(&credential())
            .iter()
            .map(|handle| handle.lock().id())
            .collect();
        assert_eq!(found, opened);
    }

    #[test]
    fn find_only_returns_matching_username() {
        let directory = Directory::new();
        Account::open_default(&directory, credential());
        Account::open_default(&directory, Credential::new("steve.green", PASSWORD));

        let found = directory.find_by_credential(&credential());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].lock().credential().username(), USERNAME);
    }

    #[test]
    fn wrong_secret_finds_nothing() {
        let directory = Directory::new();
        Account::open_default(&directory, credential());
        Account::open_default(&directory, credential());

        let found = directory.find_by_credential(&Credential::new(USERNAME, "wrong"));
        assert!(found.is_empty());
    }

    #[test]
    fn unknown_username_finds_nothing() {
        let directory = Directory::new();
        Account::open_default(&directory, credential());

        let found = directory.find_by_credential(&Credential::new("nobody", PASSWORD));
        assert!(found.is_empty());
    }

    #[test]
    fn same_username_different_secret_is_filtered_per_account() {
        let directory = Directory::new();
        Account::open_default(&directory, credential());
        Account::open_default(&directory, Credential::new(USERNAME, "other"));

        assert_eq!(directory.find_by_credential(&credential()).len(), 1);
        assert_eq!(
            directory
                .find_by_credential(&Credential::new(USERNAME, "other"))
                .len(),
            1
        );
    }

    #[test]
    fn found_handles_share_state_with_opener() {
        let directory = Directory::new();
        let handle = Account::open_default(&directory, credential());

        let found = directory.find_by_credential(&credential());
        found[0]
            .lock()
            .deposit(crate::Amount::from_units(10))
            .unwrap();

        assert_eq!(handle.lock().balance(), crate::Amount::from_units(10));
    }

    #[test]
    fn snapshot_groups_by_username() {
        let directory = Directory::new();
        Account::open_default(&directory, credential());
        Account::open_default(&directory, credential());
        Account::open_default(&directory, Credential::new("steve.green", PASSWORD));

        let mut snapshot = directory.snapshot();
        snapshot.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].0, USERNAME);
        assert_eq!(snapshot[0].1.len(), 2);
        assert_eq!(snapshot[1].1.len(), 1);
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn clear_forgets_everything() {
        let directory = Directory::new();
        Account::open_default(&directory, credential());

        directory.clear();
        assert!(directory.is_empty());
        assert!(directory.find_by_credential(&credential()).is_empty());
    }
}
