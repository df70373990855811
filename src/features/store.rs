use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use thiserror::Error;

use super::account::{Account, AccountError, AccountId};
use super::query::{self, AccountFilter, TransferFilter};
use super::transfer::{Transfer, TransferId};
use super::validate::ValidationError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("account with id {0} was not found")]
    AccountNotFound(AccountId),

    #[error("transfer with id {0} was not found")]
    TransferNotFound(TransferId),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("invalid argument - {0}")]
    InvalidArgument(#[from] ValidationError),
}

type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Default)]
struct State {
    accounts: BTreeMap<AccountId, Account>,
    transfers: BTreeMap<TransferId, Transfer>,
    account_id_seq: u64,
    transfer_id_seq: u64,
}

impl State {
    // Counters only ever move forward, so an id is never reissued within
    // this store's lifetime even after deletes.
    fn next_account_id(&mut self) -> AccountId {
        let id = AccountId::new(self.account_id_seq.to_string());
        self.account_id_seq += 1;
        id
    }

    fn next_transfer_id(&mut self) -> TransferId {
        let id = TransferId::new(self.transfer_id_seq.to_string());
        self.transfer_id_seq += 1;
        id
    }
}

/// The ledger: owns the account and transfer collections and every
/// operation on them.
///
/// A single lock covers both collections, so each operation is
/// linearizable with respect to every other; in particular no caller can
/// observe a transfer's debit without its credit, and two transfers
/// cannot both pass the balance check against a stale balance.
#[derive(Debug, Default)]
pub struct Store {
    inner: Mutex<State>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means another caller panicked; the state
        // itself is still consistent since no operation leaves a partial
        // mutation behind.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ---- account operations ----

    /// Validates the fields, assigns a fresh id and stores the account.
    pub fn create_account(
        &self,
        name: impl Into<String>,
        owner_name: impl Into<String>,
        balance: f64,
    ) -> StoreResult<Account> {
        let mut state = self.state();
        let id = state.next_account_id();
        let account = Account::new(id.clone(), name, owner_name, balance)?;
        state.accounts.insert(id, account.clone());
        debug!("created account {}", account.id());
        Ok(account)
    }

    pub fn get_account(&self, id: &AccountId) -> StoreResult<Account> {
        self.state()
            .accounts
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::AccountNotFound(id.clone()))
    }

    /// Replaces every field of the account stored under `id` except the
    /// id itself, which a record keeps for life.
    pub fn update_account(
        &self,
        id: &AccountId,
        name: impl Into<String>,
        owner_name: impl Into<String>,
        balance: f64,
    ) -> StoreResult<Account> {
        let updated = Account::new(id.clone(), name, owner_name, balance)?;
        let mut state = self.state();
        if !state.accounts.contains_key(id) {
            return Err(StoreError::AccountNotFound(id.clone()));
        }
        state.accounts.insert(id.clone(), updated.clone());
        Ok(updated)
    }

    /// Removes the account if present and reports whether it existed.
    /// Transfers referencing it are kept as audit history.
    pub fn delete_account(&self, id: &AccountId) -> bool {
        let existed = self.state().accounts.remove(id).is_some();
        if existed {
            debug!("deleted account {id}");
        }
        existed
    }

    pub fn clear_accounts(&self) {
        self.state().accounts.clear();
    }

    pub fn deposit(&self, id: &AccountId, amount: f64) -> StoreResult<Account> {
        let mut state = self.state();
        let account = state
            .accounts
            .get_mut(id)
            .ok_or_else(|| StoreError::AccountNotFound(id.clone()))?;
        account.deposit(amount)?;
        debug!("deposited {amount} into account {id}");
        Ok(account.clone())
    }

    pub fn withdraw(&self, id: &AccountId, amount: f64) -> StoreResult<Account> {
        let mut state = self.state();
        let account = state
            .accounts
            .get_mut(id)
            .ok_or_else(|| StoreError::AccountNotFound(id.clone()))?;
        account.withdraw(amount)?;
        debug!("withdrew {amount} from account {id}");
        Ok(account.clone())
    }

    /// Returns the accounts matching every supplied filter, sorted by
    /// the optional sort spec (`-` prefix for descending).
    pub fn list_accounts(&self, filter: &AccountFilter, sort: Option<&str>) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .state()
            .accounts
            .values()
            .filter(|account| filter.matches(account))
            .cloned()
            .collect();
        if let Some(sort) = sort {
            query::sort_accounts(&mut accounts, sort);
        }
        accounts
    }

    // ---- transfer operations ----

    /// Moves `amount` from the origin account to the destination account
    /// and records the committed transfer.
    ///
    /// The whole sequence - existence checks, withdraw, deposit, id and
    /// timestamp assignment, insertion - runs under one lock
    /// acquisition. The withdraw is attempted first and is the only
    /// mutation attempted if it fails, so a rejected transfer leaves
    /// both balances exactly as they were.
    pub fn create_transfer(
        &self,
        origin_account_id: AccountId,
        destination_account_id: AccountId,
        amount: f64,
    ) -> StoreResult<Transfer> {
        let mut transfer = Transfer::new(origin_account_id, destination_account_id, amount)?;

        let mut state = self.state();
        let origin_id = transfer.origin_account_id().clone();
        let destination_id = transfer.destination_account_id().clone();
        if !state.accounts.contains_key(&origin_id) {
            return Err(StoreError::AccountNotFound(origin_id));
        }
        if !state.accounts.contains_key(&destination_id) {
            return Err(StoreError::AccountNotFound(destination_id));
        }

        state
            .accounts
            .get_mut(&origin_id)
            .ok_or_else(|| StoreError::AccountNotFound(origin_id.clone()))?
            .withdraw(amount)?;
        // Cannot fail: the amount was validated with the transfer and the
        // destination exists under the same lock.
        state
            .accounts
            .get_mut(&destination_id)
            .ok_or_else(|| StoreError::AccountNotFound(destination_id.clone()))?
            .deposit(amount)?;

        let id = state.next_transfer_id();
        transfer.commit(id.clone(), Utc::now());
        state.transfers.insert(id, transfer.clone());
        debug!(
            "transferred {amount} from account {origin_id} to account {destination_id}"
        );
        Ok(transfer)
    }

    pub fn get_transfer(&self, id: &TransferId) -> StoreResult<Transfer> {
        self.state()
            .transfers
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::TransferNotFound(id.clone()))
    }

    /// Removes the ledger entry only; the balance effects of the
    /// transfer are not reversed.
    pub fn delete_transfer(&self, id: &TransferId) -> bool {
        let existed = self.state().transfers.remove(id).is_some();
        if existed {
            debug!("deleted transfer {id}");
        }
        existed
    }

    pub fn clear_transfers(&self) {
        self.state().transfers.clear();
    }

    pub fn list_transfers(&self, filter: &TransferFilter, sort: Option<&str>) -> Vec<Transfer> {
        let mut transfers: Vec<Transfer> = self
            .state()
            .transfers
            .values()
            .filter(|transfer| filter.matches(transfer))
            .cloned()
            .collect();
        if let Some(sort) = sort {
            query::sort_transfers(&mut transfers, sort);
        }
        transfers
    }
}
