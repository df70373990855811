use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validate::{self, ValidationError};

/// Opaque account identifier. Assigned by the store at creation and
/// immutable afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccountError {
    #[error("cannot withdraw {requested} from account {account}: only {available} available")]
    InsufficientFunds {
        account: AccountId,
        requested: f64,
        available: f64,
    },

    #[error("invalid input - {0}")]
    InvalidInput(#[from] ValidationError),
}

type AccountResult<T> = Result<T, AccountError>;

/// A named, owned balance. The balance is always finite and never
/// negative; every mutation goes through a validated method.
///
/// Accounts carry no lock of their own: the store serializes all access,
/// so each deposit/withdraw runs as a single critical section.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    id: AccountId,
    name: String,
    owner_name: String,
    balance: f64,
}

impl Account {
    pub(crate) fn new(
        id: AccountId,
        name: impl Into<String>,
        owner_name: impl Into<String>,
        balance: f64,
    ) -> AccountResult<Self> {
        let name = name.into();
        let owner_name = owner_name.into();
        validate::non_empty("name", &name)?;
        validate::non_empty("ownerName", &owner_name)?;
        validate::non_negative_balance(balance)?;

        Ok(Self {
            id,
            name,
            owner_name,
            balance,
        })
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> AccountResult<()> {
        let name = name.into();
        validate::non_empty("name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_owner_name(&mut self, owner_name: impl Into<String>) -> AccountResult<()> {
        let owner_name = owner_name.into();
        validate::non_empty("ownerName", &owner_name)?;
        self.owner_name = owner_name;
        Ok(())
    }

    pub fn set_balance(&mut self, balance: f64) -> AccountResult<()> {
        validate::non_negative_balance(balance)?;
        self.balance = balance;
        Ok(())
    }

    /// Credits `amount` and returns the updated balance.
    pub fn deposit(&mut self, amount: f64) -> AccountResult<f64> {
        validate::positive_amount(amount)?;
        self.balance += amount;
        Ok(self.balance)
    }

    /// Debits `amount` and returns the updated balance. The balance is
    /// left untouched if it would go negative.
    pub fn withdraw(&mut self, amount: f64) -> AccountResult<f64> {
        validate::positive_amount(amount)?;
        if self.balance - amount < 0.0 {
            return Err(AccountError::InsufficientFunds {
                account: self.id.clone(),
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(self.balance)
    }
}
