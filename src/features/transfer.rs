use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::AccountId;
use super::validate::{self, ValidationError};

/// Opaque transfer identifier, assigned only when the store commits the
/// transfer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TransferId(String);

impl TransferId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransferId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

type TransferResult<T> = Result<T, ValidationError>;

/// A record of a movement between two accounts.
///
/// `id` and `timestamp` stay empty until the store has applied the
/// balance mutations; a committed transfer is immutable ledger history.
/// The entity does not know how to apply itself to accounts - that is
/// the store's job, since it spans two accounts plus the transfer
/// collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    id: Option<TransferId>,
    origin_account_id: AccountId,
    destination_account_id: AccountId,
    amount: f64,
    timestamp: Option<DateTime<Utc>>,
}

impl Transfer {
    pub fn new(
        origin_account_id: AccountId,
        destination_account_id: AccountId,
        amount: f64,
    ) -> TransferResult<Self> {
        validate::non_empty("originAccountId", origin_account_id.as_str())?;
        validate::non_empty("destinationAccountId", destination_account_id.as_str())?;
        validate::positive_amount(amount)?;
        if origin_account_id == destination_account_id {
            return Err(ValidationError::SelfTransfer);
        }

        Ok(Self {
            id: None,
            origin_account_id,
            destination_account_id,
            amount,
            timestamp: None,
        })
    }

    pub fn id(&self) -> Option<&TransferId> {
        self.id.as_ref()
    }

    pub fn origin_account_id(&self) -> &AccountId {
        &self.origin_account_id
    }

    pub fn destination_account_id(&self) -> &AccountId {
        &self.destination_account_id
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn set_origin_account_id(&mut self, id: AccountId) -> TransferResult<()> {
        validate::non_empty("originAccountId", id.as_str())?;
        self.origin_account_id = id;
        Ok(())
    }

    pub fn set_destination_account_id(&mut self, id: AccountId) -> TransferResult<()> {
        validate::non_empty("destinationAccountId", id.as_str())?;
        self.destination_account_id = id;
        Ok(())
    }

    pub fn set_amount(&mut self, amount: f64) -> TransferResult<()> {
        validate::positive_amount(amount)?;
        self.amount = amount;
        Ok(())
    }

    /// Marks the transfer as committed. Called by the store once both
    /// balance mutations have been applied.
    pub(crate) fn commit(&mut self, id: TransferId, timestamp: DateTime<Utc>) {
        self.id = Some(id);
        self.timestamp = Some(timestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn new_leaves_id_and_timestamp_unassigned() {
        let transfer = Transfer::new(AccountId::from("0"), AccountId::from("1"), 9.0).unwrap();
        assert!(transfer.id().is_none());
        assert!(transfer.timestamp().is_none());
        assert_eq!(transfer.origin_account_id(), &AccountId::from("0"));
        assert_eq!(transfer.destination_account_id(), &AccountId::from("1"));
        assert_eq!(transfer.amount(), 9.0);
    }

    #[test_case("", "1", 9.0; "empty origin")]
    #[test_case("0", "", 9.0; "empty destination")]
    #[test_case("0", "1", 0.0; "zero amount")]
    #[test_case("0", "1", -9.0; "negative amount")]
    #[test_case("0", "1", f64::NAN; "nan amount")]
    #[test_case("0", "1", f64::INFINITY; "infinite amount")]
    fn new_rejects_invalid_fields(origin: &str, destination: &str, amount: f64) {
        assert!(Transfer::new(AccountId::from(origin), AccountId::from(destination), amount).is_err());
    }

    #[test]
    fn new_rejects_self_transfer() {
        let err = Transfer::new(AccountId::from("7"), AccountId::from("7"), 1.0).unwrap_err();
        assert_eq!(err, ValidationError::SelfTransfer);
    }

    #[test]
    fn setters_validate() {
        let mut transfer = Transfer::new(AccountId::from("0"), AccountId::from("1"), 9.0).unwrap();

        transfer.set_amount(2.5).unwrap();
        assert_eq!(transfer.amount(), 2.5);
        assert!(transfer.set_amount(-1.0).is_err());

        transfer.set_origin_account_id(AccountId::from("2")).unwrap();
        assert!(transfer.set_origin_account_id(AccountId::from("")).is_err());

        transfer
            .set_destination_account_id(AccountId::from("3"))
            .unwrap();
        assert!(transfer
            .set_destination_account_id(AccountId::from(""))
            .is_err());
    }

    #[test]
    fn committed_transfer_serializes_timestamp_as_iso8601() {
        let mut transfer = Transfer::new(AccountId::from("0"), AccountId::from("1"), 9.0).unwrap();
        transfer.commit(TransferId::from("42"), Utc::now());

        let json = serde_json::to_value(&transfer).unwrap();
        assert_eq!(json["id"], "42");
        let raw = json["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(raw).is_ok());
    }
}
