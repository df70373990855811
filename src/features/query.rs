use std::cmp::Ordering;

use super::account::{Account, AccountId};
use super::transfer::Transfer;

/// Optional criteria for listing accounts. Supplied filters are
/// AND-combined; an exact `balance` filter takes priority over the range
/// bounds, which are both exclusive.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub name: Option<String>,
    pub owner_name: Option<String>,
    pub balance: Option<f64>,
    pub above_balance: Option<f64>,
    pub below_balance: Option<f64>,
}

impl AccountFilter {
    pub(crate) fn matches(&self, account: &Account) -> bool {
        if let Some(name) = &self.name {
            if account.name() != name {
                return false;
            }
        }
        if let Some(owner_name) = &self.owner_name {
            if account.owner_name() != owner_name {
                return false;
            }
        }
        if let Some(exact) = self.balance {
            if account.balance() != exact {
                return false;
            }
        } else {
            if let Some(above) = self.above_balance {
                if account.balance() <= above {
                    return false;
                }
            }
            if let Some(below) = self.below_balance {
                if account.balance() >= below {
                    return false;
                }
            }
        }
        true
    }
}

/// Optional criteria for listing transfers, mirroring [`AccountFilter`]'s
/// exact-over-range semantics for the amount.
#[derive(Debug, Clone, Default)]
pub struct TransferFilter {
    pub origin_account_id: Option<AccountId>,
    pub destination_account_id: Option<AccountId>,
    pub amount: Option<f64>,
    pub above_amount: Option<f64>,
    pub below_amount: Option<f64>,
}

impl TransferFilter {
    pub(crate) fn matches(&self, transfer: &Transfer) -> bool {
        if let Some(origin) = &self.origin_account_id {
            if transfer.origin_account_id() != origin {
                return false;
            }
        }
        if let Some(destination) = &self.destination_account_id {
            if transfer.destination_account_id() != destination {
                return false;
            }
        }
        if let Some(exact) = self.amount {
            if transfer.amount() != exact {
                return false;
            }
        } else {
            if let Some(above) = self.above_amount {
                if transfer.amount() <= above {
                    return false;
                }
            }
            if let Some(below) = self.below_amount {
                if transfer.amount() >= below {
                    return false;
                }
            }
        }
        true
    }
}

/// Splits a sort spec such as `-balance` into the field name and whether
/// the order is descending.
fn sort_spec(sort: &str) -> (&str, bool) {
    match sort.strip_prefix('-') {
        Some(field) => (field, true),
        None => (sort, false),
    }
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Sorts accounts in place by one of `id`, `name`, `ownerName` or
/// `balance`. An unrecognized field leaves the natural order untouched.
/// The sort is stable.
pub(crate) fn sort_accounts(accounts: &mut [Account], sort: &str) {
    let (field, descending) = sort_spec(sort);
    match field {
        "id" => accounts.sort_by(|a, b| directed(a.id().cmp(b.id()), descending)),
        "name" => accounts.sort_by(|a, b| directed(a.name().cmp(b.name()), descending)),
        "ownerName" => {
            accounts.sort_by(|a, b| directed(a.owner_name().cmp(b.owner_name()), descending))
        }
        "balance" => {
            accounts.sort_by(|a, b| directed(a.balance().total_cmp(&b.balance()), descending))
        }
        _ => {}
    }
}

/// Sorts transfers in place by one of `id`, `originAccountId`,
/// `destinationAccountId`, `amount` or `timestamp`. Timestamps compare
/// as instants, not as their string rendering.
pub(crate) fn sort_transfers(transfers: &mut [Transfer], sort: &str) {
    let (field, descending) = sort_spec(sort);
    match field {
        "id" => transfers.sort_by(|a, b| directed(a.id().cmp(&b.id()), descending)),
        "originAccountId" => transfers.sort_by(|a, b| {
            directed(a.origin_account_id().cmp(b.origin_account_id()), descending)
        }),
        "destinationAccountId" => transfers.sort_by(|a, b| {
            directed(
                a.destination_account_id().cmp(b.destination_account_id()),
                descending,
            )
        }),
        "amount" => {
            transfers.sort_by(|a, b| directed(a.amount().total_cmp(&b.amount()), descending))
        }
        "timestamp" => {
            transfers.sort_by(|a, b| directed(a.timestamp().cmp(&b.timestamp()), descending))
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, name: &str, owner_name: &str, balance: f64) -> Account {
        Account::new(AccountId::from(id), name, owner_name, balance).unwrap()
    }

    fn sample() -> Vec<Account> {
        vec![
            account("0", "checking", "john", 100.0),
            account("1", "savings", "jane", 250.0),
            account("2", "holiday", "john", 50.0),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = AccountFilter::default();
        assert!(sample().iter().all(|a| filter.matches(a)));
    }

    #[test]
    fn filters_are_and_combined() {
        let filter = AccountFilter {
            owner_name: Some("john".into()),
            name: Some("holiday".into()),
            ..Default::default()
        };
        let matched: Vec<_> = sample().into_iter().filter(|a| filter.matches(a)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id(), &AccountId::from("2"));
    }

    #[test]
    fn balance_range_bounds_are_exclusive() {
        let filter = AccountFilter {
            above_balance: Some(50.0),
            below_balance: Some(250.0),
            ..Default::default()
        };
        let matched: Vec<_> = sample().into_iter().filter(|a| filter.matches(a)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].balance(), 100.0);
    }

    #[test]
    fn exact_balance_overrides_range_filters() {
        let filter = AccountFilter {
            balance: Some(50.0),
            // would exclude 50.0 if the range applied
            above_balance: Some(60.0),
            ..Default::default()
        };
        let matched: Vec<_> = sample().into_iter().filter(|a| filter.matches(a)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].balance(), 50.0);
    }

    #[test]
    fn sort_by_balance_descending() {
        let mut accounts = sample();
        sort_accounts(&mut accounts, "-balance");
        let balances: Vec<f64> = accounts.iter().map(|a| a.balance()).collect();
        assert_eq!(balances, vec![250.0, 100.0, 50.0]);
    }

    #[test]
    fn sort_by_name_ascending() {
        let mut accounts = sample();
        sort_accounts(&mut accounts, "name");
        let names: Vec<&str> = accounts.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["checking", "holiday", "savings"]);
    }

    #[test]
    fn unknown_sort_field_keeps_natural_order() {
        let mut accounts = sample();
        sort_accounts(&mut accounts, "favouriteColour");
        let ids: Vec<&str> = accounts.iter().map(|a| a.id().as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }
}
