mod account;
mod query;
mod store;
mod transfer;
mod validate;

pub use self::{
    account::{Account, AccountError, AccountId},
    query::{AccountFilter, TransferFilter},
    store::{Store, StoreError},
    transfer::{Transfer, TransferId},
    validate::ValidationError,
};
