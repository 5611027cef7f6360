//! Data access and view logic for the bank-account front-end
//!
//! - `gateway`: one method per GraphQL operation, HTTP transport
//! - `client`: process-wide data client with cache and refetch-after-mutation
//! - `views`: list and detail view models driven by the client

pub mod client;
pub mod dates;
pub mod error;
pub mod gateway;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod operations;
pub mod types;
pub mod views;

pub use client::{DataClient, QueryKey};
pub use error::{CoreError, CoreResult, ErrorCode};
pub use gateway::{BankingGateway, GatewayRef, GraphqlGateway};
#[cfg(any(test, feature = "testing"))]
pub use memory::MemoryGateway;
pub use types::{Account, AccountType, CreatedEntity, NewAccount, NewTransaction, Transaction, TransactionType};
