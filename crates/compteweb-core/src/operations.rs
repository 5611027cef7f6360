//! GraphQL operation descriptors
//!
//! Field and argument names are the wire contract of the banking service
//! and must not change.

/// Query or mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// A named GraphQL document and the root field holding its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub root_field: &'static str,
    pub kind: OperationKind,
    pub document: &'static str,
}

pub const GET_ACCOUNTS: Operation = Operation {
    name: "getAccounts",
    root_field: "allComptes",
    kind: OperationKind::Query,
    document: r#"query getAccounts {
  allComptes {
    id
    solde
    dateCreation
    type
  }
}"#,
};

pub const GET_ACCOUNTS_BY_TYPE: Operation = Operation {
    name: "GetAccountsByType",
    root_field: "compteByType",
    kind: OperationKind::Query,
    document: r#"query GetAccountsByType($typeCompte: TypeCompte) {
  compteByType(typeCompte: $typeCompte) {
    id
    solde
    dateCreation
    type
  }
}"#,
};

pub const GET_ACCOUNT_BY_ID: Operation = Operation {
    name: "GetAccountById",
    root_field: "compteById",
    kind: OperationKind::Query,
    document: r#"query GetAccountById($id: ID!) {
  compteById(id: $id) {
    id
    type
    solde
    dateCreation
  }
}"#,
};

pub const GET_TRANSACTIONS_BY_ACCOUNT: Operation = Operation {
    name: "GetTransactionsByAccount",
    root_field: "compteTransaction",
    kind: OperationKind::Query,
    document: r#"query GetTransactionsByAccount($accountId: ID!) {
  compteTransaction(id: $accountId) {
    id
    montant
    typeTransaction
    dateTransaction
  }
}"#,
};

pub const ADD_ACCOUNT: Operation = Operation {
    name: "addAccount",
    root_field: "saveCompte",
    kind: OperationKind::Mutation,
    document: r#"mutation addAccount($solde: Float!, $dateCreation: String!, $type: TypeCompte!) {
  saveCompte(compte: { solde: $solde, dateCreation: $dateCreation, type: $type }) {
    id
  }
}"#,
};

pub const DELETE_ACCOUNT: Operation = Operation {
    name: "deleteAccount",
    root_field: "deleteCompte",
    kind: OperationKind::Mutation,
    document: r#"mutation deleteAccount($id: ID!) {
  deleteCompte(id: $id)
}"#,
};

pub const ADD_TRANSACTION: Operation = Operation {
    name: "addTransaction",
    root_field: "addTransaction",
    kind: OperationKind::Mutation,
    document: r#"mutation addTransaction($montant: Float!, $dateTransaction: String!, $typeTransaction: TypeTransaction!, $compteId: Int!) {
  addTransaction(transactionInput: { montant: $montant, dateTransaction: $dateTransaction, typeTransaction: $typeTransaction, compteId: $compteId }) {
    id
  }
}"#,
};
