pub mod book_catalog;
pub mod loan_ledger;

pub use book_catalog::*;
pub use loan_ledger::*;
