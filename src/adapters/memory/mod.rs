pub mod book_catalog;
pub mod loan_ledger;
pub mod seed;

pub use book_catalog::BookCatalog;
pub use loan_ledger::LoanLedger;
pub use seed::seed_books;
