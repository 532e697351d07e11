mod catalog_service;
mod errors;
mod library;
mod loan_service;
mod overdue_detection;
mod reports;

pub use catalog_service::{
    add_book, find_book, list_available_books, list_books, search_books,
};
pub use errors::{LibraryError, Result};
pub use library::Library;
pub use loan_service::{
    borrow_book, list_active_loans, list_active_loans_for_borrower, list_borrower_ids,
    list_loans, list_loans_by_status, return_book,
};
pub use overdue_detection::list_overdue_loans;
pub use reports::{CSV_HEADER, CategoryCount, DashboardSummary, dashboard, export_catalog_csv};
