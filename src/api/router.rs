use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, add_book, borrow_book, dashboard, export_books, list_active_loans,
    list_available_books, list_books, list_borrower_loans, list_borrowers, list_loans,
    list_overdue_loans, return_book, search_books,
};

/// Creates the API router with all inventory endpoints
///
/// Command endpoints (Write operations):
/// - POST /books - Add a book to the catalog
/// - POST /loans - Borrow a book
/// - POST /loans/return - Return a borrowed book
///
/// Query endpoints (Read operations):
/// - GET /dashboard - Totals and per-category counts
/// - GET /books, /books/available, /books/search, /books/export.csv
/// - GET /loans, /loans/active, /loans/overdue
/// - GET /borrowers, /borrowers/:borrower_id/loans
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/dashboard", get(dashboard))
        // Catalog
        .route("/books", get(list_books).post(add_book))
        .route("/books/available", get(list_available_books))
        .route("/books/search", get(search_books))
        .route("/books/export.csv", get(export_books))
        // Loan ledger
        .route("/loans", get(list_loans).post(borrow_book))
        .route("/loans/return", post(return_book))
        .route("/loans/active", get(list_active_loans))
        .route("/loans/overdue", get(list_overdue_loans))
        .route("/borrowers", get(list_borrowers))
        .route("/borrowers/:borrower_id/loans", get(list_borrower_loans))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
