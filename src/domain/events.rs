use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookId, BorrowerId, LoanId};

/// イベント：書籍が登録された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAdded {
    pub book_id: BookId,
    pub title: String,
    pub total_copies: u32,
    pub available_copies: u32,
}

/// イベント：書籍が貸出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookBorrowed {
    pub loan_id: LoanId,
    pub book_id: BookId,
    pub borrower_id: BorrowerId,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub available_copies: u32,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReturned {
    pub loan_id: LoanId,
    pub book_id: BookId,
    pub borrower_id: BorrowerId,
    pub returned_on: NaiveDate,
    pub was_overdue: bool,
    pub available_copies: u32,
}
