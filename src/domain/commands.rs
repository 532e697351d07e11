use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookId, BookStatus, BorrowerId};

/// コマンド：書籍を登録する
///
/// `available_copies` 省略時は `total_copies` と同数。
/// `status` は参考値で、登録時に在庫数から導出し直す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBook {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: String,
    pub total_copies: u32,
    pub available_copies: Option<u32>,
    pub status: Option<BookStatus>,
}

/// コマンド：書籍を貸し出す
///
/// `due_date` 省略時は貸出期間から求める。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowBook {
    pub book_id: BookId,
    pub borrower_name: String,
    pub borrower_id: BorrowerId,
    pub borrow_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub book_id: BookId,
    pub borrower_id: BorrowerId,
    pub returned_on: NaiveDate,
}
