use serde::{Deserialize, Serialize};

use super::{
    BookAdded, BookId, BookStatus, CopyAccountingError, RegisterBookError, SearchField,
    commands::AddBook,
};

/// Book集約 - 蔵書目録の1タイトル
///
/// 冊数は集計値のみを持ち、1冊ごとの追跡は行わない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    // 識別子
    pub book_id: BookId,

    // 書誌情報
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: String,

    // 在庫管理の責務
    pub total_copies: u32,
    pub available_copies: u32,
    pub status: BookStatus,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// 貸出中の冊数
    pub fn borrowed_copies(&self) -> u32 {
        self.total_copies - self.available_copies
    }

    /// 検索項目の値
    pub fn field(&self, field: SearchField) -> &str {
        match field {
            SearchField::Title => &self.title,
            SearchField::Author => &self.author,
            SearchField::Category => &self.category,
            SearchField::Id => self.book_id.value(),
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), RegisterBookError> {
    if value.trim().is_empty() {
        return Err(RegisterBookError::BlankField(field));
    }
    Ok(())
}

/// 純粋関数：書籍を登録する
///
/// ビジネスルール：
/// - タイトル・著者・分類は必須（ISBNは任意）
/// - 冊数は1冊以上
/// - 在庫数は0以上かつ冊数以下（省略時は冊数と同じ）
/// - 状態は在庫数から導出する（指定値は採用しない）
///
/// ID重複の確認は目録を持つアプリケーション層で行う。
pub fn register_book(cmd: AddBook) -> Result<(Book, BookAdded), RegisterBookError> {
    require("title", &cmd.title)?;
    require("author", &cmd.author)?;
    require("category", &cmd.category)?;

    if cmd.total_copies == 0 {
        return Err(RegisterBookError::NoCopies);
    }

    let available_copies = cmd.available_copies.unwrap_or(cmd.total_copies);
    if available_copies > cmd.total_copies {
        return Err(RegisterBookError::AvailableExceedsTotal {
            available: available_copies,
            total: cmd.total_copies,
        });
    }

    let book = Book {
        book_id: cmd.book_id,
        title: cmd.title,
        author: cmd.author,
        isbn: cmd.isbn,
        category: cmd.category,
        total_copies: cmd.total_copies,
        available_copies,
        status: BookStatus::derive(available_copies),
    };

    let event = BookAdded {
        book_id: book.book_id.clone(),
        title: book.title.clone(),
        total_copies: book.total_copies,
        available_copies: book.available_copies,
    };

    Ok((book, event))
}

/// 純粋関数：在庫を1冊減らす
///
/// 呼び出し側が在庫を確認済みでも、0未満にならないよう防御する。
pub fn decrement_available(book: &Book) -> Result<Book, CopyAccountingError> {
    let available_copies = book
        .available_copies
        .checked_sub(1)
        .ok_or(CopyAccountingError::Exhausted)?;

    Ok(Book {
        available_copies,
        status: BookStatus::derive(available_copies),
        ..book.clone()
    })
}

/// 純粋関数：在庫を1冊増やす
pub fn increment_available(book: &Book) -> Result<Book, CopyAccountingError> {
    if book.available_copies >= book.total_copies {
        return Err(CopyAccountingError::AllCopiesOnShelf);
    }
    let available_copies = book.available_copies + 1;

    Ok(Book {
        available_copies,
        status: BookStatus::derive(available_copies),
        ..book.clone()
    })
}

/// 純粋関数：検索条件に一致するか
///
/// 大文字小文字を区別しない部分一致。`query_lowercase` は小文字化済みであること。
pub fn matches(book: &Book, field: SearchField, query_lowercase: &str) -> bool {
    book.field(field).to_lowercase().contains(query_lowercase)
}
