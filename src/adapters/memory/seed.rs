use crate::domain::{commands::AddBook, value_objects::BookId};

/// 起動時に投入する初期蔵書
///
/// (ID, タイトル, 著者, ISBN, 分類, 冊数)
const SEED_BOOKS: [(&str, &str, &str, &str, &str, u32); 3] = [
    (
        "B001",
        "Python Programming",
        "John Smith",
        "978-1234567890",
        "Programming",
        5,
    ),
    (
        "B002",
        "Data Science Handbook",
        "Jane Doe",
        "978-0987654321",
        "Data Science",
        3,
    ),
    (
        "B003",
        "Web Development Guide",
        "Mike Johnson",
        "978-1122334455",
        "Web Development",
        7,
    ),
];

/// 初期蔵書の登録コマンドを返す（全冊が書架にある状態）
pub fn seed_books() -> Vec<AddBook> {
    SEED_BOOKS
        .iter()
        .filter_map(|&(id, title, author, isbn, category, copies)| {
            Some(AddBook {
                book_id: BookId::new(id).ok()?,
                title: title.to_string(),
                author: author.to_string(),
                isbn: isbn.to_string(),
                category: category.to_string(),
                total_copies: copies,
                available_copies: Some(copies),
                status: None,
            })
        })
        .collect()
}
