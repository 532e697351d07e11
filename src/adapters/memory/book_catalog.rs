use crate::domain::{book::Book, value_objects::BookId};
use crate::ports::book_catalog::BookCatalog as BookCatalogTrait;

/// BookCatalogのインメモリ実装
///
/// 登録順を保つため `Vec` で保持する。セッション終了で破棄される。
#[derive(Debug, Default)]
pub struct BookCatalog {
    books: Vec<Book>,
}

impl BookCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookCatalogTrait for BookCatalog {
    fn get(&self, book_id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| &b.book_id == book_id)
    }

    fn save(&mut self, book: Book) {
        match self.books.iter_mut().find(|b| b.book_id == book.book_id) {
            Some(existing) => *existing = book,
            None => self.books.push(book),
        }
    }

    fn books(&self) -> Box<dyn Iterator<Item = &Book> + '_> {
        Box::new(self.books.iter())
    }

    fn len(&self) -> usize {
        self.books.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookStatus;

    fn book(id: &str, available: u32) -> Book {
        Book {
            book_id: BookId::new(id).unwrap(),
            title: format!("Title {}", id),
            author: "Author".to_string(),
            isbn: String::new(),
            category: "Other".to_string(),
            total_copies: 2,
            available_copies: available,
            status: BookStatus::derive(available),
        }
    }

    #[test]
    fn test_save_appends_in_insertion_order() {
        let mut catalog = BookCatalog::new();
        catalog.save(book("B2", 2));
        catalog.save(book("B1", 2));

        let ids: Vec<&str> = catalog.books().map(|b| b.book_id.value()).collect();
        assert_eq!(ids, vec!["B2", "B1"]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_save_replaces_in_place() {
        let mut catalog = BookCatalog::new();
        catalog.save(book("B1", 2));
        catalog.save(book("B2", 2));
        catalog.save(book("B1", 0));

        let first = catalog.books().next().unwrap();
        assert_eq!(first.book_id.value(), "B1");
        assert_eq!(first.available_copies, 0);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_get_unknown_returns_none() {
        let catalog = BookCatalog::new();
        assert!(catalog.get(&BookId::new("B9").unwrap()).is_none());
        assert!(catalog.is_empty());
    }
}
