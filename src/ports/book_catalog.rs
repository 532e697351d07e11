use crate::domain::{book::Book, value_objects::BookId};

/// 蔵書目録ポート
///
/// 書籍の保存と取得を抽象化する。登録順を保持し、削除はない。
/// ID重複の判定はアプリケーション層が `get` で行う。
pub trait BookCatalog: Send {
    /// IDで書籍を取得する
    fn get(&self, book_id: &BookId) -> Option<&Book>;

    /// 書籍を保存する
    ///
    /// 同じIDがあれば置き換え（位置は維持）、なければ末尾に追加する。
    fn save(&mut self, book: Book);

    /// 登録順に全書籍を返す
    fn books(&self) -> Box<dyn Iterator<Item = &Book> + '_>;

    /// 登録タイトル数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
