//! Book Commands

use crate::domain::book::BookId;

/// 上传书籍命令
///
/// `data` 为空表示调用方没有提供文件
#[derive(Debug, Clone, Default)]
pub struct UploadBook {
    /// 上传的文件名，仅用于日志
    pub file_name: Option<String>,
    pub data: Option<Vec<u8>>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub language_id: Option<String>,
}

/// 删除书籍命令
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub book_id: BookId,
}
