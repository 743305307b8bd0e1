//! Memory Layer - In-Memory State Management
//!
//! 实现 BookRepository，进程内保存已摄取的书籍

mod book_repository;

pub use book_repository::InMemoryBookRepository;
