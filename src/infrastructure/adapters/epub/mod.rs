//! EPUB Adapter
//!
//! 实现 ContainerReaderPort，基于 `epub` crate 读取 OPF 元数据、导航树、阅读顺序与封面

mod epub_reader;

pub use epub_reader::EpubContainerReader;
