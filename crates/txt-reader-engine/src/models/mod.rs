pub mod novel_file;

pub use novel_file::NovelFile;
