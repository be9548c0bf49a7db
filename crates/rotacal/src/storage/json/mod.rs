mod repository;

pub use repository::JsonFileRepository;
