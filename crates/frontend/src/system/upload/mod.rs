pub mod controller;
pub mod page;
pub mod transport;

pub use page::UploadPage;
