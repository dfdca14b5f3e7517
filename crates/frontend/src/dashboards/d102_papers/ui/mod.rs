mod page;

pub use page::PapersDashboard;
