mod page;

pub use page::StudentsDashboard;
