mod page;

pub use page::PerformanceDashboard;
