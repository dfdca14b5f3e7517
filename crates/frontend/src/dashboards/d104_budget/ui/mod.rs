mod page;

pub use page::BudgetDashboard;
