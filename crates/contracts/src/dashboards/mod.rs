pub mod d100_overview;
pub mod d101_performance;
pub mod d102_papers;
pub mod d103_students;
pub mod d104_budget;
