// Shape-building pipeline: one aggregation path plus the three
// independent dashboard transforms

pub mod aggregate;
pub mod flow;
pub mod hierarchy;
pub mod series;
pub mod shapes;

pub use aggregate::YearlyTotals;
pub use shapes::DashboardShapes;
