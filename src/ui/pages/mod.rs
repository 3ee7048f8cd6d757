pub mod methods;
pub mod optimizer;
pub mod stations;

pub use methods::MethodsPage;
pub use optimizer::OptimizerPage;
pub use stations::StationsPage;
