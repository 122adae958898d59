pub mod constant_degree;
pub mod directed;
pub mod traits;

pub use constant_degree::ConstantDegree;
pub use directed::DirectedGraph;
pub use traits::{Graph, MutableGraph};
