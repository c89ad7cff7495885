pub mod metrics;
pub mod supervity;

pub use metrics::{get_metrics, init_metrics};
pub use supervity::{DocumentQuery, QueryError, SupervityClient};
