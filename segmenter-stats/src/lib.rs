pub mod error;
pub mod kmeans;
pub mod quantile;
pub mod scaling;
pub mod silhouette;
pub mod sweep;

pub use error::StatsError;
pub use kmeans::{KMeansConfig, KMeansFit};
pub use quantile::{iqr_fences, quantile, IqrFences};
pub use scaling::StandardScaler;
pub use silhouette::silhouette_score;
pub use sweep::{sweep_k, KDiagnostic};
