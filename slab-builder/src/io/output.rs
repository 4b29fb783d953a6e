use formwork_rs::io::ext_repr::{ExtBuildRequest, ExtPlacementReport};
use serde::{Deserialize, Serialize};

use crate::config::BuilderConfig;

#[derive(Serialize, Deserialize, Clone)]
pub struct BuildOutput {
    #[serde(flatten)]
    pub request: ExtBuildRequest,
    pub report: ExtPlacementReport,
    pub config: BuilderConfig,
}
