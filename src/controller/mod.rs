pub mod advisor;

use anyhow::Result;
use std::sync::Arc;

use crate::classifier::build_classifier;
use crate::config::Config;
use crate::optimizer::TiltOptimizer;

pub use advisor::TiltAdvisor;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub advisor: Arc<TiltAdvisor>,
}

impl AppState {
    /// Construct the classifier client once and inject it into the advisor
    pub fn new(cfg: Config) -> Result<Self> {
        let classifier = build_classifier(&cfg.classifier)?;
        let advisor = Arc::new(TiltAdvisor::new(
            classifier,
            TiltOptimizer::default(),
            cfg.classifier.timeout(),
        ));
        Ok(Self { cfg, advisor })
    }

    pub fn with_advisor(cfg: Config, advisor: TiltAdvisor) -> Self {
        Self {
            cfg,
            advisor: Arc::new(advisor),
        }
    }
}
