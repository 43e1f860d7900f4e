use contribhub_core::AggregationEngine;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<AggregationEngine>,
}

impl ApiState {
    pub fn new(engine: Arc<AggregationEngine>) -> Self {
        Self { engine }
    }
}
