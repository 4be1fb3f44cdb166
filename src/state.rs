use crate::source::MaterialSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<MaterialSource>,
}

impl AppState {
    pub fn new(source: MaterialSource) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}
