use std::sync::Arc;

use crate::app::{burn_interactor::BurnInteractor, select_interactor::SelectInteractor};
use crate::ports::{LogPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn select_interactor(&self) -> Arc<SelectInteractor>;
    fn burn_interactor(&self) -> Arc<BurnInteractor>;
}

pub struct DefaultAppContainer {
    select_interactor: Arc<SelectInteractor>,
    burn_interactor: Arc<BurnInteractor>,
}

impl DefaultAppContainer {
    /// Wire the interactors around the given ports
    pub fn new(probe_port: Arc<dyn ProbePort>, log_port: Arc<dyn LogPort>) -> Self {
        let select_interactor = Arc::new(SelectInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&log_port),
        ));

        let burn_interactor = Arc::new(BurnInteractor::new(
            Arc::clone(&select_interactor),
            Arc::clone(&log_port),
        ));

        Self {
            select_interactor,
            burn_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn select_interactor(&self) -> Arc<SelectInteractor> {
        Arc::clone(&self.select_interactor)
    }

    fn burn_interactor(&self) -> Arc<BurnInteractor> {
        Arc::clone(&self.burn_interactor)
    }
}
