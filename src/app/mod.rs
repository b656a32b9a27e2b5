// Application layer - Use case interactors

pub mod burn_interactor;
pub mod container;
pub mod select_interactor;

// Re-export interactors
pub use burn_interactor::{BurnInteractor, BurnRequest, BurnResponse};
pub use container::{AppContainer, DefaultAppContainer};
pub use select_interactor::{
    BatchEntry, BatchOutcome, BatchReport, BatchRequest, SelectInteractor, SelectRequest,
    SelectResponse,
};
