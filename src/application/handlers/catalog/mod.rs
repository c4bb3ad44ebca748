//! Catalog query handlers.

mod list_stage_scenarios;

pub use list_stage_scenarios::{
    ListStageScenariosError, ListStageScenariosHandler, ListStageScenariosQuery,
    StageScenariosView,
};
