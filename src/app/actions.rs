//! Application actions (side effects requested by App, drained by the runtime).

use crate::api::models::QueryPayload;

/// Context identifying the instance an operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceContext {
    pub instance_id: String,
    pub instance_name: String,
    pub cluster_id: String,
    pub region: String,
}

/// Actions that require the runtime to perform side effects.
#[derive(Debug, Clone)]
pub enum AppAction {
    FetchInstances,
    FetchQueries { instance_id: String },
    SaveQuery { context: InstanceContext, query: QueryPayload },
    DeleteQuery { context: InstanceContext, query: QueryPayload },
    DeleteInstance { context: InstanceContext },
    SaveConfig,
}
