//! Bolna MCP Tool Service
//!
//! Exposes the operation catalog as Model Context Protocol tools. Each tool
//! deserializes its arguments, builds an [`Operation`] and makes one upstream
//! call through the shared [`BolnaApi`] client. One service instance is
//! created per client session; the client itself is shared.

use crate::{
    catalog::{self, Operation},
    upstream::BolnaApi,
};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

// --- Data Structures for Tools ---

#[derive(Deserialize, JsonSchema, Debug)]
pub struct CreateAgentArgs {
    /// The name of the agent.
    pub agent_name: String,
    #[schemars(description = "The type of the agent (e.g., \"other\").")]
    pub agent_type: String,
    /// The welcome message for the agent.
    pub agent_welcome_message: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct AgentIdArgs {
    /// The ID of the agent.
    pub agent_id: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct UpdateAgentArgs {
    /// The ID of the agent to update.
    pub agent_id: String,
    #[schemars(description = "The updated configuration for the agent, sent to Bolna unchanged.")]
    pub agent_config: Map<String, Value>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ExecuteAgentArgs {
    /// The ID of the agent to execute.
    pub agent_id: String,
    #[schemars(description = "The data to execute the agent with, sent to Bolna unchanged.")]
    pub execution_data: Map<String, Value>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ExecutionIdArgs {
    /// The ID of the execution to check the status of.
    pub execution_id: String,
}

// --- Service and Handler Implementation ---

/// MCP service offering the Bolna voice-agent tools.
pub struct BolnaService {
    api: Arc<dyn BolnaApi>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for BolnaService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "BolnaVoiceAI".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Manage and run Bolna voice AI agents: create, list, fetch, update, delete and \
                 execute agents, and check the status of executions."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

#[tool_router]
impl BolnaService {
    pub fn new(api: Arc<dyn BolnaApi>) -> Self {
        Self {
            api,
            tool_router: Self::tool_router(),
        }
    }

    /// Runs one catalog operation and wraps the outcome as a tool result.
    ///
    /// Upstream failures become an `isError` result rather than a protocol
    /// error, so the session carries on.
    async fn dispatch(&self, operation: Operation) -> Result<CallToolResult, McpError> {
        match catalog::invoke(self.api.as_ref(), &operation).await {
            Ok(value) => Ok(CallToolResult::success(vec![Content::json(value)?])),
            Err(e) => {
                info!(tool = operation.name(), "Tool reported upstream failure");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Bolna API request failed: {}",
                    e
                ))]))
            }
        }
    }

    #[tool(description = "Create a new voice AI agent with only the required fields.")]
    pub async fn create_agent(
        &self,
        args: Parameters<CreateAgentArgs>,
    ) -> Result<CallToolResult, McpError> {
        let CreateAgentArgs {
            agent_name,
            agent_type,
            agent_welcome_message,
        } = args.0;
        self.dispatch(Operation::CreateAgent {
            agent_name,
            agent_type,
            agent_welcome_message,
        })
        .await
    }

    #[tool(description = "Retrieve all voice AI agents.")]
    pub async fn get_agents(&self) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::GetAgents).await
    }

    #[tool(description = "Retrieve a specific voice AI agent by ID.")]
    pub async fn get_agent(
        &self,
        args: Parameters<AgentIdArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::GetAgent {
            agent_id: args.0.agent_id,
        })
        .await
    }

    #[tool(description = "Update an existing voice AI agent.")]
    pub async fn update_agent(
        &self,
        args: Parameters<UpdateAgentArgs>,
    ) -> Result<CallToolResult, McpError> {
        let UpdateAgentArgs {
            agent_id,
            agent_config,
        } = args.0;
        self.dispatch(Operation::UpdateAgent {
            agent_id,
            agent_config,
        })
        .await
    }

    /// A failed upstream delete is still reported as `{"status": "deleted"}`.
    #[tool(description = "Delete a voice AI agent.")]
    pub async fn delete_agent(
        &self,
        args: Parameters<AgentIdArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::DeleteAgent {
            agent_id: args.0.agent_id,
        })
        .await
    }

    #[tool(description = "Execute a voice AI agent.")]
    pub async fn execute_agent(
        &self,
        args: Parameters<ExecuteAgentArgs>,
    ) -> Result<CallToolResult, McpError> {
        let ExecuteAgentArgs {
            agent_id,
            execution_data,
        } = args.0;
        self.dispatch(Operation::ExecuteAgent {
            agent_id,
            execution_data,
        })
        .await
    }

    #[tool(description = "Retrieve the status of a specific execution.")]
    pub async fn get_execution_status(
        &self,
        args: Parameters<ExecutionIdArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::GetExecutionStatus {
            execution_id: args.0.execution_id,
        })
        .await
    }
}
