use serde_json::{Value, json};

/// Builds the minimal agent configuration accepted by `POST /agent`.
///
/// Only the name, type and welcome message vary. The single conversation task
/// is pre-seeded with a `simple_llm_agent` that has one "general" intent
/// route, a parallel single-stage toolchain, and the default call behavior
/// (hang up after 10s of silence, 400ms incremental delay, interruption after
/// 2 words).
pub fn required_agent_config(
    agent_name: &str,
    agent_type: &str,
    agent_welcome_message: &str,
) -> Value {
    json!({
        "agent_config": {
            "agent_name": agent_name,
            "agent_type": agent_type,
            "agent_welcome_message": agent_welcome_message,
            "tasks": [
                {
                    "task_type": "conversation",
                    "tools_config": {
                        "llm_agent": {
                            "agent_type": "simple_llm_agent",
                            "agent_flow_type": "streaming",
                            "routes": {
                                "embedding_model": "snowflake/snowflake-arctic-embed-m",
                                "routes": [
                                    {
                                        "route_name": "general",
                                        "utterances": [
                                            "How are you?",
                                            "What's up?"
                                        ],
                                        "response": "Hello! How can I assist you today?",
                                        "score_threshold": 0.9
                                    }
                                ]
                            }
                        }
                    },
                    "toolchain": {
                        "execution": "parallel",
                        "pipelines": [
                            ["llm_agent"]
                        ]
                    },
                    "task_config": {
                        "hangup_after_silence": 10,
                        "incremental_delay": 400,
                        "number_of_words_for_interruption": 2
                    }
                }
            ]
        }
    })
}
