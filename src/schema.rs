use std::collections::HashSet;

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::tool::{Tool, CONTEXT_VARIABLES};

/// Translate a tool definition into the provider-facing JSON schema.
///
/// Every declared parameter is advertised as type "string" (no deeper type
/// inference), and `required` lists the parameters without defaults. The
/// reserved shared-context parameter is stripped from both `properties` and
/// `required` regardless of where it was declared, so the model never sees
/// the internal context-passing mechanism and cannot fabricate context.
///
/// Translation is pure: the same tool always yields a structurally identical
/// schema.
pub fn tool_schema(tool: &Tool) -> Result<Value> {
    if tool.name.is_empty() {
        return Err(Error::InvalidArgument("tool has an empty name".into()));
    }

    let mut seen = HashSet::new();
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for param in &tool.parameters {
        if !seen.insert(param.name.as_str()) {
            return Err(Error::InvalidArgument(format!(
                "tool {} declares parameter {} twice",
                tool.name, param.name
            )));
        }
        if param.name == CONTEXT_VARIABLES {
            continue;
        }
        properties.insert(param.name.clone(), json!({"type": "string"}));
        if param.required {
            required.push(Value::from(param.name.clone()));
        }
    }

    Ok(json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            },
        },
    }))
}
