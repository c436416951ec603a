use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shared key-value state threaded through a run.
///
/// Context variables are visible to instruction rendering and are injected
/// into any tool that declares the reserved `context_variables` parameter.
/// Tools feed updates back through [`ToolResult`](crate::tool::ToolResult);
/// updates merge shallowly, last writer wins per key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextVariables(Map<String, Value>);

impl ContextVariables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Shallow merge: keys from `updates` overwrite existing keys.
    pub fn merge(&mut self, updates: ContextVariables) {
        self.0.extend(updates.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The underlying JSON object, for handing to a tool argument slot.
    pub fn as_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for ContextVariables {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ContextVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_last_writer_wins() {
        let mut ctx: ContextVariables = [("a", "1"), ("b", "2")].into_iter().collect();
        let updates: ContextVariables = [("b", "3"), ("c", "4")].into_iter().collect();
        ctx.merge(updates);
        assert_eq!(ctx.get("a"), Some(&Value::from("1")));
        assert_eq!(ctx.get("b"), Some(&Value::from("3")));
        assert_eq!(ctx.get("c"), Some(&Value::from("4")));
    }

    #[test]
    fn serializes_as_plain_object() {
        let ctx: ContextVariables = [("user", "jane")].into_iter().collect();
        let json = serde_json::to_string(&ctx).unwrap();
        assert_eq!(json, r#"{"user":"jane"}"#);
    }
}
