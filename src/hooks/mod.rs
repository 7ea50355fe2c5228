//! Built-in hooks
//!
//! Both hooks rewrite object- and array-typed arguments in place and leave
//! every other argument untouched. They are meant as `before_hooks` entries.

use crate::core::{Hook, LogEvent, LogValue, Result};
use async_trait::async_trait;

fn is_structured(value: &LogValue) -> bool {
    value.is_object() || value.is_array()
}

/// Replaces every object- or array-typed argument with its compact JSON text.
///
/// Useful when the downstream console renders plain strings more faithfully
/// than live objects.
pub struct StringifyObjectsHook;

#[async_trait]
impl Hook for StringifyObjectsHook {
    async fn run(&self, event: &mut LogEvent) -> Result<()> {
        for arg in &mut event.args {
            if is_structured(arg) {
                *arg = LogValue::String(serde_json::to_string(arg)?);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "stringify_objects"
    }
}

/// Serializes then deserializes every object- or array-typed argument,
/// leaving a deep clone that is structurally equal to the original.
///
/// This detaches logged values from any shared state a later hook might
/// otherwise observe mid-mutation.
pub struct StringifyAndParseObjectsHook;

#[async_trait]
impl Hook for StringifyAndParseObjectsHook {
    async fn run(&self, event: &mut LogEvent) -> Result<()> {
        for arg in &mut event.args {
            if is_structured(arg) {
                let text = serde_json::to_string(arg)?;
                *arg = serde_json::from_str(&text)?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "stringify_and_parse_objects"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use serde_json::json;

    #[tokio::test]
    async fn test_stringify_objects() {
        let mut event = LogEvent::new(LogLevel::Info, vec![json!({"name": "testObject"})]);
        StringifyObjectsHook.run(&mut event).await.unwrap();
        assert_eq!(event.args, vec![json!("{\"name\":\"testObject\"}")]);
    }

    #[tokio::test]
    async fn test_stringify_skips_non_objects() {
        let mut event = LogEvent::new(LogLevel::Info, vec![json!("test"), json!(7)]);
        StringifyObjectsHook.run(&mut event).await.unwrap();
        assert_eq!(event.args, vec![json!("test"), json!(7)]);
    }

    #[tokio::test]
    async fn test_stringify_handles_arrays() {
        let mut event = LogEvent::new(LogLevel::Info, vec![json!([1, 2])]);
        StringifyObjectsHook.run(&mut event).await.unwrap();
        assert_eq!(event.args, vec![json!("[1,2]")]);
    }

    #[tokio::test]
    async fn test_stringify_and_parse_round_trips() {
        let original = json!({"name": "testObject", "nested": {"n": 1}});
        let mut event = LogEvent::new(LogLevel::Info, vec![original.clone()]);
        StringifyAndParseObjectsHook.run(&mut event).await.unwrap();
        assert_eq!(event.args, vec![original]);
    }

    #[tokio::test]
    async fn test_stringify_and_parse_skips_non_objects() {
        let mut event = LogEvent::new(LogLevel::Info, vec![json!("test")]);
        StringifyAndParseObjectsHook.run(&mut event).await.unwrap();
        assert_eq!(event.args, vec![json!("test")]);
    }
}
