//! Publishing a compare payload through host widget state.

use serde::{Deserialize, Serialize};
use shelf_observability::StructuredLogger;
use shelf_state::{read_path, GlobalKey, HostGlobals, WidgetState};

use crate::catalog::Product;
use crate::compare::SharedComparePayload;
use crate::CommerceError;

/// Where in `widgetState` the compare items live.
pub const COMPARE_STATE_KEY: &str = "compareWidget.items";

/// The compare slot inside widget state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompareSlot {
    #[serde(default)]
    pub items: Vec<Product>,
}

/// Widget state written on publish: `{ "compareWidget": { "items": [...] } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompareWidgetState {
    #[serde(rename = "compareWidget")]
    pub compare_widget: CompareSlot,
}

/// Hands compare payloads to the separately mounted compare widget.
pub struct CompareBridge<H> {
    state: WidgetState<CompareWidgetState, H>,
    logger: StructuredLogger,
}

impl<H: HostGlobals> CompareBridge<H> {
    pub fn new(host: H, logger: StructuredLogger) -> Self {
        Self {
            state: WidgetState::new(host),
            logger,
        }
    }

    /// Write `payload` as the whole widget state.
    ///
    /// Whatever was stored before is replaced, not merged.
    pub fn publish(&self, payload: &SharedComparePayload) -> Result<(), CommerceError> {
        let state = CompareWidgetState {
            compare_widget: CompareSlot {
                items: payload.items.clone(),
            },
        };
        self.state.set(&state)?;

        self.logger
            .info_builder("compare payload published")
            .field("key", COMPARE_STATE_KEY)
            .field_i64("items", payload.len() as i64)
            .emit();
        Ok(())
    }

    /// Most recently published payload, if the slot holds an array.
    ///
    /// Malformed entries are dropped; the result is truncated to three.
    pub fn read(&self) -> Option<SharedComparePayload> {
        let state = self.state.host().read(GlobalKey::WidgetState)?;
        let items = read_path(&state, COMPARE_STATE_KEY).filter(|v| v.is_array())?;

        let (payload, report) = SharedComparePayload::from_items_value(items);
        report.log_to(&self.logger);
        Some(payload)
    }

    pub fn host(&self) -> &H {
        self.state.host()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shelf_state::InMemoryHost;

    fn bridge(host: &InMemoryHost) -> CompareBridge<InMemoryHost> {
        CompareBridge::new(host.clone(), StructuredLogger::detached())
    }

    fn payload(ids: &[&str]) -> SharedComparePayload {
        SharedComparePayload::new(ids.iter().map(|id| Product::new(*id)).collect())
    }

    #[test]
    fn test_publish_writes_fixed_shape() {
        let host = InMemoryHost::new();
        bridge(&host).publish(&payload(&["a", "b"])).unwrap();

        assert_eq!(
            host.read(GlobalKey::WidgetState),
            Some(json!({ "compareWidget": { "items": [{ "id": "a" }, { "id": "b" }] } }))
        );
    }

    #[test]
    fn test_publish_replaces_prior_state() {
        let host = InMemoryHost::new();
        host.write_widget_state(json!({ "other": true, "compareWidget": { "items": [] } }))
            .unwrap();

        let bridge = bridge(&host);
        bridge.publish(&payload(&["a", "b", "c"])).unwrap();
        bridge.publish(&payload(&["d", "e"])).unwrap();

        let state = host.read(GlobalKey::WidgetState).unwrap();
        assert!(state.get("other").is_none());
        let read = bridge.read().unwrap();
        let ids: Vec<&str> = read.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "e"]);
    }

    #[test]
    fn test_read_without_state() {
        let host = InMemoryHost::new();
        assert!(bridge(&host).read().is_none());

        host.write_widget_state(json!({ "compareWidget": {} })).unwrap();
        assert!(bridge(&host).read().is_none());
    }

    #[test]
    fn test_read_is_lenient() {
        let host = InMemoryHost::new();
        host.write_widget_state(json!({
            "compareWidget": { "items": [{ "id": "a" }, { "name": "broken" }, { "id": "b" }] }
        }))
        .unwrap();

        let read = bridge(&host).read().unwrap();
        assert_eq!(read.len(), 2);
    }

    #[test]
    fn test_published_payload_is_detached_from_source() {
        let host = InMemoryHost::new();
        let mut source = payload(&["a", "b"]);
        bridge(&host).publish(&source).unwrap();

        source.items[0].name = Some("mutated".into());
        let read = bridge(&host).read().unwrap();
        assert_eq!(read.items[0].name, None);
    }
}
