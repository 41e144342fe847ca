//! Dotted-key wire format conversion
//!
//! The emulator stores instance and global config files as flat JSON objects
//! whose keys join a section and a field with a dot:
//!
//! ```json
//! {
//!     "basicSettings.left": 0,
//!     "advancedSettings.resolution": { "width": 960, "height": 540 }
//! }
//! ```
//!
//! [`nest_dotted`] converts that wire shape into nested objects the typed
//! records deserialize from; [`flatten`] is the inverse used when saving.
//! The cache stores wire-shaped payloads untouched; only the manager codecs
//! pass through this module.

use serde_json::{Map, Value};

/// Expand dot-separated keys of a flat JSON object into nested objects.
///
/// Keys may contain more than one dot; each segment becomes one nesting
/// level. Values are carried over verbatim, so an object-valued leaf (like a
/// hotkey binding) stays a single leaf. Non-object inputs are returned
/// unchanged. If a segment collides with an earlier scalar, the scalar is
/// replaced by an object.
pub fn nest_dotted(value: Value) -> Value {
    let Value::Object(flat) = value else {
        return value;
    };

    let mut root = Map::new();
    for (key, val) in flat {
        let mut segments = key.split('.').peekable();
        let mut current = &mut root;

        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                current.insert(segment.to_string(), val);
                break;
            }

            let slot = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            current = slot.as_object_mut().expect("slot was just made an object");
        }
    }

    Value::Object(root)
}

/// Collapse one level of nesting into dot-separated keys.
///
/// Each field of a top-level section object becomes a `"section.field"` key;
/// values below that level are carried over verbatim, matching the wire
/// shape the emulator writes. Top-level scalars and non-object inputs pass
/// through unchanged.
pub fn flatten(value: Value) -> Value {
    let Value::Object(nested) = value else {
        return value;
    };

    let mut flat = Map::new();
    for (section, val) in nested {
        match val {
            Value::Object(fields) => {
                for (field, field_val) in fields {
                    flat.insert(format!("{section}.{field}"), field_val);
                }
            }
            other => {
                flat.insert(section, other);
            }
        }
    }

    Value::Object(flat)
}

// =============================================================================
// Tests
// =============================================================================
