//! Dual text/slider editing of one numeric property.
//!
//! The record value is the single source of truth. The text box is a cached
//! projection of it that is only pulled forward when the value changes
//! through some path other than parsing that same text. A field remembers
//! the last value it observed and compares against it instead of re-deriving
//! text on every keystroke, so partially typed input such as `"12."` or
//! `"-"` is never overwritten while the operator is still typing.
//!
//! ```text
//!   text edit ──parse──→ commit ──→ RecordCell::replace_with
//!   slider    ──round2─→ commit ──→ RecordCell::replace_with
//!   external change ──→ on_external_value_changed ──→ resync text
//! ```

use serde::{Deserialize, Serialize};

use crate::numeric::{canonical_string, parse_finite, parse_float_prefix, round2};
use crate::params::{NumericRecord, ParamId, ParamKey, SliderBounds};
use crate::store::RecordCell;

/// Text and slider surfaces bound to one key of a numeric record.
#[derive(Debug, Clone)]
pub struct NumericSyncField<K> {
    key: K,
    bounds: SliderBounds,
    text: String,
    last_observed: f64,
}

impl<K: ParamKey> NumericSyncField<K> {
    /// Bind a field to `key`, seeding the text from the record's current value.
    pub fn new<R: NumericRecord<Key = K>>(key: K, record: &R) -> Self {
        let value = record.get(key);
        Self {
            key,
            bounds: key.bounds(),
            text: canonical_string(value),
            last_observed: value,
        }
    }

    pub fn key(&self) -> K {
        self.key
    }

    pub fn bounds(&self) -> SliderBounds {
        self.bounds
    }

    /// The text currently displayed, which may not parse.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text box edit. The text is always kept as typed; a finite parse of its
    /// numeric prefix is committed to the record.
    ///
    /// Returns `true` when a value was committed.
    pub fn on_text_edited<R: NumericRecord<Key = K>>(
        &mut self,
        cell: &mut RecordCell<R>,
        raw: &str,
    ) -> bool {
        self.text.clear();
        self.text.push_str(raw);

        let Some(value) = parse_finite(raw) else {
            tracing::debug!("{}: holding unparsed text {raw:?}", self.key.label());
            return false;
        };
        self.commit(cell, value);
        true
    }

    /// Slider drag. The slider enforces its own bounds; the value is rounded
    /// to two decimals, committed, and the text follows it.
    ///
    /// Returns the committed value.
    pub fn on_slider_moved<R: NumericRecord<Key = K>>(
        &mut self,
        cell: &mut RecordCell<R>,
        value: f64,
    ) -> f64 {
        let rounded = round2(value);
        self.text = canonical_string(rounded);
        self.commit(cell, rounded);
        rounded
    }

    /// The record value changed through some other path (reset, color pick).
    ///
    /// Text that already reads as `value` is left alone, otherwise it is
    /// replaced by the canonical form of `value`. Returns `true` on resync.
    pub fn on_external_value_changed(&mut self, value: f64) -> bool {
        self.last_observed = value;
        if parse_float_prefix(&self.text) == Some(value) {
            return false;
        }
        tracing::debug!(
            "{}: resync text {:?} -> {value}",
            self.key.label(),
            self.text
        );
        self.text = canonical_string(value);
        true
    }

    /// Resync against `record` if its value moved since this field last saw it.
    pub fn observe<R: NumericRecord<Key = K>>(&mut self, record: &R) -> bool {
        let value = record.get(self.key);
        if value == self.last_observed {
            return false;
        }
        self.on_external_value_changed(value)
    }

    /// `true` while the displayed text differs from the canonical form of
    /// `value` (invalid or in-progress input).
    pub fn text_error(&self, value: f64) -> bool {
        self.text != canonical_string(value)
    }

    /// Presentation state for this field against `record`.
    pub fn view<R: NumericRecord<Key = K>>(&self, record: &R) -> FieldView
    where
        K: Into<ParamId>,
    {
        let value = record.get(self.key);
        FieldView {
            param: self.key.into(),
            label: self.key.label().to_string(),
            value,
            text: self.text.clone(),
            text_error: self.text_error(value),
            min: self.bounds.min,
            max: self.bounds.max,
            step: self.bounds.step,
        }
    }

    fn commit<R: NumericRecord<Key = K>>(&mut self, cell: &mut RecordCell<R>, value: f64) {
        let key = self.key;
        if cell.replace_with(|record| record.with(key, value)) {
            tracing::debug!("{}: committed {value}", key.label());
        }
        self.last_observed = value;
    }
}

/// What a presentation layer needs to draw one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub param: ParamId,
    pub label: String,
    pub value: f64,
    pub text: String,
    pub text_error: bool,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}
