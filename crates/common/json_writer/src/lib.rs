//! Incremental JSON text writer.
//!
//! Keys and strings are always encoded with `serde_json`, while
//! [JsonWriter::write_literal] copies a caller-provided token as-is.
//! The [JsonNode] tree sits on top of the writer for payloads that mix
//! regular values with such verbatim tokens.

mod node;

pub use node::JsonNode;

use std::num::FpCategory;

#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    buffer: Vec<u8>,
    needs_separator: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum JsonWriterError {
    #[error("JsonWriter produced invalid UTF8 string")]
    InvalidUtf8Conversion(#[from] std::string::FromUtf8Error),

    #[error("Serde Json error")]
    FromSerdeJson(#[from] serde_json::Error),

    #[error("Invalid f64 value {value:?}")]
    InvalidF64Value { value: f64 },
}

impl JsonWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            needs_separator: false,
        }
    }

    pub fn write_key(&mut self, key: &str) -> Result<(), JsonWriterError> {
        self.maybe_separate();
        serde_json::to_writer(&mut self.buffer, key)?;
        self.buffer.push(b':');
        self.needs_separator = false;
        Ok(())
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), JsonWriterError> {
        self.maybe_separate();
        serde_json::to_writer(&mut self.buffer, s)?;
        self.needs_separator = true;
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<(), JsonWriterError> {
        match value.classify() {
            FpCategory::Normal | FpCategory::Zero | FpCategory::Subnormal => {
                self.maybe_separate();
                serde_json::to_writer(&mut self.buffer, &value)?;
                self.needs_separator = true;
                Ok(())
            }
            FpCategory::Infinite | FpCategory::Nan => {
                Err(JsonWriterError::InvalidF64Value { value })
            }
        }
    }

    pub fn write_number(&mut self, value: &serde_json::Number) -> Result<(), JsonWriterError> {
        self.maybe_separate();
        serde_json::to_writer(&mut self.buffer, value)?;
        self.needs_separator = true;
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_literal(if value { "true" } else { "false" });
    }

    pub fn write_null(&mut self) {
        self.write_literal("null");
    }

    /// Append `token` without any escaping nor validation.
    ///
    /// The produced text is valid JSON only if `token` is itself a JSON value.
    pub fn write_literal(&mut self, token: &str) {
        self.maybe_separate();
        self.buffer.extend_from_slice(token.as_bytes());
        self.needs_separator = true;
    }

    pub fn write_open_obj(&mut self) {
        self.maybe_separate();
        self.buffer.push(b'{');
    }

    pub fn write_close_obj(&mut self) {
        self.buffer.push(b'}');
        self.needs_separator = true;
    }

    pub fn write_open_array(&mut self) {
        self.maybe_separate();
        self.buffer.push(b'[');
    }

    pub fn write_close_array(&mut self) {
        self.buffer.push(b']');
        self.needs_separator = true;
    }

    pub fn into_string(self) -> Result<String, JsonWriterError> {
        Ok(String::from_utf8(self.buffer)?)
    }

    fn maybe_separate(&mut self) {
        if self.needs_separator {
            self.buffer.push(b',');
            self.needs_separator = false;
        }
    }
}
