/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use slog::{Record, Serializer, Value};

use crate::{LogCategory, LogComponent, LogTag};

impl Value for LogTag {
    fn serialize(
        &self,
        _record: &Record,
        key: slog::Key,
        serializer: &mut dyn Serializer,
    ) -> slog::Result {
        serializer.emit_str(key, self.as_str())
    }
}

impl Value for LogComponent {
    fn serialize(
        &self,
        _record: &Record,
        key: slog::Key,
        serializer: &mut dyn Serializer,
    ) -> slog::Result {
        serializer.emit_str(key, self.as_str())
    }
}

impl Value for LogCategory {
    fn serialize(
        &self,
        _record: &Record,
        key: slog::Key,
        serializer: &mut dyn Serializer,
    ) -> slog::Result {
        serializer.emit_str(key, self.as_str())
    }
}

/// Emits the numeric tag id instead of the name.
pub struct LtLogTagId(pub LogTag);

impl Value for LtLogTagId {
    fn serialize(
        &self,
        _record: &Record,
        key: slog::Key,
        serializer: &mut dyn Serializer,
    ) -> slog::Result {
        serializer.emit_u16(key, self.0.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use slog::{Drain, KV, Logger, Never, OwnedKVList, slog_info, slog_o};

    #[derive(Default)]
    struct CaptureSerializer {
        values: Vec<String>,
    }

    impl Serializer for CaptureSerializer {
        fn emit_arguments(&mut self, _key: slog::Key, val: &fmt::Arguments) -> slog::Result {
            self.values.push(val.to_string());
            Ok(())
        }
    }

    struct CaptureDrain {
        values: Arc<Mutex<Vec<String>>>,
    }

    impl Drain for CaptureDrain {
        type Ok = ();
        type Err = Never;

        fn log(&self, record: &Record, _values: &OwnedKVList) -> Result<(), Never> {
            let mut serializer = CaptureSerializer::default();
            let _ = record.kv().serialize(record, &mut serializer);
            self.values.lock().unwrap().extend(serializer.values);
            Ok(())
        }
    }

    #[test]
    fn serialize() {
        let values = Arc::new(Mutex::new(Vec::new()));
        let drain = CaptureDrain {
            values: Arc::clone(&values),
        };
        let logger = Logger::root(drain, slog_o!());

        slog_info!(logger, "";
            "log_tag" => LogTag::SmtpResponse,
            "log_tag_id" => LtLogTagId(LogTag::SmtpResponse),
            "log_component" => LogComponent::Smtp,
            "log_category" => LogCategory::Response,
        );

        let mut values = values.lock().unwrap().clone();
        values.sort();
        assert_eq!(values, ["107", "response", "smtp", "smtp.response"]);
    }
}
