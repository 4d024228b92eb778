// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::Evaluator;
use crate::observability::{LogLevel, Logger};
use crate::register::Transformable;
use crate::traits::{Component, ComponentResult, Outcome};

const RULE: &str = "----------------------------------------";

/// Log a framed message, optionally with the current register. The register
/// passes through unchanged.
///
/// Without an explicit [`Logger`] the message goes through the active
/// evaluator, prefixed with its name and subject to its level threshold.
#[derive(Debug, Clone)]
pub struct Log {
    name: String,
    level: LogLevel,
    logger: Option<Logger>,
    message: String,
    open: String,
    close: String,
    include_input_data: bool,
}

impl Log {
    pub fn new(level: LogLevel) -> Self {
        Self {
            name: "Log".to_string(),
            level,
            logger: None,
            message: String::new(),
            open: RULE.to_string(),
            close: RULE.to_string(),
            include_input_data: true,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Lines written before and after the message.
    pub fn frame(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.open = open.into();
        self.close = close.into();
        self
    }

    pub fn include_input_data(mut self, include: bool) -> Self {
        self.include_input_data = include;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn create_message(&self, register: &Transformable) -> String {
        if self.include_input_data {
            format!("{}\n{}\n{}\n{}", self.open, self.message, register, self.close)
        } else {
            format!("{}\n{}\n{}", self.open, self.message, self.close)
        }
    }
}

impl Component for Log {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn call(&self, input: Transformable, evaluator: &Evaluator) -> ComponentResult {
        let message = self.create_message(&input);
        match &self.logger {
            Some(logger) => logger.log(self.level, &message),
            None => evaluator.log(self.level, message),
        }
        Ok(Outcome::Next(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::observability::capture::capture_logs;
    use crate::register::Record;

    #[test]
    fn test_explicit_logger_threshold() {
        let log = Log::new(LogLevel::Debug)
            .logger(Logger::new("TEST", LogLevel::Debug))
            .message("OK")
            .include_input_data(false);
        let output = capture_logs(|| {
            log.run(Record::new()).unwrap();
        });
        assert!(output.contains("OK"));
        assert!(output.contains("logger=\"TEST\""));

        let quiet = log.clone().logger(Logger::new("TEST", LogLevel::Error));
        let output = capture_logs(|| {
            quiet.run(Record::new()).unwrap();
        });
        assert_eq!(output, "");
    }

    #[test]
    fn test_evaluator_level_filters() {
        let schema = Log::new(LogLevel::Info)
            .message("OK")
            .then(Log::new(LogLevel::Debug).message("HIDDEN"))
            .then(Log::new(LogLevel::Error).message("NICE"));
        let evaluator = Evaluator::new(schema)
            .with_name("TestEvaluator")
            .with_log_level(LogLevel::Info);

        let output = capture_logs(|| {
            evaluator.run(Record::new()).unwrap();
        });
        assert!(output.contains("TestEvaluator: "));
        assert!(output.contains("OK"));
        assert!(!output.contains("HIDDEN"));
        assert!(output.contains("NICE"));
    }

    #[test]
    fn test_register_is_rendered_and_returned() {
        let log = Log::new(LogLevel::Info).message("state");
        let input = Transformable::new(json!({"a": 1}).as_object().cloned().unwrap());
        assert!(log.create_message(&input).contains("Transformable({\"a\":1})"));

        let output = capture_logs(|| {
            assert_eq!(log.run(input.clone().extract()).unwrap(), input.clone().extract());
        });
        assert!(output.contains("state"));
    }
}
