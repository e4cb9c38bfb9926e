//! Filter engine
//!
//! A filter specification is a global verbosity cutoff plus an ordered list
//! of per-field rules. Each rule maps field values to levels: a matched value
//! raises the effective cutoff, a value absent from the mapping (or mapped
//! below zero) suppresses the event outright. Rules are an allow-list
//! refinement, not just a threshold.

use super::error::{PipelineError, Result};
use super::event::Event;
use super::fields::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Level assigned to a rule value that omits an explicit one
///
/// Deliberately above the usual global default of 0, so declaring a value in
/// a rule acts as a verbosity raise unless given an explicit low level.
pub const RULE_DEFAULT_LEVEL: i64 = 4;

/// Sentinel for "reject outright"
pub const REJECT_LEVEL: i64 = -1;

/// One per-field value-to-level override table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRule {
    pub field: String,
    pub levels: HashMap<String, i64>,
}

impl FilterRule {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            levels: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>, level: i64) -> Self {
        self.levels.insert(value.into(), level);
        self
    }
}

/// Compiled filter specification, authoritative on the root logger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    pub global_level: i64,
    /// Rule order is evaluation order
    pub rules: Vec<FilterRule>,
}

impl FilterSpec {
    pub fn new(global_level: i64) -> Self {
        Self {
            global_level,
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: FilterRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn with_global_level(mut self, level: i64) -> Self {
        self.global_level = level;
        self
    }

    /// Parse the compact textual filter grammar
    ///
    /// Clauses are separated by `/`; each clause is
    /// `key=value1:level1,value2:level2,...`. A value with an omitted level
    /// defaults to [`RULE_DEFAULT_LEVEL`]. Parsed once at setup; a malformed
    /// clause is a configuration error, never a silent default.
    ///
    /// # Examples
    ///
    /// ```
    /// use sievelog::core::FilterSpec;
    ///
    /// let spec = FilterSpec::parse("source=aws:4,web:-1/module=db").unwrap();
    /// assert_eq!(spec.rules.len(), 2);
    /// assert_eq!(spec.rules[1].levels["db"], 4);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut spec = FilterSpec::new(0);

        for clause in text.split('/').filter(|c| !c.trim().is_empty()) {
            let (key, values) = clause
                .split_once('=')
                .ok_or_else(|| PipelineError::filter_parse(clause, "missing '='"))?;

            let key = key.trim();
            if key.is_empty() {
                return Err(PipelineError::filter_parse(clause, "empty field key"));
            }

            let mut rule = FilterRule::new(key);
            for entry in values.split(',') {
                let entry = entry.trim();
                if entry.is_empty() {
                    return Err(PipelineError::filter_parse(clause, "empty value entry"));
                }
                let (value, level) = match entry.split_once(':') {
                    Some((value, level_str)) => {
                        let level = level_str.trim().parse::<i64>().map_err(|_| {
                            PipelineError::filter_parse(
                                clause,
                                format!("level '{}' is not an integer", level_str.trim()),
                            )
                        })?;
                        (value.trim(), level)
                    }
                    None => (entry, RULE_DEFAULT_LEVEL),
                };
                if value.is_empty() {
                    return Err(PipelineError::filter_parse(clause, "empty value"));
                }
                rule.levels.insert(value.to_string(), level);
            }
            spec.rules.push(rule);
        }

        Ok(spec)
    }

    /// Decide whether an event passes this filter
    ///
    /// Starts from the global level, walks the rules in declared order, and
    /// for every rule whose field is present on the event: an unmatched value
    /// rejects immediately, a matched level below zero rejects, and any other
    /// match raises the effective level. Accepts iff the event's level is at
    /// or below the effective level.
    pub fn should_emit(&self, event: &Event) -> bool {
        let mut effective = self.global_level;

        for rule in &self.rules {
            if let Some(value) = event.fields.get(&rule.field) {
                let key = field_key(value);
                match rule.levels.get(&key) {
                    None => return false,
                    Some(level) if *level <= REJECT_LEVEL => return false,
                    Some(level) => effective = effective.max(*level),
                }
            }
        }

        event.level <= effective
    }
}

/// Display form of a field value used as a rule lookup key
fn field_key(value: &FieldValue) -> String {
    match value {
        FieldValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
