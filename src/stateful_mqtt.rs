// ABOUTME: Function provider publishing a caller-supplied numeric state to an MQTT topic
// ABOUTME: Declares one constrained "state" argument; missing-argument handling is a config policy
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::bus::MessageBus;
use crate::types::{
    ArgumentSchema, ArgumentValues, BridgeError, FunctionArgument, FunctionProvider,
};

/// Name of the single declared argument
const STATE_ARGUMENT: &str = "state";

/// What to do when a caller omits the `state` argument
///
/// The original deployment silently ignored the call (lenient toward sloppy
/// voice-assistant callers); `reject` turns the omission into a hard error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingStatePolicy {
    /// Log a warning and report success without publishing
    #[default]
    Ignore,
    /// Fail the invocation
    Reject,
}

/// Render an argument value as an MQTT payload
///
/// Integral values print without a fractional part, so `1.0` publishes `"1"`.
/// Values outside the i64 range keep their float rendering.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 2f64.powi(63) {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Function provider for set-style actions (e.g. "set lights to on")
///
/// Declares exactly one argument named `state` whose constraints come from
/// configuration. `invoke` stringifies the supplied value and publishes it
/// to the configured topic; publish errors propagate.
pub struct StatefulMqttFunctionProvider {
    name: String,
    description: String,
    arguments: ArgumentSchema,
    bus: Arc<dyn MessageBus>,
    topic: String,
    on_missing_state: MissingStatePolicy,
}

impl StatefulMqttFunctionProvider {
    /// Create a provider publishing the `state` value to `topic`
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        state_argument: FunctionArgument,
        bus: Arc<dyn MessageBus>,
        topic: impl Into<String>,
        on_missing_state: MissingStatePolicy,
    ) -> Self {
        let mut arguments = ArgumentSchema::new();
        arguments.insert(STATE_ARGUMENT.to_owned(), state_argument);
        Self {
            name: name.into(),
            description: description.into(),
            arguments,
            bus,
            topic: topic.into(),
            on_missing_state,
        }
    }
}

#[async_trait]
impl FunctionProvider for StatefulMqttFunctionProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn arguments(&self) -> &ArgumentSchema {
        &self.arguments
    }

    async fn invoke(&self, values: &ArgumentValues) -> Result<(), BridgeError> {
        let Some(state) = values.get(STATE_ARGUMENT) else {
            return match self.on_missing_state {
                MissingStatePolicy::Ignore => {
                    warn!(function = %self.name, "Called without 'state' argument, ignoring");
                    Ok(())
                }
                MissingStatePolicy::Reject => Err(BridgeError::internal(format!(
                    "Function '{}' requires a 'state' argument",
                    self.name
                ))),
            };
        };

        let value = format_value(*state);
        self.bus.publish(&self.topic, &value).await?;
        info!(topic = %self.topic, value = %value, "Published state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::InMemoryBus;
    use crate::types::{Constraint, ConstraintVariant};

    fn lights_argument() -> FunctionArgument {
        FunctionArgument {
            description: "lights state".to_owned(),
            constraints: Constraint::NumberVariants {
                variants: vec![
                    ConstraintVariant {
                        value: 0.0,
                        description: "off".to_owned(),
                    },
                    ConstraintVariant {
                        value: 1.0,
                        description: "on".to_owned(),
                    },
                ],
            },
        }
    }

    fn provider(
        bus: &Arc<InMemoryBus>,
        policy: MissingStatePolicy,
    ) -> StatefulMqttFunctionProvider {
        StatefulMqttFunctionProvider::new(
            "set_main_lights_state",
            "set state of main lights (on or off)",
            lights_argument(),
            Arc::clone(bus) as Arc<dyn MessageBus>,
            "bus/function/set_main_lights",
            policy,
        )
    }

    #[test]
    fn integral_values_format_without_fraction() {
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-3.0), "-3");
        assert_eq!(format_value(21.5), "21.5");
    }

    #[test]
    fn values_beyond_i64_range_keep_float_rendering() {
        assert_eq!(format_value(1e300), "1e300");
        assert_eq!(format_value(-1e300), "-1e300");
        assert_eq!(format_value(f64::NAN), "NaN");
    }

    #[tokio::test]
    async fn invoke_publishes_stringified_state() {
        let bus = Arc::new(InMemoryBus::new());
        let provider = provider(&bus, MissingStatePolicy::Ignore);

        let mut values = ArgumentValues::new();
        values.insert("state".to_owned(), 1.0);
        provider.invoke(&values).await.expect("invoke");

        assert_eq!(
            bus.published(),
            vec![("bus/function/set_main_lights".to_owned(), "1".to_owned())]
        );
    }

    #[tokio::test]
    async fn missing_state_with_ignore_policy_is_a_silent_no_op() {
        let bus = Arc::new(InMemoryBus::new());
        let provider = provider(&bus, MissingStatePolicy::Ignore);

        provider.invoke(&ArgumentValues::new()).await.expect("invoke");
        assert!(bus.published().is_empty());
    }

    #[tokio::test]
    async fn missing_state_with_reject_policy_fails() {
        let bus = Arc::new(InMemoryBus::new());
        let provider = provider(&bus, MissingStatePolicy::Reject);

        assert!(provider.invoke(&ArgumentValues::new()).await.is_err());
        assert!(bus.published().is_empty());
    }

    #[tokio::test]
    async fn schema_declares_exactly_one_state_argument() {
        let bus = Arc::new(InMemoryBus::new());
        let provider = provider(&bus, MissingStatePolicy::Ignore);

        let arguments = provider.arguments();
        assert_eq!(arguments.len(), 1);
        assert_eq!(arguments["state"], lights_argument());
    }
}
