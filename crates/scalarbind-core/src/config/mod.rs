//! Decode configuration.
//!
//! `DecodeConfig` is immutable once built and passed by reference into every
//! decode call. There is no process-wide mutable feature state.


use crate::{
    coercion::{CoercionAction, InputShape},
    error::ConfigError,
};
use scalarbind_primitives::LogicalType;
use serde::Deserialize;

///
/// DecodeConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct DecodeConfig {
    /// Legacy global switch; when off, every coercion into a scalar target fails.
    pub allow_coercion_of_scalars: bool,
    pub fail_on_null_for_primitives: bool,
    pub use_big_decimal_for_floats: bool,
    pub use_big_integer_for_ints: bool,
    pub use_long_for_ints: bool,
    pub unwrap_single_value_arrays: bool,
    pub accept_float_as_int: bool,
    pub accept_empty_array_as_null: bool,
    pub recovery: RecoveryMode,
    pub coercion: CoercionConfig,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            allow_coercion_of_scalars: true,
            fail_on_null_for_primitives: false,
            use_big_decimal_for_floats: false,
            use_big_integer_for_ints: false,
            use_long_for_ints: false,
            unwrap_single_value_arrays: false,
            accept_float_as_int: true,
            accept_empty_array_as_null: false,
            recovery: RecoveryMode::Fail,
            coercion: CoercionConfig::default(),
        }
    }
}

impl DecodeConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from TOML text; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    ///
    /// BUILDER
    ///

    #[must_use]
    pub const fn with_allow_coercion_of_scalars(mut self, enabled: bool) -> Self {
        self.allow_coercion_of_scalars = enabled;
        self
    }

    #[must_use]
    pub const fn with_fail_on_null_for_primitives(mut self, enabled: bool) -> Self {
        self.fail_on_null_for_primitives = enabled;
        self
    }

    #[must_use]
    pub const fn with_use_big_decimal_for_floats(mut self, enabled: bool) -> Self {
        self.use_big_decimal_for_floats = enabled;
        self
    }

    #[must_use]
    pub const fn with_use_big_integer_for_ints(mut self, enabled: bool) -> Self {
        self.use_big_integer_for_ints = enabled;
        self
    }

    #[must_use]
    pub const fn with_use_long_for_ints(mut self, enabled: bool) -> Self {
        self.use_long_for_ints = enabled;
        self
    }

    #[must_use]
    pub const fn with_unwrap_single_value_arrays(mut self, enabled: bool) -> Self {
        self.unwrap_single_value_arrays = enabled;
        self
    }

    #[must_use]
    pub const fn with_accept_float_as_int(mut self, enabled: bool) -> Self {
        self.accept_float_as_int = enabled;
        self
    }

    #[must_use]
    pub const fn with_accept_empty_array_as_null(mut self, enabled: bool) -> Self {
        self.accept_empty_array_as_null = enabled;
        self
    }

    #[must_use]
    pub const fn with_recovery(mut self, recovery: RecoveryMode) -> Self {
        self.recovery = recovery;
        self
    }

    /// Set the default action for one input shape, across all logical types.
    #[must_use]
    pub const fn with_default_coercion(mut self, shape: InputShape, action: CoercionAction) -> Self {
        self.coercion.defaults.set(shape, action);
        self
    }

    /// Set the action for one input shape on one logical type.
    #[must_use]
    pub const fn with_coercion(
        mut self,
        logical_type: LogicalType,
        shape: InputShape,
        action: CoercionAction,
    ) -> Self {
        self.coercion.rules_for_mut(logical_type).set(shape, action);
        self
    }

    #[must_use]
    pub const fn with_accept_blank_as_empty(mut self, accept: Option<bool>) -> Self {
        self.coercion.accept_blank_as_empty = accept;
        self
    }
}

///
/// CoercionConfig
///
/// Explicit override rules consulted before the built-in coercion defaults.
/// Per-type rules win over shape defaults.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CoercionConfig {
    pub defaults: ShapeRules,
    pub boolean: ShapeRules,
    pub integer: ShapeRules,
    pub float: ShapeRules,
    pub other_scalar: ShapeRules,

    /// `Some(false)` forces blank strings to fail; otherwise they resolve
    /// like empty strings.
    pub accept_blank_as_empty: Option<bool>,
}

impl CoercionConfig {
    /// Explicit rule for (logical type, shape), if one is configured.
    #[must_use]
    pub const fn rule(&self, logical_type: LogicalType, shape: InputShape) -> Option<CoercionAction> {
        match self.rules_for(logical_type).get(shape) {
            Some(action) => Some(action),
            None => self.defaults.get(shape),
        }
    }

    #[must_use]
    pub const fn rules_for(&self, logical_type: LogicalType) -> &ShapeRules {
        match logical_type {
            LogicalType::Boolean => &self.boolean,
            LogicalType::Integer => &self.integer,
            LogicalType::Float => &self.float,
            LogicalType::OtherScalar => &self.other_scalar,
        }
    }

    pub const fn rules_for_mut(&mut self, logical_type: LogicalType) -> &mut ShapeRules {
        match logical_type {
            LogicalType::Boolean => &mut self.boolean,
            LogicalType::Integer => &mut self.integer,
            LogicalType::Float => &mut self.float,
            LogicalType::OtherScalar => &mut self.other_scalar,
        }
    }
}

///
/// ShapeRules
///
/// One optional action per input shape; `None` defers to the next layer.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeRules {
    pub empty_string: Option<CoercionAction>,
    pub blank_string: Option<CoercionAction>,
    pub textual_null: Option<CoercionAction>,
    pub non_numeric_string: Option<CoercionAction>,
    pub float_for_integer_target: Option<CoercionAction>,
    pub integer_for_boolean_target: Option<CoercionAction>,
    pub integer_for_char_target: Option<CoercionAction>,
    pub empty_array: Option<CoercionAction>,
}

impl ShapeRules {
    #[must_use]
    pub const fn get(&self, shape: InputShape) -> Option<CoercionAction> {
        match shape {
            InputShape::EmptyString => self.empty_string,
            InputShape::BlankString => self.blank_string,
            InputShape::TextualNull => self.textual_null,
            InputShape::NonNumericString => self.non_numeric_string,
            InputShape::FloatForIntegerTarget => self.float_for_integer_target,
            InputShape::IntegerForBooleanTarget => self.integer_for_boolean_target,
            InputShape::IntegerForCharTarget => self.integer_for_char_target,
            InputShape::EmptyArray => self.empty_array,
        }
    }

    pub const fn set(&mut self, shape: InputShape, action: CoercionAction) {
        let slot = match shape {
            InputShape::EmptyString => &mut self.empty_string,
            InputShape::BlankString => &mut self.blank_string,
            InputShape::TextualNull => &mut self.textual_null,
            InputShape::NonNumericString => &mut self.non_numeric_string,
            InputShape::FloatForIntegerTarget => &mut self.float_for_integer_target,
            InputShape::IntegerForBooleanTarget => &mut self.integer_for_boolean_target,
            InputShape::IntegerForCharTarget => &mut self.integer_for_char_target,
            InputShape::EmptyArray => &mut self.empty_array,
        };
        *slot = Some(action);
    }
}

///
/// RecoveryMode
///
/// Behavior of the default problem handler for data-level failures.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryMode {
    #[default]
    Fail,
    UseNull,
    UseEmpty,
}
