//! Decoder registry and name resolution.
//!
//! The registry is a fixed mapping from `TargetType` to a decoder
//! singleton, built once and never mutated. A miss is not an error.


use crate::{
    cache::BoundedCache,
    decode::{self, ValueDecoder},
    error::DecodeError,
    target::TargetType,
};
use scalarbind_primitives::{ALL_SCALAR_KINDS, ScalarKind};
use std::{collections::HashMap, str::FromStr, sync::LazyLock};

static GLOBAL: LazyLock<DecoderRegistry> = LazyLock::new(|| {
    DecoderRegistry::build().expect("scalar decoder registry must cover every listed kind")
});

///
/// DecoderRegistry
///

#[derive(Clone)]
pub struct DecoderRegistry {
    decoders: HashMap<TargetType, &'static dyn ValueDecoder>,
}

impl DecoderRegistry {
    /// Populate the mapping and verify that every kind with a decoder has
    /// both forms it advertises.
    pub fn build() -> Result<Self, DecodeError> {
        let decoders: HashMap<TargetType, &'static dyn ValueDecoder> = singletons()
            .into_iter()
            .map(|decoder| (decoder.target(), decoder))
            .collect();

        let registry = Self { decoders };
        registry.validate()?;

        log::trace!("built scalar decoder registry ({} targets)", registry.len());

        Ok(registry)
    }

    /// Process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    #[must_use]
    pub fn find(&self, target: TargetType) -> Option<&'static dyn ValueDecoder> {
        self.decoders.get(&target).copied()
    }

    /// Look up the decoder for a Rust type (`i32`, `Option<i32>`, `BigInt`, ...).
    #[must_use]
    pub fn find_for<T: 'static>(&self) -> Option<&'static dyn ValueDecoder> {
        TargetType::of::<T>().and_then(|target| self.find(target))
    }

    #[must_use]
    pub fn contains(&self, target: TargetType) -> bool {
        self.decoders.contains_key(&target)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Registered targets in kind order, primitive before wrapper.
    #[must_use]
    pub fn targets(&self) -> Vec<TargetType> {
        let mut targets: Vec<_> = self.decoders.keys().copied().collect();
        targets.sort_by_key(|target| (target.kind, !target.primitive));

        targets
    }

    fn validate(&self) -> Result<(), DecodeError> {
        for kind in ALL_SCALAR_KINDS {
            let expected = expected_targets(kind);

            for target in &expected {
                match self.decoders.get(target) {
                    Some(decoder) if decoder.target() == *target => {}
                    Some(decoder) => {
                        return Err(DecodeError::invariant(format!(
                            "decoder registered for `{target}` reports target `{}`",
                            decoder.target()
                        )));
                    }
                    None => {
                        return Err(DecodeError::invariant(format!(
                            "no decoder singleton for `{target}`"
                        )));
                    }
                }
            }
        }

        let expected_len: usize = ALL_SCALAR_KINDS
            .into_iter()
            .map(|kind| expected_targets(kind).len())
            .sum();
        if self.decoders.len() != expected_len {
            return Err(DecodeError::invariant(format!(
                "registry holds {} decoders, expected {expected_len}",
                self.decoders.len()
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("targets", &self.targets())
            .finish()
    }
}

fn expected_targets(kind: ScalarKind) -> Vec<TargetType> {
    match (kind.has_decoder(), kind.has_primitive()) {
        (false, _) => Vec::new(),
        (true, false) => vec![TargetType::wrapper(kind)],
        (true, true) => vec![TargetType::primitive(kind), TargetType::wrapper(kind)],
    }
}

fn singletons() -> [&'static dyn ValueDecoder; 19] {
    [
        &decode::BOOL,
        &decode::BOOL_WRAPPER,
        &decode::BYTE,
        &decode::BYTE_WRAPPER,
        &decode::SHORT,
        &decode::SHORT_WRAPPER,
        &decode::CHAR,
        &decode::CHAR_WRAPPER,
        &decode::INT,
        &decode::INT_WRAPPER,
        &decode::LONG,
        &decode::LONG_WRAPPER,
        &decode::FLOAT,
        &decode::FLOAT_WRAPPER,
        &decode::DOUBLE,
        &decode::DOUBLE_WRAPPER,
        &*decode::BIG_INTEGER,
        &*decode::BIG_DECIMAL,
        &decode::NUMBER,
    ]
}

///
/// DecoderResolver
///
/// Resolves textual type names to decoders. Name parses, including
/// failed ones, are memoized in a bounded cache.
///

#[derive(Debug)]
pub struct DecoderResolver {
    registry: &'static DecoderRegistry,
    names: BoundedCache<String, Option<TargetType>>,
}

impl DecoderResolver {
    pub const DEFAULT_INITIAL_ENTRIES: usize = 16;
    pub const DEFAULT_MAX_ENTRIES: usize = 256;

    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_INITIAL_ENTRIES, Self::DEFAULT_MAX_ENTRIES)
    }

    #[must_use]
    pub fn with_capacity(initial_entries: usize, max_entries: usize) -> Self {
        Self {
            registry: DecoderRegistry::global(),
            names: BoundedCache::new(initial_entries, max_entries),
        }
    }

    /// Parse `name` into a target, consulting the memo first.
    #[must_use]
    pub fn target(&self, name: &str) -> Option<TargetType> {
        if let Some(cached) = self.names.get(name) {
            return cached;
        }

        let target = TargetType::from_str(name).ok();
        self.names.put(name.to_string(), target);

        target
    }

    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&'static dyn ValueDecoder> {
        self.target(name).and_then(|target| self.registry.find(target))
    }

    #[must_use]
    pub fn cached_names(&self) -> usize {
        self.names.size()
    }
}

impl Default for DecoderResolver {
    fn default() -> Self {
        Self::new()
    }
}
