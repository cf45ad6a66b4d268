//! Symbol identities and the suppliers that hand them out.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// A configured symbol: its name and the image the shell draws for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDef {
    pub name: String,
    pub url: String,
}

impl SymbolDef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Index of a symbol inside its [`SymbolSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub usize);

/// The identity held by a slot. Two slots match when their symbols are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: Arc<str>,
}

impl Symbol {
    pub fn new(id: usize, name: &str) -> Self {
        Self {
            id: SymbolId(id),
            name: Arc::from(name),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Validated, non-empty set of symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSet {
    symbols: Vec<Symbol>,
}

impl SymbolSet {
    pub fn new(defs: &[SymbolDef]) -> Result<Self, ConfigError> {
        if defs.is_empty() {
            return Err(ConfigError::EmptySymbolSet);
        }

        let mut seen = HashSet::new();
        for def in defs {
            if !seen.insert(def.name.as_str()) {
                return Err(ConfigError::DuplicateSymbol(def.name.clone()));
            }
        }

        let symbols = defs
            .iter()
            .enumerate()
            .map(|(i, def)| Symbol::new(i, &def.name))
            .collect();
        Ok(Self { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Supplies a fresh identity whenever a slot is (re)assigned.
pub trait SymbolSource {
    fn next_symbol(&mut self) -> Symbol;
}

impl<F> SymbolSource for F
where
    F: FnMut() -> Symbol,
{
    fn next_symbol(&mut self) -> Symbol {
        self()
    }
}

/// Uniform random draws from a [`SymbolSet`].
#[derive(Debug, Clone)]
pub struct RandomSymbols {
    set: SymbolSet,
    rng: ChaCha8Rng,
}

impl RandomSymbols {
    /// Seeds from the thread RNG. Draws are not reproducible.
    pub fn new(set: SymbolSet) -> Self {
        Self::with_seed(set, rand::random())
    }

    pub fn with_seed(set: SymbolSet, seed: u64) -> Self {
        Self {
            set,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl SymbolSource for RandomSymbols {
    fn next_symbol(&mut self) -> Symbol {
        let index = self.rng.random_range(0..self.set.len());
        self.set.symbols[index].clone()
    }
}
