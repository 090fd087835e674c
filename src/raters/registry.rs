//! Name to heuristic mapping
//!
//! The registry is read-only once built. Looking up a name that was never
//! registered is an error, never a silent skip.

use super::Rater;
use crate::error::{RateError, RateResult};
use crate::models::{Canvas, Element};

/// Builds a rater bound to one layout
pub type RaterConstructor = for<'a> fn(&'a Canvas, &'a [Element]) -> Rater<'a>;

/// Ordered registry of heuristic constructors
#[derive(Clone)]
pub struct HeuristicRegistry {
    entries: Vec<(&'static str, RaterConstructor)>,
}

impl HeuristicRegistry {
    /// Registry without any heuristic
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a heuristic, replacing any previous entry with the same name
    pub fn register(&mut self, name: &'static str, constructor: RaterConstructor) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = constructor,
            None => self.entries.push((name, constructor)),
        }
    }

    pub fn with(mut self, name: &'static str, constructor: RaterConstructor) -> Self {
        self.register(name, constructor);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| *n == name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(n, _)| *n).collect()
    }

    pub fn get(&self, name: &str) -> RateResult<RaterConstructor> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, constructor)| *constructor)
            .ok_or_else(|| RateError::UnknownHeuristic {
                name: name.to_string(),
                available: self.names().iter().map(|n| n.to_string()).collect(),
            })
    }

    /// Build the named rater for a layout
    pub fn create<'a>(
        &self,
        name: &str,
        canvas: &'a Canvas,
        elements: &'a [Element],
    ) -> RateResult<Rater<'a>> {
        Ok(self.get(name)?(canvas, elements))
    }

    /// Every name in `names` that is not registered
    pub fn unknown<'n>(&self, names: &'n [String]) -> Vec<&'n str> {
        names
            .iter()
            .map(String::as_str)
            .filter(|n| !self.contains(n))
            .collect()
    }
}

impl Default for HeuristicRegistry {
    /// The four built-in heuristics
    fn default() -> Self {
        Self::empty()
            .with("balance", balance)
            .with("equilibrium", equilibrium)
            .with("symmetry", symmetry)
            .with("harmony", harmony)
    }
}

impl std::fmt::Debug for HeuristicRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicRegistry")
            .field("heuristics", &self.names())
            .finish()
    }
}

fn balance<'a>(canvas: &'a Canvas, elements: &'a [Element]) -> Rater<'a> {
    Rater::balance(canvas, elements)
}

fn equilibrium<'a>(canvas: &'a Canvas, elements: &'a [Element]) -> Rater<'a> {
    Rater::equilibrium(canvas, elements)
}

fn symmetry<'a>(canvas: &'a Canvas, elements: &'a [Element]) -> Rater<'a> {
    Rater::symmetry(canvas, elements)
}

fn harmony<'a>(canvas: &'a Canvas, elements: &'a [Element]) -> Rater<'a> {
    Rater::harmony(canvas, elements)
}
