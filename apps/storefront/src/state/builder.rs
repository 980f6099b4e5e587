//! # Cake Builder State
//!
//! The in-progress custom cake. Selections survive between shell lines and
//! reset to the defaults once the cake is added to the cart.

use std::sync::Mutex;

use yetta_core::CakeBuilder;

/// Session-wide cake builder.
#[derive(Debug, Default)]
pub struct BuilderState {
    builder: Mutex<CakeBuilder>,
}

impl BuilderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a closure with read access to the builder.
    pub fn with_builder<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CakeBuilder) -> R,
    {
        let builder = self.builder.lock().unwrap_or_else(|e| e.into_inner());
        f(&builder)
    }

    /// Executes a closure with write access to the builder.
    pub fn with_builder_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CakeBuilder) -> R,
    {
        let mut builder = self.builder.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut builder)
    }
}
