//! Single-writer state cells.
//!
//! The navigation and theme stores keep their value in a `StateCell` so the
//! same logic can sit on top of a plain `Rc<Cell<_>>` (tests, native hosts)
//! or a reactive signal (the browser client). Cloning a cell yields another
//! handle to the same value.

use std::cell::Cell;
use std::rc::Rc;

pub trait StateCell<T>: Clone + 'static {
    fn get(&self) -> T;
    fn set(&self, value: T);
}

/// Shared `Cell` for `Copy` state.
#[derive(Debug, Default)]
pub struct LocalCell<T: Copy> {
    inner: Rc<Cell<T>>,
}

impl<T: Copy> LocalCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Cell::new(value)),
        }
    }
}

impl<T: Copy> Clone for LocalCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Copy + 'static> StateCell<T> for LocalCell<T> {
    fn get(&self) -> T {
        self.inner.get()
    }

    fn set(&self, value: T) {
        self.inner.set(value);
    }
}
