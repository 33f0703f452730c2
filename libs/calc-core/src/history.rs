//! Calculation history with observer notifications
//!
//! `History` is an append-only, insertion-ordered list of calculations. Observers
//! registered on it are told about every calculation that executes successfully.
//! Snapshots for undo/redo are taken through [`History::create_memento`] and
//! managed by [`crate::Caretaker`].

use crate::calculation::Calculation;
use crate::memento::Memento;
use crate::numfmt::format_number;
use std::fmt;
use tracing::debug;

/// Callback receiving each successfully executed calculation and its result
pub type Observer = Box<dyn FnMut(&Calculation, f64)>;

/// Handle returned by [`History::register_observer`], used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Ordered calculation history
#[derive(Default)]
pub struct History {
    items: Vec<Calculation>,
    /// Notified in registration order
    observers: Vec<(ObserverId, Observer)>,
    next_observer_id: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from calculations without notifying anyone
    pub fn from_calculations(items: Vec<Calculation>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Append a calculation, then notify observers if it executes
    ///
    /// A calculation that fails to execute is still recorded; observers are
    /// simply not told about it.
    pub fn add(&mut self, calc: Calculation) {
        self.items.push(calc);
        let Some(calc) = self.items.last() else {
            return;
        };

        let result = match calc.execute() {
            Ok(result) => result,
            Err(e) => {
                debug!(calc = %calc, error = %e, "stored failing calculation, observers skipped");
                return;
            },
        };

        for (_, observer) in self.observers.iter_mut() {
            observer(calc, result);
        }
    }

    /// Copy of all entries, oldest first
    pub fn all(&self) -> Vec<Calculation> {
        self.items.clone()
    }

    pub fn last(&self) -> Option<&Calculation> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every entry. Undo state lives in the caretaker and is left alone.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// One line per entry: `a symbol b = result`
    pub fn to_strings(&self) -> Vec<String> {
        self.items.iter().map(render_entry).collect()
    }

    // === Observers ===

    pub fn register_observer(
        &mut self,
        observer: impl FnMut(&Calculation, f64) + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns false if it was not registered
    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // === Memento ===

    /// Snapshot of the current entries
    pub fn create_memento(&self) -> Memento {
        Memento::new(self.items.clone())
    }

    /// Replace the entries wholesale with a snapshot
    pub fn restore_memento(&mut self, memento: &Memento) {
        self.items = memento.items().to_vec();
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn render_entry(calc: &Calculation) -> String {
    match calc.execute() {
        Ok(result) => format!("{} = {}", calc, format_number(result)),
        Err(e) => format!("{} = error: {}", calc, e),
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::factory::CalculationFactory;
    use crate::operation::Operation;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn calc(symbol: &str, a: f64, b: f64) -> Calculation {
        CalculationFactory::from_symbol(symbol, a, b).unwrap()
    }

    #[test]
    fn test_observer_called_once_with_result() {
        let mut hist = History::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let id = hist.register_observer(move |c, result| {
            sink.borrow_mut().push((c.clone(), result));
        });

        hist.add(calc("+", 1.0, 2.0));

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, calc("+", 1.0, 2.0));
        assert_eq!(calls[0].1, 3.0);
        drop(calls);
        assert!(hist.unregister_observer(id));
    }

    #[test]
    fn test_failing_calculation_is_stored_but_not_notified() {
        // Append-then-maybe-notify: the entry stays even though nobody hears about it
        let mut hist = History::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        hist.register_observer(move |_, _| *sink.borrow_mut() += 1);

        hist.add(calc("/", 1.0, 0.0));

        assert_eq!(*count.borrow(), 0);
        assert_eq!(hist.all(), vec![calc("/", 1.0, 0.0)]);
        assert_eq!(
            hist.to_strings(),
            vec!["1.0 / 0.0 = error: Division by zero is not allowed"]
        );
    }

    #[test]
    fn test_observers_notified_in_registration_order() {
        let mut hist = History::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let sink = Rc::clone(&order);
            hist.register_observer(move |_, _| sink.borrow_mut().push(tag));
        }

        hist.add(calc("*", 2.0, 2.0));

        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unregister_unknown_observer_is_noop() {
        let mut hist = History::new();
        let id = hist.register_observer(|_, _| {});
        assert!(hist.unregister_observer(id));
        assert!(!hist.unregister_observer(id));
        assert_eq!(hist.observer_count(), 0);
    }

    #[test]
    fn test_unregistered_observer_not_called() {
        let mut hist = History::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = hist.register_observer(move |_, _| *sink.borrow_mut() += 1);

        hist.add(calc("+", 1.0, 1.0));
        hist.unregister_observer(id);
        hist.add(calc("+", 2.0, 2.0));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_all_returns_copy() {
        let mut hist = History::new();
        hist.add(calc("+", 1.0, 2.0));

        let mut copy = hist.all();
        copy.push(calc("-", 5.0, 1.0));
        copy.clear();

        assert_eq!(hist.len(), 1);
    }

    #[test]
    fn test_last_and_clear() {
        let mut hist = History::new();
        assert!(hist.last().is_none());

        hist.add(calc("+", 1.0, 2.0));
        hist.add(calc("^", 2.0, 10.0));
        assert_eq!(hist.last(), Some(&calc("^", 2.0, 10.0)));

        hist.clear();
        assert!(hist.is_empty());
        assert!(hist.last().is_none());
    }

    #[test]
    fn test_to_strings_format() {
        let mut hist = History::new();
        hist.add(calc("+", 2.0, 3.0));
        hist.add(calc("root", 2.0, 9.0));
        hist.add(calc("-", 0.5, 2.0));

        assert_eq!(
            hist.to_strings(),
            vec!["2.0 + 3.0 = 5.0", "2.0 root 9.0 = 3.0", "0.5 - 2.0 = -1.5"]
        );
    }

    #[test]
    fn test_memento_restore_replaces_entries() {
        let mut hist = History::new();
        hist.add(calc("+", 1.0, 1.0));
        let snapshot = hist.create_memento();

        hist.add(calc("+", 2.0, 2.0));
        hist.add(Calculation::new(Operation::Multiply, 3.0, 3.0));
        assert_eq!(hist.len(), 3);

        hist.restore_memento(&snapshot);
        assert_eq!(hist.all(), vec![calc("+", 1.0, 1.0)]);
        // The snapshot itself is unaffected by later changes
        hist.clear();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_restore_keeps_observers() {
        let mut hist = History::new();
        hist.register_observer(|_, _| {});
        let empty = hist.create_memento();
        hist.add(calc("+", 1.0, 1.0));

        hist.restore_memento(&empty);
        assert!(hist.is_empty());
        assert_eq!(hist.observer_count(), 1);
    }
}
