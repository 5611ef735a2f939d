use crate::error::NumberingError;
use crate::template::NumberingTemplate;
use folio_types::CounterName;
use std::collections::{HashMap, HashSet, VecDeque};

/// A single named counter. Starts at 0; the first `next` yields 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    name: CounterName,
    value: u32,
}

impl Counter {
    fn new(name: CounterName) -> Self {
        Self { name, value: 0 }
    }

    pub fn name(&self) -> &CounterName {
        &self.name
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

/// Named counters with reset-on-advance edges.
///
/// One chain belongs to one document build. It is never shared between builds
/// and must be [`reset`](CounterChain::reset) before a new build starts.
#[derive(Debug, Default, Clone)]
pub struct CounterChain {
    counters: HashMap<CounterName, Counter>,
    // Direct edges only, in the order they were declared.
    children: HashMap<CounterName, Vec<CounterName>>,
}

impl CounterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the counter for `name`, creating it at 0 if it does not exist yet.
    pub fn counter(&mut self, name: &CounterName) -> &Counter {
        self.counters
            .entry(name.clone())
            .or_insert_with(|| Counter::new(name.clone()))
    }

    /// Declares that advancing `parent` resets `child` and everything below it.
    ///
    /// Declaring an edge that already exists is a no-op.
    pub fn chain(&mut self, parent: &CounterName, child: &CounterName) -> Result<(), NumberingError> {
        if parent == child || self.descendants(child).contains(parent) {
            return Err(NumberingError::Cycle {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }
        self.counter(parent);
        self.counter(child);

        let edges = self.children.entry(parent.clone()).or_default();
        if !edges.contains(child) {
            edges.push(child.clone());
        }
        Ok(())
    }

    /// Whether `child` is a direct child of `parent`.
    pub fn is_chained(&self, parent: &CounterName, child: &CounterName) -> bool {
        self.children
            .get(parent)
            .is_some_and(|edges| edges.contains(child))
    }

    /// Increments `name` and resets all of its descendants to 0.
    pub fn next(&mut self, name: &CounterName) -> u32 {
        let value = {
            let counter = self
                .counters
                .entry(name.clone())
                .or_insert_with(|| Counter::new(name.clone()));
            counter.value += 1;
            counter.value
        };

        for descendant in self.descendants(name) {
            if let Some(counter) = self.counters.get_mut(&descendant) {
                if counter.value != 0 {
                    log::trace!("Counter '{}' reset by '{}'.", descendant, name);
                }
                counter.value = 0;
            }
        }
        value
    }

    /// Reads `name` without changing anything. Unknown counters read as 0.
    pub fn current(&self, name: &CounterName) -> u32 {
        self.counters.get(name).map_or(0, Counter::value)
    }

    /// Drops every counter and every edge.
    pub fn reset(&mut self) {
        self.counters.clear();
        self.children.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Every counter reachable from `name`, breadth first, excluding `name`.
    pub fn descendants(&self, name: &CounterName) -> Vec<CounterName> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut queue: VecDeque<&CounterName> = VecDeque::new();
        queue.push_back(name);

        while let Some(current) = queue.pop_front() {
            for child in self.children.get(current).into_iter().flatten() {
                if seen.insert(child) {
                    out.push(child.clone());
                    queue.push_back(child);
                }
            }
        }
        out
    }

    /// Creates every counter of `template` and chains each one under its predecessor.
    pub fn ensure_hierarchy(&mut self, template: &NumberingTemplate) -> Result<(), NumberingError> {
        for name in template.counters() {
            self.counter(name);
        }
        for pair in template.counters().windows(2) {
            self.chain(&pair[0], &pair[1])?;
        }
        Ok(())
    }

    /// Renders a dotted label such as `1.2.3` and advances the template's last counter.
    ///
    /// Fails if any counter in the template is not chained under its predecessor,
    /// since such a label would not reset when an ancestor advances.
    pub fn render(&mut self, template: &NumberingTemplate) -> Result<String, NumberingError> {
        let counters = template.counters();
        for pair in counters.windows(2) {
            if !self.is_chained(&pair[0], &pair[1]) {
                return Err(NumberingError::InvalidConfiguration(format!(
                    "counter '{}' has no ancestor chain: it is not chained under '{}'",
                    pair[1], pair[0]
                )));
            }
        }

        let mut parts: Vec<String> = template
            .ancestors()
            .iter()
            .map(|name| self.current(name).to_string())
            .collect();
        parts.push(self.next(template.leaf()).to_string());
        Ok(parts.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> CounterName {
        CounterName::from(s)
    }

    #[test]
    fn counter_is_created_at_zero() {
        let mut chain = CounterChain::new();
        assert_eq!(chain.counter(&name("a")).value(), 0);
        assert_eq!(chain.current(&name("a")), 0);
        assert_eq!(chain.next(&name("a")), 1);
        assert_eq!(chain.next(&name("a")), 2);
        assert_eq!(chain.counter(&name("a")).value(), 2);
    }

    #[test]
    fn current_does_not_create_or_mutate() {
        let chain = CounterChain::new();
        assert_eq!(chain.current(&name("missing")), 0);
        assert!(chain.is_empty());
    }

    #[test]
    fn advancing_parent_resets_child() {
        let mut chain = CounterChain::new();
        chain.chain(&name("p"), &name("c")).unwrap();
        chain.next(&name("c"));
        chain.next(&name("c"));
        assert_eq!(chain.current(&name("c")), 2);

        chain.next(&name("p"));
        assert_eq!(chain.current(&name("c")), 0);
    }

    #[test]
    fn reset_is_transitive() {
        let mut chain = CounterChain::new();
        chain.chain(&name("h0"), &name("h1")).unwrap();
        chain.chain(&name("h1"), &name("h2")).unwrap();
        chain.next(&name("h1"));
        chain.next(&name("h2"));
        chain.next(&name("h2"));

        chain.next(&name("h0"));
        assert_eq!(chain.current(&name("h1")), 0);
        assert_eq!(chain.current(&name("h2")), 0);
    }

    #[test]
    fn advancing_child_leaves_parent_alone() {
        let mut chain = CounterChain::new();
        chain.chain(&name("p"), &name("c")).unwrap();
        chain.next(&name("p"));
        chain.next(&name("c"));
        assert_eq!(chain.current(&name("p")), 1);
    }

    #[test]
    fn self_edge_is_a_cycle() {
        let mut chain = CounterChain::new();
        let err = chain.chain(&name("a"), &name("a")).unwrap_err();
        assert!(matches!(err, NumberingError::Cycle { .. }));
    }

    #[test]
    fn indirect_cycle_is_rejected() {
        let mut chain = CounterChain::new();
        chain.chain(&name("a"), &name("b")).unwrap();
        chain.chain(&name("b"), &name("c")).unwrap();
        let err = chain.chain(&name("c"), &name("a")).unwrap_err();
        assert_eq!(
            err,
            NumberingError::Cycle {
                parent: "c".into(),
                child: "a".into()
            }
        );
        // The rejected edge left no trace.
        assert!(!chain.is_chained(&name("c"), &name("a")));
    }

    #[test]
    fn duplicate_edges_are_ignored() {
        let mut chain = CounterChain::new();
        chain.chain(&name("a"), &name("b")).unwrap();
        chain.chain(&name("a"), &name("b")).unwrap();
        assert_eq!(chain.descendants(&name("a")), vec![name("b")]);
    }

    #[test]
    fn diamond_descendants_are_listed_once() {
        let mut chain = CounterChain::new();
        chain.chain(&name("a"), &name("b")).unwrap();
        chain.chain(&name("a"), &name("c")).unwrap();
        chain.chain(&name("b"), &name("d")).unwrap();
        chain.chain(&name("c"), &name("d")).unwrap();
        assert_eq!(
            chain.descendants(&name("a")),
            vec![name("b"), name("c"), name("d")]
        );
    }

    #[test]
    fn reset_clears_counters_and_edges() {
        let mut chain = CounterChain::new();
        chain.chain(&name("a"), &name("b")).unwrap();
        chain.next(&name("a"));
        chain.reset();
        assert!(chain.is_empty());
        assert_eq!(chain.current(&name("a")), 0);
        assert!(!chain.is_chained(&name("a"), &name("b")));
    }

    #[test]
    fn heading_labels_follow_hierarchy() {
        let mut chain = CounterChain::new();
        let labels: Vec<String> = [0, 1, 1, 2, 0, 1]
            .into_iter()
            .map(|level| {
                let template = NumberingTemplate::for_heading(level);
                chain.ensure_hierarchy(&template).unwrap();
                chain.render(&template).unwrap()
            })
            .collect();
        assert_eq!(labels, ["1", "1.1", "1.2", "1.2.1", "2", "2.1"]);
    }

    #[test]
    fn sibling_after_subsection_advances() {
        let mut chain = CounterChain::new();
        let mut label = |level| {
            let template = NumberingTemplate::for_heading(level);
            chain.ensure_hierarchy(&template).unwrap();
            chain.render(&template).unwrap()
        };
        label(0);
        label(1);
        label(2);
        assert_eq!(label(2), "1.1.2");
    }

    #[test]
    fn render_without_chain_is_invalid() {
        let mut chain = CounterChain::new();
        let template = NumberingTemplate::new(vec![name("x"), name("y")]).unwrap();
        let err = chain.render(&template).unwrap_err();
        assert!(matches!(err, NumberingError::InvalidConfiguration(_)));
        // Nothing was advanced.
        assert_eq!(chain.current(&name("y")), 0);
    }
}
