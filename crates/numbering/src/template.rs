use crate::error::NumberingError;
use folio_types::CounterName;

/// Deepest supported hierarchy: a template holds at most this many counters.
pub const MAX_DEPTH: usize = 32;

/// The counters that make up one numbering label, shallowest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingTemplate {
    counters: Vec<CounterName>,
}

impl NumberingTemplate {
    pub fn new(counters: Vec<CounterName>) -> Result<Self, NumberingError> {
        if counters.is_empty() {
            return Err(NumberingError::EmptyTemplate);
        }
        if counters.len() > MAX_DEPTH {
            return Err(NumberingError::InvalidConfiguration(format!(
                "a template of {} counters exceeds the maximum depth of {}",
                counters.len(),
                MAX_DEPTH
            )));
        }
        Ok(Self { counters })
    }

    /// `h0 .. h{level}`, the template used by headings. Callers keep `level`
    /// below [`MAX_DEPTH`].
    pub fn for_heading(level: usize) -> Self {
        Self {
            counters: (0..=level).map(CounterName::heading).collect(),
        }
    }

    pub fn counters(&self) -> &[CounterName] {
        &self.counters
    }

    /// Number of counters, i.e. heading level + 1.
    pub fn depth(&self) -> usize {
        self.counters.len()
    }

    /// The counter advanced when the template is rendered.
    pub fn leaf(&self) -> &CounterName {
        // `new` and `for_heading` never build an empty template.
        &self.counters[self.counters.len() - 1]
    }

    /// Counters read without being advanced.
    pub fn ancestors(&self) -> &[CounterName] {
        &self.counters[..self.counters.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_deep_template_is_rejected() {
        let counters: Vec<CounterName> = (0..=MAX_DEPTH).map(CounterName::heading).collect();
        let err = NumberingTemplate::new(counters).unwrap_err();
        assert!(matches!(err, NumberingError::InvalidConfiguration(_)));
        assert!(NumberingTemplate::new((0..MAX_DEPTH).map(CounterName::heading).collect()).is_ok());
    }

    #[test]
    fn heading_template_names_each_level() {
        let t = NumberingTemplate::for_heading(2);
        let names: Vec<&str> = t.counters().iter().map(CounterName::as_str).collect();
        assert_eq!(names, ["h0", "h1", "h2"]);
        assert_eq!(t.leaf().as_str(), "h2");
        assert_eq!(t.ancestors().len(), 2);
        assert_eq!(t.depth(), 3);
    }

    #[test]
    fn empty_template_is_rejected() {
        assert_eq!(
            NumberingTemplate::new(Vec::new()),
            Err(NumberingError::EmptyTemplate)
        );
    }
}
