/// The ordered `parameter | value` rows of a test step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepTable {
    rows: Vec<(String, String)>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Expected `parameter=value`, found {0:?}")]
pub struct InvalidAssignment(pub String);

impl StepTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, parameter: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(parameter, value);
        self
    }

    /// A later row for the same parameter replaces the earlier one.
    pub fn push(&mut self, parameter: impl Into<String>, value: impl Into<String>) {
        let parameter = parameter.into();
        let value = value.into();
        match self.rows.iter_mut().find(|(p, _)| *p == parameter) {
            Some(row) => row.1 = value,
            None => self.rows.push((parameter, value)),
        }
    }

    pub fn get(&self, parameter: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(p, _)| p == parameter)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parse a `parameter=value` command line assignment.
    ///
    /// Only the first `=` splits, so values such as `random=10` are kept whole.
    pub fn parse_assignment(assignment: &str) -> Result<(String, String), InvalidAssignment> {
        match assignment.split_once('=') {
            Some((parameter, value)) if !parameter.trim().is_empty() => {
                Ok((parameter.trim().to_string(), value.to_string()))
            }
            _ => Err(InvalidAssignment(assignment.to_string())),
        }
    }

    pub(crate) fn map_values(self, mut f: impl FnMut(&str, String) -> String) -> Self {
        let rows = self
            .rows
            .into_iter()
            .map(|(parameter, value)| {
                let value = f(&parameter, value);
                (parameter, value)
            })
            .collect();
        Self { rows }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StepTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = StepTable::new();
        for (parameter, value) in iter {
            table.push(parameter, value);
        }
        table
    }
}
