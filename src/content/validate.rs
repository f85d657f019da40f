//! Collected validation problems.

use std::fmt;

/// One problem found in a content document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// JSON-ish path of the offending field, e.g. `menu.items[2].category`.
    pub path: String,
    pub message: String,
}

/// All problems found while preparing a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    problems: Vec<Problem>,
}

impl ValidationReport {
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.problems.push(Problem {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}: {}", problem.path, problem.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_display() {
        let mut report = ValidationReport::default();
        assert!(report.is_empty());
        report.push("menu.categories[1]", "category is empty");
        report.push("projects[0].liveSiteUrl", "link is empty");
        assert_eq!(
            report.to_string(),
            "  menu.categories[1]: category is empty\n  projects[0].liveSiteUrl: link is empty"
        );
    }
}
