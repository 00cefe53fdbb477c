//! Selection Manager: the set of questions picked for the next report.

/// Selected question texts.
///
/// Membership is what matters; insertion order is kept only so the request body
/// lists questions in the order the user picked them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    questions: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `question` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, question: &str) -> bool {
        if let Some(pos) = self.questions.iter().position(|q| q == question) {
            self.questions.remove(pos);
            false
        } else {
            self.questions.push(question.to_string());
            true
        }
    }

    pub fn insert(&mut self, question: &str) {
        if !self.contains(question) {
            self.questions.push(question.to_string());
        }
    }

    pub fn remove(&mut self, question: &str) {
        self.questions.retain(|q| q != question);
    }

    pub fn select_all<I, S>(&mut self, all_questions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for question in all_questions {
            self.insert(question.as_ref());
        }
    }

    pub fn clear_all(&mut self) {
        self.questions.clear();
    }

    pub fn contains(&self, question: &str) -> bool {
        self.questions.iter().any(|q| q == question)
    }

    pub fn count(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.questions
    }
}
