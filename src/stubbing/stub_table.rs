use super::Answer;
use crate::Matcher;
use crate::MethodId;
use crate::Value;

#[derive(Debug)]
pub(crate) struct StubEntry {
    id: u64,
    method: MethodId,
    matchers: Vec<Matcher>,
    answers: Vec<Answer>,
    consumed: usize,
}

impl StubEntry {
    /// Next answer of the sequence. The last one repeats forever.
    fn next_answer(&mut self) -> Option<Answer> {
        let last = self.answers.len().checked_sub(1)?;
        let answer = self.answers[self.consumed.min(last)].clone();
        if self.consumed < last {
            self.consumed += 1;
        }
        Some(answer)
    }
}

/// Matchers of one stub entry, detached from the table.
#[derive(Debug)]
pub(crate) struct StubCandidate {
    id: u64,
    matchers: Vec<Matcher>,
}

impl StubCandidate {
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn matches(
        &self,
        args: &[Value],
    ) -> bool {
        Matcher::all_match(&self.matchers, args)
    }

    pub(crate) fn capture(
        &self,
        args: &[Value],
    ) {
        Matcher::capture_all(&self.matchers, args)
    }
}

/// Stub entries of one mock, searched newest first.
#[derive(Debug, Default)]
pub(crate) struct StubTable {
    entries: Vec<StubEntry>,
    next_id: u64,
}

impl StubTable {
    /// Adds an entry, replacing any earlier one with the same method and
    /// matcher patterns. Other earlier entries stay and are shadowed by the
    /// newer one where both match. Returns the id of the new entry.
    pub(crate) fn register(
        &mut self,
        method: MethodId,
        matchers: Vec<Matcher>,
        answers: Vec<Answer>,
    ) -> u64 {
        self.entries
            .retain(|entry| !(entry.method == method && Matcher::same_patterns(&entry.matchers, &matchers)));

        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(StubEntry {
            id,
            method,
            matchers,
            answers,
            consumed: 0,
        });
        id
    }

    /// Appends to the answer sequence of entry `id`. Returns false when the
    /// entry is gone, e.g. after a reset.
    pub(crate) fn append_answer(
        &mut self,
        id: u64,
        answer: Answer,
    ) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.answers.push(answer);
                true
            }
            None => false,
        }
    }

    /// Entries of `method` that still hold answers, newest first. Matching
    /// runs on the copy so that user matchers never see the mock locked.
    pub(crate) fn candidates(
        &self,
        method: &MethodId,
    ) -> Vec<StubCandidate> {
        self.entries
            .iter()
            .rev()
            .filter(|entry| &entry.method == method && !entry.answers.is_empty())
            .map(|entry| StubCandidate {
                id: entry.id,
                matchers: entry.matchers.clone(),
            })
            .collect()
    }

    /// Consumes one answer of entry `id`. `None` once the entry is gone.
    pub(crate) fn consume(
        &mut self,
        id: u64,
    ) -> Option<Answer> {
        self.entries.iter_mut().find(|entry| entry.id == id)?.next_answer()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
