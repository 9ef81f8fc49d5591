//! Decision policy for the answering loop.
//!
//! A pure function of the graded documents and the attempt history. The
//! orchestrator calls it after every retrieval/grading pass to pick the next
//! step.

/// Maximum number of distinct questions tried within one `ask` call before
/// the loop gives up.
pub const MAX_ATTEMPTS: usize = 3;

/// Next step after a retrieval/grading pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Relevant passages found: synthesize the answer
    Generate,
    /// Nothing relevant, budget left: reformulate and retry
    Rewrite,
    /// Nothing relevant and the attempt budget is spent: give up
    End,
}

/// Decide the next step.
///
/// `attempts` is the set of previously recorded questions; the current
/// `question` counts as attempted whether or not it has been recorded yet,
/// so exhaustion fires on the `MAX_ATTEMPTS`-th retrieval round.
pub fn decide(docs: &[String], attempts: &[String], question: &str) -> Decision {
    if !docs.is_empty() {
        return Decision::Generate;
    }

    let recorded = attempts.iter().any(|a| a == question);
    let attempted = attempts.len() + usize::from(!recorded);

    if attempted >= MAX_ATTEMPTS {
        Decision::End
    } else {
        Decision::Rewrite
    }
}
