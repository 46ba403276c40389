//! End-to-end wiring from commit records to drafts.

use tracing::info;

use crate::analyze::{aggregate, analyze_commits, AggregateAnalysis};
use crate::compose::compose_post;
use crate::data::{CommitRecord, PulseReport};
use crate::extract::{extract_specific_context, SpecificContext};
use crate::ideas::{generate_ideas, Idea, IdeaKind};
use crate::rewrite::{PostFacts, RewriteConstraints, RewriteRequest, Tone};

/// Everything derived from one batch of commits.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Batch totals and per-commit analyses.
    pub aggregate: AggregateAnalysis,
    /// Best guess at what was built.
    pub feature: String,
    /// Concrete libraries, functions, modules and keywords.
    pub specific_context: SpecificContext,
    /// Ranked ideas; never empty.
    pub ideas: Vec<Idea>,
}

/// A templated post for one tone.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// Tone the draft will be polished in.
    pub tone: Tone,
    /// Kind of the idea it was built from.
    pub kind: IdeaKind,
    /// Angle of that idea.
    pub angle: String,
    /// Post text.
    pub text: String,
}

impl Draft {
    /// Builds the rewrite request for this draft.
    pub fn rewrite_request(&self, facts: PostFacts, constraints: RewriteConstraints) -> RewriteRequest {
        RewriteRequest {
            draft: self.text.clone(),
            intent: self.kind.as_str().to_string(),
            angle: self.angle.clone(),
            facts,
            tone: self.tone,
            constraints,
        }
    }
}

/// Runs extraction, analysis, aggregation and idea ranking.
pub fn run(records: &[CommitRecord]) -> PipelineOutput {
    let aggregate = aggregate(analyze_commits(records));
    let feature = aggregate.feature();
    let specific_context = extract_specific_context(records);
    let ideas = generate_ideas(&aggregate);

    info!(
        commits = aggregate.total_commits,
        files = aggregate.total_files_changed,
        weight = aggregate.total_weight,
        feature = %feature,
        ideas = ideas.len(),
        "Analyzed commit batch"
    );

    PipelineOutput {
        aggregate,
        feature,
        specific_context,
        ideas,
    }
}

impl PipelineOutput {
    /// Builds the printable report.
    pub fn report(&self) -> PulseReport {
        PulseReport::new(
            &self.aggregate,
            self.feature.clone(),
            self.specific_context.clone(),
            self.ideas.clone(),
        )
    }

    /// Facts every rewrite must keep.
    pub fn facts(&self) -> PostFacts {
        PostFacts {
            commits: self.aggregate.total_commits,
            files_changed: self.aggregate.total_files_changed,
            feature: Some(self.feature.clone()),
        }
    }

    /// Drafts one post per tone; tone `i` uses the `i`-th ranked idea,
    /// wrapping around when there are fewer ideas than tones.
    pub fn drafts(&self, tones: &[Tone]) -> Vec<Draft> {
        tones
            .iter()
            .enumerate()
            .filter_map(|(i, &tone)| {
                let idea = self.ideas.get(i % self.ideas.len().max(1))?;
                Some(Draft {
                    tone,
                    kind: idea.kind,
                    angle: idea.angle.clone(),
                    text: compose_post(idea, &self.aggregate),
                })
            })
            .collect()
    }
}
