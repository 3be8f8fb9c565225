use crate::ports::outbound::WorkItemRepository;
use crate::scanning::domain::{RelationKind, WorkItem, WorkItemId};
use crate::scanning::policies::{Expansion, RelatedLinkPolicy};
use crate::shared::Result;
use futures::future::{FutureExt, LocalBoxFuture};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Lookup table of connectivity verdicts keyed by work item id
///
/// Once an id is recorded its value is final. Only work items evaluated with
/// full expansion rights are recorded, so a stored `false` always means
/// "no code change anywhere below this work item".
#[derive(Debug, Default, Clone)]
pub struct ConnectivityMemo {
    entries: HashMap<WorkItemId, bool>,
}

impl ConnectivityMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: WorkItemId) -> Option<bool> {
        self.entries.get(&id).copied()
    }

    pub fn contains(&self, id: WorkItemId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a verdict unless one is already present
    fn record(&mut self, id: WorkItemId, connected: bool) {
        self.entries.entry(id).or_insert(connected);
    }
}

/// Outcome of evaluating one work item
///
/// `blocked_at` holds the shallowest path depth at which the search hit a work
/// item that was still being expanded (a cycle). Such a negative verdict is
/// only final once the traversal has unwound past that depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Verdict {
    connected: bool,
    blocked_at: Option<usize>,
}

impl Verdict {
    const CONNECTED: Verdict = Verdict {
        connected: true,
        blocked_at: None,
    };
    const UNCONNECTED: Verdict = Verdict {
        connected: false,
        blocked_at: None,
    };

    fn is_final(&self) -> bool {
        self.connected || self.blocked_at.is_none()
    }
}

fn shallowest(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// State of one traversal: the shared memo and the current expansion path
struct Traversal<'m> {
    memo: &'m mut ConnectivityMemo,
    /// Work items being expanded, keyed to their depth on the path
    in_progress: HashMap<WorkItemId, usize>,
}

/// Decides whether a work item is linked to a commit or pull request,
/// directly or through its children and related work items
///
/// Related-link expansion follows the configured [`RelatedLinkPolicy`].
/// Fetch failures from the repository propagate unchanged.
pub struct ConnectivityResolver<'r, R: WorkItemRepository> {
    repository: &'r R,
    related_links: RelatedLinkPolicy,
}

impl<'r, R: WorkItemRepository> ConnectivityResolver<'r, R> {
    pub fn new(repository: &'r R, related_links: RelatedLinkPolicy) -> Self {
        Self {
            repository,
            related_links,
        }
    }

    /// Resolves connectivity for a work item that has already been fetched
    pub async fn resolve(&self, item: &WorkItem, memo: &mut ConnectivityMemo) -> Result<bool> {
        let mut traversal = Traversal {
            memo,
            in_progress: HashMap::new(),
        };
        let verdict = self
            .evaluate(item, Expansion::Full, &mut traversal)
            .await?;
        Ok(verdict.connected)
    }

    fn evaluate<'a, 'm: 'a>(
        &'a self,
        item: &'a WorkItem,
        expansion: Expansion,
        traversal: &'a mut Traversal<'m>,
    ) -> LocalBoxFuture<'a, Result<Verdict>> {
        async move {
            let id = item.id();

            if expansion == Expansion::Full {
                if let Some(connected) = traversal.memo.get(id) {
                    return Ok(Verdict {
                        connected,
                        blocked_at: None,
                    });
                }
            }

            if item.has_artifact_link() {
                if expansion == Expansion::Full {
                    traversal.memo.record(id, true);
                }
                return Ok(Verdict::CONNECTED);
            }

            if expansion == Expansion::DirectOnly {
                return Ok(Verdict::UNCONNECTED);
            }

            let depth = traversal.in_progress.len();
            traversal.in_progress.insert(id, depth);
            let expanded = self.expand(item, traversal).await;
            traversal.in_progress.remove(&id);
            let mut verdict = expanded?;

            // Cycles back to this item or below it are resolved now
            if verdict.blocked_at.is_some_and(|blocked| blocked >= depth) {
                verdict.blocked_at = None;
            }
            if verdict.is_final() {
                traversal.memo.record(id, verdict.connected);
            }
            Ok(verdict)
        }
        .boxed_local()
    }

    async fn expand(&self, item: &WorkItem, traversal: &mut Traversal<'_>) -> Result<Verdict> {
        let targets = self.collect_targets(item);
        let mut blocked_at = None;
        let mut pending: Vec<(WorkItemId, Expansion)> = Vec::new();

        for (target, kinds) in &targets {
            if let Some(&depth) = traversal.in_progress.get(target) {
                blocked_at = shallowest(blocked_at, Some(depth));
                continue;
            }
            match traversal.memo.get(*target) {
                Some(true) => return Ok(Verdict::CONNECTED),
                Some(false) => {}
                None => pending.push((*target, self.related_links.expansion_for(kinds))),
            }
        }

        if pending.is_empty() {
            return Ok(Verdict {
                connected: false,
                blocked_at,
            });
        }

        let ids: Vec<WorkItemId> = pending.iter().map(|(id, _)| *id).collect();
        let expansions: HashMap<WorkItemId, Expansion> = pending.into_iter().collect();
        let children = self.repository.fetch_work_items(&ids).await?;

        for child in &children {
            let expansion = expansions
                .get(&child.id())
                .copied()
                .unwrap_or(Expansion::DirectOnly);
            let verdict = self.evaluate(child, expansion, traversal).await?;
            if verdict.connected {
                return Ok(Verdict::CONNECTED);
            }
            blocked_at = shallowest(blocked_at, verdict.blocked_at);
        }

        Ok(Verdict {
            connected: false,
            blocked_at,
        })
    }

    /// Deduplicated link targets with every relation kind each was reached through
    fn collect_targets(&self, item: &WorkItem) -> BTreeMap<WorkItemId, HashSet<RelationKind>> {
        let mut targets: BTreeMap<WorkItemId, HashSet<RelationKind>> = BTreeMap::new();
        for relation in item.relations() {
            if !self.related_links.follows(relation.kind()) {
                continue;
            }
            if let Some(target) = relation.target_id() {
                if target == item.id() {
                    continue;
                }
                targets
                    .entry(target)
                    .or_default()
                    .insert(relation.kind().clone());
            }
        }
        targets
    }
}
