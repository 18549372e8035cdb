//! Region tree construction.
//!
//! Regions live in an arena. Each multi-region container contributes one
//! sibling per branch; all of them share the container. A new container is
//! placed by walking down from the roots: it descends into the branch whose
//! content holds it, adopts sibling groups that lie within one of its own
//! branches, and is rejected if it partially overlaps anything else.
//! Attribute modifications never conflict; they are placed wherever they fit.

use std::mem;
use std::ops::Range;

use crate::parser::region::{Region, RegionId, RegionKind};
use crate::types::{Edit, TokenId};

/// A discovered container waiting to be placed in the tree.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub token: TokenId,
    pub container: Range<usize>,
    pub attribute: bool,
    pub removed_left_len: usize,
    pub removed_right_len: usize,
    pub branches: Vec<(RegionKind, Range<usize>)>,
}

enum Relation {
    /// No interaction; the candidate becomes a sibling.
    Unrelated,
    /// Candidate lies within the content of this region.
    Inside(RegionId),
    /// Group lies within the candidate's branch at this index.
    Encloses(usize),
    Overlap,
}

#[derive(Debug, Default)]
pub(crate) struct Forest {
    pub regions: Vec<Region>,
    pub roots: Vec<RegionId>,
}

/// Siblings partitioned into groups sharing a token and container, in
/// order of first appearance.
pub(crate) fn sibling_groups(regions: &[Region], siblings: &[RegionId]) -> Vec<Vec<RegionId>> {
    let mut groups: Vec<Vec<RegionId>> = Vec::new();
    for &id in siblings {
        let region = &regions[id];
        let existing = groups.iter_mut().find(|group| {
            let first = &regions[group[0]];
            first.token == region.token && first.container == region.container
        });
        match existing {
            Some(group) => group.push(id),
            None => groups.push(vec![id]),
        }
    }
    groups
}

fn contains(outer: &Range<usize>, inner: &Range<usize>) -> bool {
    outer.start <= inner.start && inner.end <= outer.end
}

impl Forest {
    /// Place `candidate`. On partial overlap nothing is changed and the
    /// conflicting container is returned.
    pub fn insert(&mut self, candidate: Candidate) -> Result<(), Range<usize>> {
        let mut parent = None;
        'descend: loop {
            let mut adopted = Vec::new();
            for group in sibling_groups(&self.regions, self.children(parent)) {
                match self.relation(&candidate, &group) {
                    Relation::Unrelated => {}
                    Relation::Inside(id) => {
                        parent = Some(id);
                        continue 'descend;
                    }
                    Relation::Encloses(branch) => adopted.push((branch, group)),
                    Relation::Overlap => {
                        return Err(self.regions[group[0]].container.clone());
                    }
                }
            }
            self.attach(parent, candidate, adopted);
            return Ok(());
        }
    }

    /// Shift every tracked range across `edit`.
    pub fn apply(&mut self, edit: &Edit) {
        for region in &mut self.regions {
            edit.apply(&mut region.range);
            edit.apply(&mut region.container);
        }
    }

    pub fn children(&self, parent: Option<RegionId>) -> &[RegionId] {
        match parent {
            Some(id) => &self.regions[id].children,
            None => &self.roots,
        }
    }

    fn children_mut(&mut self, parent: Option<RegionId>) -> &mut Vec<RegionId> {
        match parent {
            Some(id) => &mut self.regions[id].children,
            None => &mut self.roots,
        }
    }

    fn relation(&self, candidate: &Candidate, group: &[RegionId]) -> Relation {
        let first = &self.regions[group[0]];
        let other = &first.container;
        let new = &candidate.container;
        if new.end <= other.start || other.end <= new.start {
            return Relation::Unrelated;
        }
        if let Some(&id) = group
            .iter()
            .find(|&&id| contains(&self.regions[id].range, new))
        {
            return Relation::Inside(id);
        }
        if let Some(branch) = candidate
            .branches
            .iter()
            .position(|(_, range)| contains(range, other))
        {
            return Relation::Encloses(branch);
        }
        if candidate.attribute || first.kind == RegionKind::AttributeModification {
            return Relation::Unrelated;
        }
        Relation::Overlap
    }

    fn attach(
        &mut self,
        parent: Option<RegionId>,
        candidate: Candidate,
        adopted: Vec<(usize, Vec<RegionId>)>,
    ) {
        let ids: Vec<RegionId> = candidate
            .branches
            .into_iter()
            .map(|(kind, range)| {
                self.regions.push(Region {
                    token: candidate.token,
                    kind,
                    range,
                    container: candidate.container.clone(),
                    removed_left_len: candidate.removed_left_len,
                    removed_right_len: candidate.removed_right_len,
                    children: Vec::new(),
                });
                self.regions.len() - 1
            })
            .collect();

        for (branch, group) in adopted {
            self.children_mut(parent).retain(|id| !group.contains(id));
            self.regions[ids[branch]].children.extend(group);
        }
        for &id in &ids {
            self.sort_children(Some(id));
        }
        self.children_mut(parent).extend(ids);
        self.sort_children(parent);
    }

    fn sort_children(&mut self, parent: Option<RegionId>) {
        let mut children = mem::take(self.children_mut(parent));
        children.sort_by_key(|&id| {
            let region = &self.regions[id];
            (region.container.start, region.container.end, region.range.start)
        });
        *self.children_mut(parent) = children;
    }
}
