//! Follow-spec tree consulted by renderers at every link boundary.

use std::fmt::{self, Write};
use std::rc::Rc;

use rorepr_core::Representation;
use tracing::{debug, trace};

use crate::path::{Criteria, PathSpec};
use crate::{Error, Result, parser};

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug)]
struct Node {
    name: String,
    criteria: Criteria,
    children: Vec<NodeId>,
}

/// Arena holding every branch derived from one follow-links expression.
#[derive(Debug)]
struct FollowTree {
    nodes: Vec<Node>,
}

impl FollowTree {
    fn build(spec: &PathSpec) -> Self {
        let mut tree = Self {
            nodes: vec![Node {
                name: String::new(),
                criteria: Criteria::new(),
                children: Vec::new(),
            }],
        };

        for path in spec.paths() {
            let mut current = ROOT;
            for segment in path.segments() {
                current = tree.child_or_insert(current, &segment.name, &segment.criteria);
            }
        }

        tree
    }

    /// Reuses an existing child only when both name and criteria are equal.
    fn child_or_insert(&mut self, parent: NodeId, name: &str, criteria: &Criteria) -> NodeId {
        let existing = self.nodes[parent].children.iter().copied().find(|&id| {
            let node = &self.nodes[id];
            node.name == name && node.criteria == *criteria
        });
        if let Some(id) = existing {
            return id;
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            name: name.to_string(),
            criteria: criteria.clone(),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }
}

/// A position in the follow tree.
///
/// One position may cover several branches when alternatives reuse a segment
/// name with different criteria (`links[rel=a],links[rel=b].value`). The
/// terminated position covers no branches at all.
#[derive(Clone)]
pub struct FollowSpecs {
    tree: Rc<FollowTree>,
    branches: Vec<NodeId>,
}

impl FollowSpecs {
    /// Root of the tree built from an already parsed spec.
    pub fn create(spec: &PathSpec) -> Self {
        Self {
            tree: Rc::new(FollowTree::build(spec)),
            branches: vec![ROOT],
        }
    }

    /// Parses `x-ro-follow-links`. Absent, empty or blank input follows nothing.
    pub fn parse(source: Option<&str>) -> Result<Self> {
        let source = source.unwrap_or_default();
        let parse = parser::parse(source);
        let (spec, diagnostics) = parse.into_parts();

        if diagnostics.has_errors() {
            debug!(
                expr = source,
                errors = diagnostics.error_count(),
                "rejected follow-links"
            );
            return Err(Error::FollowLinksParseError {
                expr: source.to_string(),
                diagnostics,
            });
        }

        debug!(expr = source, paths = spec.len(), "parsed follow-links");
        Ok(Self::create(&spec))
    }

    /// Root that follows nothing.
    pub fn none() -> Self {
        Self::create(&PathSpec::default())
    }

    /// Position reached by following something the tree does not contain.
    pub fn terminated() -> Self {
        Self {
            tree: Rc::new(FollowTree::build(&PathSpec::default())),
            branches: Vec::new(),
        }
    }

    /// Descends into `name`. A bracket suffix on the argument is ignored.
    pub fn follow(&self, name: &str) -> FollowSpecs {
        let key = name.split_once('[').map_or(name, |(head, _)| head);
        let branches: Vec<NodeId> = self
            .branches
            .iter()
            .flat_map(|&id| self.tree.nodes[id].children.iter().copied())
            .filter(|&child| self.tree.nodes[child].name == key)
            .collect();

        trace!(segment = key, branches = branches.len(), "follow");
        FollowSpecs {
            tree: Rc::clone(&self.tree),
            branches,
        }
    }

    pub fn is_following(&self) -> bool {
        !self.branches.is_empty()
    }

    pub fn is_terminated(&self) -> bool {
        self.branches.is_empty()
    }

    /// True if any reached branch accepts `attrs`. Terminated positions match nothing.
    pub fn matches(&self, attrs: &Representation) -> bool {
        let matched = self
            .branches
            .iter()
            .any(|&id| self.tree.nodes[id].criteria.matches(attrs));
        trace!(matched, "criteria check");
        matched
    }

    /// Follows `name`, keeping only the branches whose criteria accept `attrs`.
    ///
    /// `None` when no branch is left. Sub-paths of rejected sibling branches
    /// are not reachable from the returned position.
    pub fn follow_matching(&self, name: &str, attrs: &Representation) -> Option<FollowSpecs> {
        let mut next = self.follow(name);
        next.branches
            .retain(|&id| self.tree.nodes[id].criteria.matches(attrs));
        trace!(segment = name, branches = next.branches.len(), "follow matching");
        next.is_following().then_some(next)
    }

    /// Criteria of each reached branch, in tree order.
    pub fn criteria(&self) -> Vec<&Criteria> {
        self.branches
            .iter()
            .map(|&id| &self.tree.nodes[id].criteria)
            .collect()
    }

    /// Indented listing of everything reachable below this position.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for &id in &self.branches {
            for &child in &self.tree.nodes[id].children {
                self.dump_node(&mut out, child, 0);
            }
        }
        out
    }

    fn dump_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let node = &self.tree.nodes[id];
        let _ = writeln!(out, "{:indent$}{}{}", "", node.name, node.criteria, indent = depth * 2);
        for &child in &node.children {
            self.dump_node(out, child, depth + 1);
        }
    }
}

impl Default for FollowSpecs {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for FollowSpecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_terminated() {
            return f.write_str("FollowSpecs(terminated)");
        }
        let names: Vec<String> = self
            .branches
            .iter()
            .map(|&id| {
                let node = &self.tree.nodes[id];
                format!("{}{}", node.name, node.criteria)
            })
            .collect();
        f.debug_tuple("FollowSpecs").field(&names).finish()
    }
}
