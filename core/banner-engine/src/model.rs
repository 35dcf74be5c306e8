//! FILENAME: core/banner-engine/src/model.rs
//! Axis Tree - The resolved, arena-backed internal representation.
//!
//! Every axis, element and element heading of one table lives in a flat
//! arena and is addressed by a small index newtype. Ownership runs strictly
//! parent-to-child through the id lists; parent links and the heading ->
//! element resolution are plain ids, so the tree never owns upwards.
//!
//! All derived lists (pre-order expansions, full names, nested paths) are
//! computed once while the tree is built, leaves first, and never change.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::definition::{SourceAxis, SourceElement, SourceElementHeading};
use crate::error::{BannerError, BannerResult};
use crate::logging::log_debug;

// ============================================================================
// IDS
// ============================================================================

macro_rules! arena_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }

            fn from_index(index: usize) -> Self {
                $name(index as u32)
            }
        }
    };
}

arena_id!(AxisId);
arena_id!(ElementId);
arena_id!(HeadingId);

/// One element per nesting level, outermost axis first.
pub type Path = SmallVec<[ElementId; 4]>;

// ============================================================================
// NODES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Axis {
    pub name: String,
    pub label: String,
    /// 0 for a root axis, parent level + 1 for sub-axes.
    pub level: u32,
    pub parent: Option<AxisId>,
    pub sub_axes: Vec<AxisId>,
    /// Top-level elements in declaration order.
    pub elements: Vec<ElementId>,
    /// Top-level headings, duplicates removed.
    pub headings: Vec<HeadingId>,
    /// Pre-order expansion of `elements`.
    pub expanded_elements: Vec<ElementId>,
    /// Pre-order expansion of `headings`.
    pub expanded_headings: Vec<HeadingId>,
    pub nested_paths: Vec<Path>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub label: String,
    pub element_type: String,
    pub decimals: u32,
    pub visible: bool,
    /// Depth below the axis' top-level elements.
    pub level: u32,
    pub axis: AxisId,
    pub parent: Option<ElementId>,
    pub sub_elements: Vec<ElementId>,
    /// Dot-joined names from the top-level element down to this one.
    pub full_name: String,
}

impl Element {
    pub fn is_base(&self) -> bool {
        self.element_type.contains("Base")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementHeading {
    pub name: String,
    pub axis: AxisId,
    pub parent: Option<HeadingId>,
    pub sub_headings: Vec<HeadingId>,
    pub full_name: String,
    /// The single element whose full name equals this heading's full name.
    pub element: ElementId,
}

// ============================================================================
// PRE-ORDER EXPANSION
// ============================================================================

/// Flattens a forest depth-first: a node, then its children in order.
pub fn expand_preorder<'a, T, F>(roots: &'a [T], children: F) -> Vec<T>
where
    T: Copy + 'a,
    F: Fn(T) -> &'a [T],
{
    let mut out = Vec::new();
    let mut stack: Vec<T> = roots.iter().rev().copied().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(children(node).iter().rev().copied());
    }
    out
}

// ============================================================================
// AXIS TREE
// ============================================================================

/// Arena holding every axis of one table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AxisTree {
    axes: Vec<Axis>,
    elements: Vec<Element>,
    headings: Vec<ElementHeading>,
    roots: Vec<AxisId>,
}

impl AxisTree {
    /// Builds and resolves the tree for a table's root axes.
    pub fn build(source_axes: &[SourceAxis]) -> BannerResult<Self> {
        let mut tree = AxisTree::default();
        for source in source_axes {
            let id = tree.add_axis(source, None, 0)?;
            tree.roots.push(id);
        }
        Ok(tree)
    }

    pub fn root_named(&self, name: &str) -> Option<AxisId> {
        self.roots.iter().copied().find(|&id| self.axis(id).name == name)
    }

    pub fn axis(&self, id: AxisId) -> &Axis {
        &self.axes[id.index()]
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    pub fn heading(&self, id: HeadingId) -> &ElementHeading {
        &self.headings[id.index()]
    }

    pub fn nested_paths(&self, id: AxisId) -> &[Path] {
        &self.axis(id).nested_paths
    }

    /// Elements of the axis' expanded, deduplicated headings, in display order.
    pub fn own_elements(&self, id: AxisId) -> Vec<ElementId> {
        self.axis(id)
            .expanded_headings
            .iter()
            .map(|&h| self.heading(h).element)
            .collect()
    }

    // ------------------------------------------------------------------------
    // construction
    // ------------------------------------------------------------------------

    fn add_axis(
        &mut self,
        source: &SourceAxis,
        parent: Option<AxisId>,
        level: u32,
    ) -> BannerResult<AxisId> {
        let id = AxisId::from_index(self.axes.len());
        self.axes.push(Axis {
            name: source.name.clone(),
            label: source.label.clone(),
            level,
            parent,
            sub_axes: Vec::new(),
            elements: Vec::new(),
            headings: Vec::new(),
            expanded_elements: Vec::new(),
            expanded_headings: Vec::new(),
            nested_paths: Vec::new(),
        });

        let mut sub_axes = Vec::with_capacity(source.sub_axes.len());
        for sub in &source.sub_axes {
            sub_axes.push(self.add_axis(sub, Some(id), level + 1)?);
        }

        let elements: Vec<ElementId> = source
            .elements
            .iter()
            .map(|e| self.add_element(e, id, None, 0))
            .collect();
        let expanded_elements =
            expand_preorder(&elements, |e| self.elements[e.index()].sub_elements.as_slice());

        let mut by_full_name: FxHashMap<&str, (ElementId, usize)> = FxHashMap::default();
        for &e in &expanded_elements {
            by_full_name
                .entry(self.elements[e.index()].full_name.as_str())
                .and_modify(|entry| entry.1 += 1)
                .or_insert((e, 1));
        }
        let resolver = HeadingResolver {
            axis: id,
            axis_name: &source.name,
            by_full_name: &by_full_name,
        };

        let mut headings = Vec::new();
        resolver.add_headings(&mut self.headings, &source.element_headings, None, &mut headings)?;
        let expanded_headings =
            expand_preorder(&headings, |h| self.headings[h.index()].sub_headings.as_slice());

        let axis = &mut self.axes[id.index()];
        axis.sub_axes = sub_axes;
        axis.elements = elements;
        axis.headings = headings;
        axis.expanded_elements = expanded_elements;
        axis.expanded_headings = expanded_headings;

        let paths = self.compute_nested_paths(id);
        log_debug!(
            "MODEL",
            "axis '{}' level={} headings={} paths={}",
            source.name,
            level,
            self.axes[id.index()].expanded_headings.len(),
            paths.len()
        );
        self.axes[id.index()].nested_paths = paths;

        Ok(id)
    }

    fn add_element(
        &mut self,
        source: &SourceElement,
        axis: AxisId,
        parent: Option<ElementId>,
        level: u32,
    ) -> ElementId {
        let id = ElementId::from_index(self.elements.len());
        let full_name = match parent {
            Some(p) => format!("{}.{}", self.elements[p.index()].full_name, source.name),
            None => source.name.clone(),
        };
        self.elements.push(Element {
            name: source.name.clone(),
            label: source.label.clone(),
            element_type: source.element_type.clone(),
            decimals: source.decimals,
            visible: source.is_visible(),
            level,
            axis,
            parent,
            sub_elements: Vec::new(),
            full_name,
        });

        let children: Vec<ElementId> = source
            .sub_elements
            .iter()
            .map(|sub| self.add_element(sub, axis, Some(id), level + 1))
            .collect();
        self.elements[id.index()].sub_elements = children;
        id
    }

    /// Cross product of the axis' own elements (outer) with the paths of its
    /// sub-axes (inner). Sub-axis paths must already be computed.
    fn compute_nested_paths(&self, id: AxisId) -> Vec<Path> {
        let axis = self.axis(id);
        let sub: Vec<&Path> = axis
            .sub_axes
            .iter()
            .flat_map(|&s| self.nested_paths(s).iter())
            .collect();
        let own = self.own_elements(id);

        match (axis.sub_axes.is_empty(), axis.elements.is_empty()) {
            (false, false) => own
                .iter()
                .flat_map(|&e| {
                    sub.iter().map(move |row| {
                        let mut path = Path::with_capacity(row.len() + 1);
                        path.push(e);
                        path.extend(row.iter().copied());
                        path
                    })
                })
                .collect(),
            (false, true) => sub.into_iter().cloned().collect(),
            (true, false) => own.into_iter().map(|e| Path::from_elem(e, 1)).collect(),
            (true, true) => Vec::new(),
        }
    }
}

/// Resolves heading trees of one axis against its elements' full names.
struct HeadingResolver<'a> {
    axis: AxisId,
    axis_name: &'a str,
    by_full_name: &'a FxHashMap<&'a str, (ElementId, usize)>,
}

impl HeadingResolver<'_> {
    /// Adds one sibling list of headings. The first heading of each name wins.
    fn add_headings(
        &self,
        arena: &mut Vec<ElementHeading>,
        sources: &[SourceElementHeading],
        parent: Option<HeadingId>,
        out: &mut Vec<HeadingId>,
    ) -> BannerResult<()> {
        for source in sources {
            if out.iter().any(|&h| arena[h.index()].name == source.name) {
                continue;
            }

            let full_name = match parent {
                Some(p) => format!("{}.{}", arena[p.index()].full_name, source.name),
                None => source.name.clone(),
            };
            let element = self.resolve(&full_name)?;

            let id = HeadingId::from_index(arena.len());
            arena.push(ElementHeading {
                name: source.name.clone(),
                axis: self.axis,
                parent,
                sub_headings: Vec::new(),
                full_name,
                element,
            });
            out.push(id);

            let mut children = Vec::new();
            self.add_headings(arena, &source.sub_headings, Some(id), &mut children)?;
            arena[id.index()].sub_headings = children;
        }
        Ok(())
    }

    fn resolve(&self, full_name: &str) -> BannerResult<ElementId> {
        match self.by_full_name.get(full_name) {
            Some(&(element, 1)) => Ok(element),
            Some(&(_, count)) => Err(BannerError::AmbiguousHeading {
                axis: self.axis_name.to_string(),
                path: full_name.to_string(),
                count,
            }),
            None => Err(BannerError::UnresolvedHeading {
                axis: self.axis_name.to_string(),
                path: full_name.to_string(),
            }),
        }
    }
}
