//! The closed selector grammar for `faces()` / `edges()`.
//!
//! Direction words `>X <X >Y <Y >Z <Z` pick the extremum-coordinate set;
//! parallel words `|X |Y |Z` pick edges parallel to an axis. Two selectors
//! join with `and` (intersection) or `or` (union), evaluated left to right
//! with no precedence. A malformed selector yields an empty selection,
//! never an error.

use kernel_bridge::{EdgeInfo, FaceInfo};

/// Tolerance for "same extremum coordinate" comparisons.
const COORD_TOLERANCE: f64 = 1e-6;

/// Alignment threshold for `|X`-style parallel matches.
const PARALLEL_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisIndex {
    X = 0,
    Y = 1,
    Z = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Term {
    Max(AxisIndex),
    Min(AxisIndex),
    Parallel(AxisIndex),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Join {
    And,
    Or,
}

/// A parsed selector expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    first: Term,
    rest: Vec<(Join, Term)>,
}

fn parse_axis(c: char) -> Option<AxisIndex> {
    match c {
        'X' => Some(AxisIndex::X),
        'Y' => Some(AxisIndex::Y),
        'Z' => Some(AxisIndex::Z),
        _ => None,
    }
}

fn parse_term(word: &str) -> Option<Term> {
    let mut chars = word.chars();
    let (op, axis) = (chars.next()?, chars.next()?);
    if chars.next().is_some() {
        return None;
    }
    let axis = parse_axis(axis)?;
    match op {
        '>' => Some(Term::Max(axis)),
        '<' => Some(Term::Min(axis)),
        '|' => Some(Term::Parallel(axis)),
        _ => None,
    }
}

impl Selector {
    /// Parse a selector string. `None` for anything outside the grammar.
    pub fn parse(input: &str) -> Option<Selector> {
        let mut words = input.split_whitespace();
        let first = parse_term(words.next()?)?;
        let mut rest = Vec::new();
        loop {
            let Some(join_word) = words.next() else {
                break;
            };
            let join = match join_word {
                "and" => Join::And,
                "or" => Join::Or,
                _ => return None,
            };
            let term = parse_term(words.next()?)?;
            rest.push((join, term));
        }
        Some(Selector { first, rest })
    }

    /// Evaluate against a set of faces, returning matching indices.
    pub fn eval_faces(&self, faces: &[FaceInfo]) -> Vec<usize> {
        self.eval(faces.len(), |term, candidates| {
            face_term(term, faces, candidates)
        })
    }

    /// Evaluate against a set of edges, returning matching indices.
    pub fn eval_edges(&self, edges: &[EdgeInfo]) -> Vec<usize> {
        self.eval(edges.len(), |term, candidates| {
            edge_term(term, edges, candidates)
        })
    }

    fn eval<F>(&self, universe: usize, term_set: F) -> Vec<usize>
    where
        F: Fn(Term, &[usize]) -> Vec<usize>,
    {
        let all: Vec<usize> = (0..universe).collect();
        let mut acc = term_set(self.first, &all);
        for (join, term) in &self.rest {
            let set = term_set(*term, &all);
            acc = match join {
                Join::And => acc.into_iter().filter(|i| set.contains(i)).collect(),
                Join::Or => {
                    let mut merged = acc;
                    for i in set {
                        if !merged.contains(&i) {
                            merged.push(i);
                        }
                    }
                    merged.sort_unstable();
                    merged
                }
            };
        }
        acc
    }
}

fn extremum(values: &[(usize, f64)], maximise: bool) -> Vec<usize> {
    let Some(best) = values
        .iter()
        .map(|(_, v)| *v)
        .fold(None::<f64>, |acc, v| match acc {
            None => Some(v),
            Some(b) => Some(if maximise { b.max(v) } else { b.min(v) }),
        })
    else {
        return Vec::new();
    };
    values
        .iter()
        .filter(|(_, v)| (v - best).abs() < COORD_TOLERANCE)
        .map(|(i, _)| *i)
        .collect()
}

fn face_term(term: Term, faces: &[FaceInfo], candidates: &[usize]) -> Vec<usize> {
    match term {
        Term::Max(axis) | Term::Min(axis) => {
            let values: Vec<(usize, f64)> = candidates
                .iter()
                .map(|&i| (i, faces[i].centroid[axis as usize]))
                .collect();
            extremum(&values, matches!(term, Term::Max(_)))
        }
        // Parallel words are edge-only; on faces they select nothing.
        Term::Parallel(_) => Vec::new(),
    }
}

fn edge_term(term: Term, edges: &[EdgeInfo], candidates: &[usize]) -> Vec<usize> {
    match term {
        Term::Max(axis) | Term::Min(axis) => {
            let values: Vec<(usize, f64)> = candidates
                .iter()
                .map(|&i| (i, edges[i].midpoint[axis as usize]))
                .collect();
            extremum(&values, matches!(term, Term::Max(_)))
        }
        Term::Parallel(axis) => candidates
            .iter()
            .filter(|&&i| {
                edges[i]
                    .direction
                    .map_or(false, |d| d[axis as usize].abs() > 1.0 - PARALLEL_TOLERANCE)
            })
            .copied()
            .collect(),
    }
}
