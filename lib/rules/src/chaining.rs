use crate::RuleGraph;
use futures::stream::{self, StreamExt, TryStreamExt};
use rdf_chain_common::QuadStream;
use rdf_chain_model::{Quad, QuadRef};
use rustc_hash::FxHashSet;

/// Derives every quad transitively entailed by applying `rules` to `quad`.
///
/// The exploration uses a last-in-first-out worklist seeded with `quad`:
/// every rule is applied to every popped quad, and every derivation is both
/// emitted and pushed for further expansion. The result therefore contains
/// all quads reachable through any chain of rule applications, in depth-first
/// discovery order; the seed itself is never emitted.
///
/// A visited set over the derived quads guarantees termination on cyclic rule
/// sets (e.g. `a ≡ b` and `b ≡ a`): a quad that was already produced in this
/// chain is neither re-emitted nor re-expanded.
pub fn chain_reasoning(rules: &RuleGraph, quad: QuadRef<'_>) -> Vec<Quad> {
    let mut derived = Vec::new();
    if rules.is_empty() {
        return derived;
    }

    let seed = quad.into_owned();
    let mut seen = FxHashSet::default();
    seen.insert(seed.clone());
    let mut worklist = vec![seed];

    while let Some(current) = worklist.pop() {
        for rule in rules.rules() {
            let Some(implied) = rule.forward_chaining(current.as_ref()) else {
                continue;
            };
            if seen.insert(implied.clone()) {
                derived.push(implied.clone());
                worklist.push(implied);
            }
        }
    }

    derived
}

/// Applies [chain_reasoning] to every quad of `quads`, flattening the
/// derivations into one stream.
///
/// The transform is purely per-quad: no state is carried across input quads,
/// and input errors pass through unchanged.
pub fn generate_implicit_quads(rules: RuleGraph, quads: QuadStream) -> QuadStream {
    quads
        .map_ok(move |quad| {
            stream::iter(chain_reasoning(&rules, quad.as_ref()).into_iter().map(Ok))
        })
        .try_flatten()
        .boxed()
}
