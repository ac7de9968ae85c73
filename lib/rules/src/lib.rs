//! Rule model and forward-chaining reasoner of RDF Chain.
//!
//! Rules are premise → conclusion substitutions over a closed vocabulary of
//! equivalence and hierarchy predicates. [ScopedRules] registers raw rule
//! triples per source scope, [select_rules] resolves the effective
//! [RuleGraph] for a source reference, and [chain_reasoning] /
//! [generate_implicit_quads] derive the facts a rule graph entails.

mod chaining;
mod relation;
mod rule;
mod scoped;

pub use chaining::*;
pub use relation::*;
pub use rule::*;
pub use scoped::*;
