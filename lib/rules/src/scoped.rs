use crate::{parse_rules, RuleGraph};
use oxrdfio::{RdfParseError, RdfParser};
use rdf_chain_common::{SourceHandle, SourceReference};
use rdf_chain_model::Triple;
use regex::Regex;
use std::collections::HashMap;
use std::io::Read;

/// A key under which rule triples can be registered.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleScope {
    /// Applies to every source.
    Wildcard,
    /// Applies to sources whose URL matches this literal URL or URI template.
    Url(String),
    /// Applies to the source carrying exactly this handle.
    Handle(SourceHandle),
}

impl From<&str> for RuleScope {
    fn from(url: &str) -> Self {
        Self::Url(url.to_owned())
    }
}

impl From<SourceHandle> for RuleScope {
    fn from(handle: SourceHandle) -> Self {
        Self::Handle(handle)
    }
}

/// A registry of raw rule triples grouped by scope.
///
/// The registry is an explicit value owned by the caller and handed to
/// reasoning sources at construction or attach time; the reasoning core never
/// mutates it. Scopes discovered at runtime are added through
/// [add_scope](Self::add_scope) by whoever discovers them.
#[derive(Clone, Debug, Default)]
pub struct ScopedRules {
    wildcard: Vec<Triple>,
    urls: Vec<(String, Vec<Triple>)>,
    handles: HashMap<SourceHandle, Vec<Triple>>,
}

impl ScopedRules {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `triples` under `scope`, appending to earlier registrations
    /// of the same scope.
    pub fn add_scope(&mut self, scope: RuleScope, triples: Vec<Triple>) {
        match scope {
            RuleScope::Wildcard => self.wildcard.extend(triples),
            RuleScope::Url(url) => {
                if let Some((_, existing)) = self.urls.iter_mut().find(|(key, _)| *key == url) {
                    existing.extend(triples);
                } else {
                    self.urls.push((url, triples));
                }
            }
            RuleScope::Handle(handle) => {
                self.handles.entry(handle).or_default().extend(triples);
            }
        }
    }

    /// The raw triples registered under exactly `scope`.
    pub fn get(&self, scope: &RuleScope) -> Option<&[Triple]> {
        match scope {
            RuleScope::Wildcard => Some(&self.wildcard),
            RuleScope::Url(url) => self
                .urls
                .iter()
                .find(|(key, _)| key == url)
                .map(|(_, triples)| triples.as_slice()),
            RuleScope::Handle(handle) => self.handles.get(handle).map(Vec::as_slice),
        }
    }

    /// Parses an RDF document and registers its triples under `scope`.
    ///
    /// The graph component of parsed quads is discarded; rule triples are
    /// graph-agnostic. Returns the number of registered triples.
    pub fn load_scope(
        &mut self,
        scope: RuleScope,
        parser: impl Into<RdfParser>,
        reader: impl Read,
    ) -> Result<usize, RdfParseError> {
        let triples = parser
            .into()
            .for_reader(reader)
            .map(|quad| quad.map(|quad| Triple::new(quad.subject, quad.predicate, quad.object)))
            .collect::<Result<Vec<_>, _>>()?;
        let count = triples.len();
        self.add_scope(scope, triples);
        Ok(count)
    }
}

/// Resolves the effective [RuleGraph] for `reference`.
///
/// The wildcard scope always applies. URL references additionally collect
/// every URL scope whose key, read as a URI template, matches the reference
/// (a literal URL is the degenerate template matching only itself). Handle
/// references additionally collect the rules registered under exactly that
/// handle; handles never participate in template matching.
pub fn select_rules(config: &ScopedRules, reference: &SourceReference) -> RuleGraph {
    let mut graph = parse_rules(&config.wildcard);
    match reference {
        SourceReference::Url(url) => {
            for (template, triples) in &config.urls {
                if uri_template_matches(template, url) {
                    graph.extend(parse_rules(triples));
                }
            }
        }
        SourceReference::Handle(handle) => {
            if let Some(triples) = config.handles.get(handle) {
                graph.extend(parse_rules(triples));
            }
        }
    }
    graph
}

/// Checks whether `url` is an expansion of the URI template `template`.
///
/// Simple expressions (`{var}`) match one or more characters excluding `/`,
/// `?` and `#`; reserved and fragment expansions (`{+var}`, `{#var}`) match
/// one or more arbitrary characters. A template that cannot be compiled
/// matches nothing.
fn uri_template_matches(template: &str, url: &str) -> bool {
    template_regex(template).is_some_and(|regex| regex.is_match(url))
}

fn template_regex(template: &str) -> Option<Regex> {
    let mut pattern = String::with_capacity(template.len() + 8);
    pattern.push('^');
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        pattern.push_str(&regex::escape(&rest[..start]));
        let expression = &rest[start + 1..];
        let end = expression.find('}')?;
        if expression.starts_with('+') || expression.starts_with('#') {
            pattern.push_str("(.+)");
        } else {
            pattern.push_str("([^/?#]+)");
        }
        rest = &expression[end + 1..];
    }
    pattern.push_str(&regex::escape(rest));
    pattern.push('$');
    Regex::new(&pattern).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_templates_match_themselves_only() {
        assert!(uri_template_matches("http://example.com/a", "http://example.com/a"));
        assert!(!uri_template_matches("http://example.com/a", "http://example.com/b"));
        assert!(!uri_template_matches("http://example.com/a", "foo"));
    }

    #[test]
    fn simple_expressions_match_single_segments() {
        assert!(uri_template_matches(
            "http://example.com/{x}/here",
            "http://example.com/somewhere/here"
        ));
        assert!(!uri_template_matches(
            "http://example.com/{x}/here",
            "http://example.com/some/where/here"
        ));
        assert!(!uri_template_matches(
            "http://example.com/{x}/here",
            "http://example.com//here"
        ));
    }

    #[test]
    fn reserved_expressions_match_across_segments() {
        assert!(uri_template_matches(
            "http://example.com/{+path}",
            "http://example.com/some/where"
        ));
    }

    #[test]
    fn unterminated_expressions_match_nothing() {
        assert!(!uri_template_matches("http://example.com/{x", "http://example.com/a"));
    }
}
