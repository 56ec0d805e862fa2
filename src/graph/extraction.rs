//! Relation extraction from disposition notes (regex-based).
//!
//! Notes look like:
//! - `Revoked by: EO 13811, September 29, 2017`
//! - `Amends: EO 13597, January 19, 2012`
//! - `See: EO 14024, April 15, 2021; EO 14039, August 20, 2021`
//!
//! Each physical line is checked against an ordered rule table. Single-target
//! rules take the first match on the line; the `See:` rule takes every `EO <n>`
//! in its clause, which runs until the next recognised keyword.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use super::{DocumentId, RelationType};

/// An unvalidated relationship. The target may not exist in the node set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelationCandidate {
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    pub source: DocumentId,
    pub target: DocumentId,
}

enum RuleKind {
    /// First capture of group 1 on the line.
    Single(Regex),
    /// Keyword opens a clause; every number in the clause is a target.
    Clause(Regex),
}

struct RelationRule {
    relation_type: RelationType,
    kind: RuleKind,
}

impl RelationRule {
    fn single(relation_type: RelationType, keyword: &str) -> Self {
        let pattern = format!(r"(?i)\b{}\s*:\s*(?:EO\s*)?(\d+)", keyword);
        Self {
            relation_type,
            kind: RuleKind::Single(Regex::new(&pattern).expect("Invalid regex pattern")),
        }
    }

    fn clause(relation_type: RelationType, keyword: &str) -> Self {
        let pattern = format!(r"(?i)\b{}\s*:", keyword);
        Self {
            relation_type,
            kind: RuleKind::Clause(Regex::new(&pattern).expect("Invalid regex pattern")),
        }
    }

    fn apply(&self, line: &str, source: DocumentId, out: &mut Vec<RelationCandidate>) {
        match &self.kind {
            RuleKind::Single(re) => {
                if let Some(target) = re
                    .captures(line)
                    .and_then(|cap| cap.get(1))
                    .and_then(|m| m.as_str().parse::<DocumentId>().ok())
                {
                    out.push(self.candidate(source, target));
                }
            }
            RuleKind::Clause(re) => {
                for keyword in re.find_iter(line) {
                    let rest = &line[keyword.end()..];
                    let clause_end = keyword_regex().find(rest).map_or(rest.len(), |m| m.start());
                    let clause = &rest[..clause_end];
                    for cap in clause_number_regex().captures_iter(clause) {
                        if let Some(target) =
                            cap.get(1).and_then(|m| m.as_str().parse::<DocumentId>().ok())
                        {
                            out.push(self.candidate(source, target));
                        }
                    }
                }
            }
        }
    }

    fn candidate(&self, source: DocumentId, target: DocumentId) -> RelationCandidate {
        // Passive forms ("revoked by") keep the row as source as well; the
        // relation type carries the direction of the action.
        RelationCandidate {
            relation_type: self.relation_type,
            source,
            target,
        }
    }
}

const KEYWORDS: [(RelationType, &str); 7] = [
    (RelationType::RevokedBy, r"Revoked\s+by"),
    (RelationType::Revokes, r"Revokes"),
    (RelationType::Amends, r"Amends"),
    (RelationType::See, r"See"),
    (RelationType::Supersedes, r"Supersedes"),
    (RelationType::ContinuedBy, r"Continued\s+by"),
    (RelationType::ReinstatedBy, r"Reinstated\s+by"),
];

fn rules() -> &'static [RelationRule] {
    static RULES: OnceLock<Vec<RelationRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        KEYWORDS
            .iter()
            .map(|&(relation_type, keyword)| match relation_type {
                RelationType::See => RelationRule::clause(relation_type, keyword),
                _ => RelationRule::single(relation_type, keyword),
            })
            .collect()
    })
}

/// Any recognised keyword; bounds a `See:` clause.
fn keyword_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternatives: Vec<&str> = KEYWORDS.iter().map(|&(_, k)| k).collect();
        let pattern = format!(r"(?i)\b(?:{})\s*:", alternatives.join("|"));
        Regex::new(&pattern).expect("Invalid regex pattern")
    })
}

/// A number at the very start of a clause, or any `EO <n>` inside it.
fn clause_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:^\s*|\bEO\s*)(\d+)").expect("Invalid regex pattern"))
}

/// Extract relationship candidates from one row's disposition notes.
///
/// Output order is line order, then rule order (revoked by, revokes, amends,
/// see, supersedes, continued by, reinstated by), then match order within a
/// `See:` clause. Unrecognised text is ignored.
pub fn extract_relations(notes: Option<&str>, source: DocumentId) -> Vec<RelationCandidate> {
    let mut relations = Vec::new();

    let Some(notes) = notes else {
        return relations;
    };

    for line in notes.lines().map(str::trim).filter(|l| !l.is_empty()) {
        for rule in rules() {
            rule.apply(line, source, &mut relations);
        }
    }

    relations
}
