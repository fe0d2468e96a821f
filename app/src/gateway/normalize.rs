//! Tolerant readers for upstream JSON.
//!
//! Nothing here fails: a missing or oddly typed field reads as an empty string,
//! zero, or an empty list.

use std::collections::HashSet;

use serde_json::Value;

use super::classify::OutcomeClassifier;
use super::types::{
    Chamber, GroupVoteBlock, MemberRef, ParliamentaryGroup, Position, RollCall, VoteCounts,
    VoteRecord,
};

/// String value of `key`; numbers are rendered, anything else is empty.
pub(crate) fn text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// First non-empty [`text`] among `keys`.
pub(crate) fn first_text(value: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| text(value, key))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Non-negative count stored as a number or numeric string; zero otherwise.
pub(crate) fn count(value: &Value, key: &str) -> u32 {
    match value.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Some(Value::String(s)) => leading_digits(s).parse().unwrap_or(0),
        _ => 0,
    }
}

fn leading_digits(s: &str) -> &str {
    let s = s.trim();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    &s[..end]
}

/// Array at `key`, or an empty slice.
pub(crate) fn list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Inner object of a `{key: {...}}` envelope, or the value itself when flat.
pub(crate) fn unwrap_envelope<'a>(value: &'a Value, key: &str) -> &'a Value {
    match value.get(key) {
        Some(inner) if inner.is_object() => inner,
        _ => value,
    }
}

/// One vote-history entry; accepts `{vote: {...}}` or a flat object, with the
/// roll-call fields either prefixed (`scrutin_numero`) or nested (`scrutin.numero`).
pub(crate) fn vote_record(raw: &Value) -> VoteRecord {
    let vote = unwrap_envelope(raw, "vote");
    let nested = vote.get("scrutin").filter(|s| s.is_object());
    let from_nested = |key: &str| nested.map(|s| text(s, key)).unwrap_or_default();

    let or_nested = |flat: String, key: &str| {
        if flat.is_empty() {
            from_nested(key)
        } else {
            flat
        }
    };

    VoteRecord {
        scrutin_number: or_nested(first_text(vote, &["scrutin_numero", "numero"]), "numero"),
        title: or_nested(first_text(vote, &["scrutin_titre", "titre"]), "titre"),
        date: or_nested(text(vote, "date"), "date"),
        position: Position::classify(&text(vote, "position")),
    }
}

/// A roll call; the group breakdown is read only when `with_breakdown`.
pub(crate) fn roll_call(
    chamber: Chamber,
    raw: &Value,
    outcomes: &OutcomeClassifier,
    with_breakdown: bool,
) -> RollCall {
    let scrutin = unwrap_envelope(raw, "scrutin");
    let raw_sort = text(scrutin, "sort");

    let group_breakdown = if with_breakdown {
        list(scrutin, "groupes").iter().map(group_block).collect()
    } else {
        Vec::new()
    };

    RollCall {
        chamber,
        numero: text(scrutin, "numero"),
        titre: first_text(scrutin, &["titre", "demandeur"]),
        date: text(scrutin, "date"),
        sort: outcomes.classify(&raw_sort),
        raw_sort,
        counts: VoteCounts {
            pour: count(scrutin, "nombre_pours"),
            contre: count(scrutin, "nombre_contres"),
            abstention: count(scrutin, "nombre_abstentions"),
        },
        group_breakdown,
    }
}

fn group_block(raw: &Value) -> GroupVoteBlock {
    let group = unwrap_envelope(raw, "groupe");
    let mut seen = HashSet::new();

    GroupVoteBlock {
        group_name: first_text(group, &["nom", "groupe_sigle"]),
        for_list: members(group, "pours", &mut seen),
        against_list: members(group, "contres", &mut seen),
        abstain_list: members(group, "abstentions", &mut seen),
    }
}

/// Voters under `position`, skipping anyone already listed in an earlier
/// position of the same group.
///
/// The list is either an array of `{votant}` / `{parlementaire_vote}` / bare
/// objects, or an object whose `votant` is one voter or an array of voters.
fn members(group: &Value, position: &str, seen: &mut HashSet<String>) -> Vec<MemberRef> {
    let voters: Vec<&Value> = match group.get(position) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.get("votant")
                    .or_else(|| item.get("parlementaire_vote"))
                    .unwrap_or(item)
            })
            .collect(),
        Some(obj @ Value::Object(_)) => match obj.get("votant") {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(single) => vec![single],
            None => Vec::new(),
        },
        _ => Vec::new(),
    };

    voters
        .into_iter()
        .map(|voter| MemberRef {
            slug: text(voter, "slug"),
            display_name: first_text(voter, &["nom", "parlementaire"]),
        })
        .filter(|member| {
            let key = if member.slug.is_empty() {
                &member.display_name
            } else {
                &member.slug
            };
            key.is_empty() || seen.insert(key.clone())
        })
        .collect()
}

pub(crate) fn parliamentary_group(raw: &Value) -> ParliamentaryGroup {
    let organisme = unwrap_envelope(raw, "organisme");
    ParliamentaryGroup {
        slug: text(organisme, "slug"),
        name: text(organisme, "nom"),
        acronym: text(organisme, "acronyme"),
        color: text(organisme, "couleur"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::types::Outcome;
    use serde_json::json;

    #[test]
    fn test_text_accepts_numbers_and_ignores_other_types() {
        let v = json!({"a": " x ", "n": 42, "b": true, "o": {}});
        assert_eq!(text(&v, "a"), "x");
        assert_eq!(text(&v, "n"), "42");
        assert_eq!(text(&v, "b"), "");
        assert_eq!(text(&v, "o"), "");
        assert_eq!(text(&v, "missing"), "");
    }

    #[test]
    fn test_count_parses_like_parse_int() {
        let v = json!({"a": "12", "b": 7, "c": "3 votes", "d": "n/a", "e": -4});
        assert_eq!(count(&v, "a"), 12);
        assert_eq!(count(&v, "b"), 7);
        assert_eq!(count(&v, "c"), 3);
        assert_eq!(count(&v, "d"), 0);
        assert_eq!(count(&v, "e"), 0);
        assert_eq!(count(&v, "missing"), 0);
    }

    #[test]
    fn test_vote_record_prefixed_fields() {
        let raw = json!({"vote": {
            "scrutin_numero": "1234",
            "scrutin_titre": "l'amendement n° 5",
            "date": "2024-03-05",
            "position": "contre"
        }});
        let vote = vote_record(&raw);
        assert_eq!(vote.scrutin_number, "1234");
        assert_eq!(vote.title, "l'amendement n° 5");
        assert_eq!(vote.date, "2024-03-05");
        assert_eq!(vote.position, Position::Against);
    }

    #[test]
    fn test_vote_record_nested_scrutin() {
        let raw = json!({"vote": {
            "scrutin": {"numero": 99, "titre": "la motion", "date": "2024-01-02"},
            "position": "pour"
        }});
        let vote = vote_record(&raw);
        assert_eq!(vote.scrutin_number, "99");
        assert_eq!(vote.title, "la motion");
        assert_eq!(vote.date, "2024-01-02");
        assert_eq!(vote.position, Position::For);
    }

    #[test]
    fn test_vote_record_empty_object() {
        let vote = vote_record(&json!({}));
        assert_eq!(vote.scrutin_number, "");
        assert_eq!(vote.position, Position::Absent);
    }

    #[test]
    fn test_roll_call_summary_skips_breakdown() {
        let raw = json!({"scrutin": {
            "numero": "42",
            "demandeur": "Président du groupe",
            "date": "2024-05-01",
            "sort": "adopté",
            "nombre_pours": "300",
            "nombre_contres": 100,
            "groupes": [{"groupe": {"nom": "G"}}]
        }});
        let rc = roll_call(Chamber::Assemblee, &raw, &OutcomeClassifier::default(), false);
        assert_eq!(rc.numero, "42");
        assert_eq!(rc.titre, "Président du groupe");
        assert_eq!(rc.sort, Outcome::Adopted);
        assert_eq!(rc.raw_sort, "adopté");
        assert_eq!(
            rc.counts,
            VoteCounts {
                pour: 300,
                contre: 100,
                abstention: 0
            }
        );
        assert!(rc.group_breakdown.is_empty());
    }

    #[test]
    fn test_group_breakdown_shapes() {
        let raw = json!({
            "numero": "7",
            "titre": "l'ensemble du projet de loi",
            "sort": "rejeté",
            "groupes": [
                {"groupe": {
                    "nom": "Groupe A",
                    "pours": [{"votant": {"slug": "a-one", "nom": "A One"}}],
                    "contres": [{"parlementaire_vote": {"slug": "a-two", "parlementaire": "A Two"}}],
                    "abstentions": [{"slug": "a-three", "nom": "A Three"}]
                }},
                {"groupe": {
                    "groupe_sigle": "GB",
                    "pours": {"votant": {"slug": "b-one", "nom": "B One"}},
                    "contres": {"votant": [
                        {"slug": "b-two", "nom": "B Two"},
                        {"slug": "b-three", "nom": "B Three"}
                    ]}
                }}
            ]
        });
        let rc = roll_call(Chamber::Assemblee, &raw, &OutcomeClassifier::default(), true);
        assert_eq!(rc.sort, Outcome::Rejected);
        assert_eq!(rc.group_breakdown.len(), 2);

        let a = &rc.group_breakdown[0];
        assert_eq!(a.group_name, "Groupe A");
        assert_eq!(a.for_list[0].slug, "a-one");
        assert_eq!(a.against_list[0].display_name, "A Two");
        assert_eq!(a.abstain_list[0].slug, "a-three");

        let b = &rc.group_breakdown[1];
        assert_eq!(b.group_name, "GB");
        assert_eq!(b.for_list.len(), 1);
        assert_eq!(b.against_list.len(), 2);
        assert!(b.abstain_list.is_empty());
        assert_eq!(
            b.counts(),
            VoteCounts {
                pour: 1,
                contre: 2,
                abstention: 0
            }
        );
    }

    #[test]
    fn test_member_listed_once_per_group() {
        let raw = json!({"groupes": [{"groupe": {
            "nom": "G",
            "pours": [{"votant": {"slug": "x", "nom": "X"}}],
            "contres": [{"votant": {"slug": "x", "nom": "X"}}, {"votant": {"slug": "y", "nom": "Y"}}]
        }}]});
        let rc = roll_call(Chamber::Assemblee, &raw, &OutcomeClassifier::default(), true);
        let block = &rc.group_breakdown[0];
        assert_eq!(block.for_list.len(), 1);
        assert_eq!(block.against_list.len(), 1);
        assert_eq!(block.against_list[0].slug, "y");
    }

    #[test]
    fn test_parliamentary_group() {
        let raw = json!({"organisme": {
            "slug": "renaissance", "nom": "Renaissance", "acronyme": "RE", "couleur": "255,200,0"
        }});
        let group = parliamentary_group(&raw);
        assert_eq!(group.acronym, "RE");
        assert_eq!(group.name, "Renaissance");
        assert_eq!(group.color, "255,200,0");
    }
}
