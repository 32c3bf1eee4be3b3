//! Phase indexing over a flat transcript.
//!
//! Two grouping strategies, chosen by what the transcript carries:
//! persisted phase tags when any message has one, otherwise inline
//! transition markers of the exact form `[Moving to next phase: NAME]`.
//! Marker messages are bookkeeping and never appear in the output;
//! marker-derived grouping stamps the inferred phase onto the returned
//! copies so downstream filtering is stable.

use std::collections::BTreeMap;

use crate::domain::interview::Phase;

use super::StoredMessage;

const MARKER_PREFIX: &str = "[Moving to next phase: ";
const MARKER_SUFFIX: &str = "]";

/// Extracts the phase name from a transition marker, if the content is one.
///
/// Returns the raw name, which may not correspond to a known phase.
pub fn parse_transition_marker(content: &str) -> Option<&str> {
    content
        .trim()
        .strip_prefix(MARKER_PREFIX)?
        .strip_suffix(MARKER_SUFFIX)
}

/// Partitions a transcript into phase-labeled chapter groups.
///
/// If any message carries a persisted phase tag, grouping is by tag,
/// restricted to content-bearing phases. Otherwise the transcript is
/// scanned for transition markers: everything between one marker and
/// the next belongs to the phase the preceding marker names, messages
/// before the first marker belong to no phase, and a marker naming an
/// unknown phase closes the current group without opening a new one.
///
/// Empty input yields an empty map.
pub fn group_by_phase(messages: &[StoredMessage]) -> BTreeMap<Phase, Vec<StoredMessage>> {
    if messages.iter().any(|m| m.phase.is_some()) {
        group_by_tag(messages)
    } else {
        group_by_marker(messages)
    }
}

/// Unions the chapter groups for a phase subset, preserving original order.
///
/// Marker messages are excluded; each returned message carries its
/// resolved phase tag, so filtering an already-filtered list is a
/// no-op.
pub fn filter_by_phases(messages: &[StoredMessage], selected: &[Phase]) -> Vec<StoredMessage> {
    let groups = group_by_phase(messages);

    messages
        .iter()
        .filter_map(|msg| {
            for phase in selected {
                if let Some(group) = groups.get(phase) {
                    if let Some(found) = group.iter().find(|m| m.id == msg.id) {
                        return Some(found.clone());
                    }
                }
            }
            None
        })
        .collect()
}

fn group_by_tag(messages: &[StoredMessage]) -> BTreeMap<Phase, Vec<StoredMessage>> {
    let mut grouped: BTreeMap<Phase, Vec<StoredMessage>> = BTreeMap::new();

    for msg in messages {
        let Some(phase) = msg.phase else {
            continue;
        };
        if !phase.is_content_bearing() {
            continue;
        }
        grouped.entry(phase).or_default().push(msg.clone());
    }

    grouped
}

fn group_by_marker(messages: &[StoredMessage]) -> BTreeMap<Phase, Vec<StoredMessage>> {
    let mut grouped: BTreeMap<Phase, Vec<StoredMessage>> = BTreeMap::new();
    let mut current: Option<Phase> = None;

    for msg in messages {
        if let Some(name) = parse_transition_marker(&msg.content) {
            current = Phase::from_wire_name(name).filter(Phase::is_content_bearing);
            continue;
        }

        if let Some(phase) = current {
            grouped
                .entry(phase)
                .or_default()
                .push(msg.clone().with_phase(phase));
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::StoryId;
    use crate::domain::transcript::Role;

    fn msg(role: Role, content: &str) -> StoredMessage {
        StoredMessage::new(StoryId::new(), role, content).unwrap()
    }

    fn tagged(role: Role, content: &str, phase: Phase) -> StoredMessage {
        msg(role, content).with_phase(phase)
    }

    fn marker_transcript() -> Vec<StoredMessage> {
        vec![
            msg(Role::Assistant, "Welcome! Ready to begin?"),
            msg(Role::User, "yes"),
            msg(Role::User, "[Moving to next phase: FAMILY_HISTORY]"),
            msg(Role::Assistant, "Tell me about your parents."),
            msg(Role::User, "My parents were from a small town in Brazil."),
            msg(Role::User, "[Moving to next phase: CHILDHOOD]"),
            msg(Role::User, "I played soccer."),
            msg(Role::User, "[Moving to next phase: ADOLESCENCE]"),
            msg(Role::User, "I fell in love."),
        ]
    }

    mod marker_parsing {
        use super::*;

        #[test]
        fn parses_well_formed_marker() {
            assert_eq!(
                parse_transition_marker("[Moving to next phase: CHILDHOOD]"),
                Some("CHILDHOOD")
            );
        }

        #[test]
        fn tolerates_surrounding_whitespace() {
            assert_eq!(
                parse_transition_marker("  [Moving to next phase: PRESENT]  "),
                Some("PRESENT")
            );
        }

        #[test]
        fn rejects_ordinary_content() {
            assert_eq!(parse_transition_marker("I played soccer."), None);
            assert_eq!(parse_transition_marker("[Moving on]"), None);
        }
    }

    mod marker_grouping {
        use super::*;

        #[test]
        fn groups_content_between_markers() {
            let grouped = group_by_phase(&marker_transcript());

            let childhood: Vec<_> = grouped[&Phase::Childhood]
                .iter()
                .map(|m| m.content.as_str())
                .collect();
            assert_eq!(childhood, vec!["I played soccer."]);

            let adolescence: Vec<_> = grouped[&Phase::Adolescence]
                .iter()
                .map(|m| m.content.as_str())
                .collect();
            assert_eq!(adolescence, vec!["I fell in love."]);
        }

        #[test]
        fn messages_before_first_marker_belong_to_no_phase() {
            let grouped = group_by_phase(&marker_transcript());
            for group in grouped.values() {
                for m in group {
                    assert_ne!(m.content, "Welcome! Ready to begin?");
                    assert_ne!(m.content, "yes");
                }
            }
        }

        #[test]
        fn marker_messages_never_appear_in_output() {
            let grouped = group_by_phase(&marker_transcript());
            for group in grouped.values() {
                for m in group {
                    assert!(parse_transition_marker(&m.content).is_none());
                }
            }
        }

        #[test]
        fn unknown_phase_name_closes_current_group() {
            let messages = vec![
                msg(Role::User, "[Moving to next phase: CHILDHOOD]"),
                msg(Role::User, "I played soccer."),
                msg(Role::User, "[Moving to next phase: RETIREMENT]"),
                msg(Role::User, "This belongs to no known chapter."),
            ];
            let grouped = group_by_phase(&messages);
            assert_eq!(grouped.len(), 1);
            assert_eq!(grouped[&Phase::Childhood].len(), 1);
        }

        #[test]
        fn grouped_messages_are_stamped_with_their_phase() {
            let grouped = group_by_phase(&marker_transcript());
            for (phase, group) in &grouped {
                for m in group {
                    assert_eq!(m.phase, Some(*phase));
                }
            }
        }

        #[test]
        fn empty_input_yields_empty_map() {
            let grouped = group_by_phase(&[]);
            assert!(grouped.is_empty());
        }
    }

    mod tag_grouping {
        use super::*;

        #[test]
        fn groups_by_persisted_tag() {
            let messages = vec![
                tagged(Role::User, "My parents met in 1960.", Phase::FamilyHistory),
                tagged(Role::Assistant, "How lovely.", Phase::FamilyHistory),
                tagged(Role::User, "I played soccer.", Phase::Childhood),
            ];
            let grouped = group_by_phase(&messages);
            assert_eq!(grouped[&Phase::FamilyHistory].len(), 2);
            assert_eq!(grouped[&Phase::Childhood].len(), 1);
        }

        #[test]
        fn untagged_messages_are_skipped_in_tag_mode() {
            let messages = vec![
                tagged(Role::User, "I played soccer.", Phase::Childhood),
                msg(Role::User, "no tag on this one"),
            ];
            let grouped = group_by_phase(&messages);
            assert_eq!(grouped.len(), 1);
            assert_eq!(grouped[&Phase::Childhood].len(), 1);
        }

        #[test]
        fn non_content_phases_are_excluded() {
            let messages = vec![
                tagged(Role::User, "yes", Phase::Greeting),
                tagged(Role::User, "3", Phase::AgeSelection),
                tagged(Role::User, "I played soccer.", Phase::Childhood),
                tagged(Role::User, "A life well lived.", Phase::Synthesis),
            ];
            let grouped = group_by_phase(&messages);
            assert_eq!(grouped.len(), 1);
            assert!(grouped.contains_key(&Phase::Childhood));
        }

        #[test]
        fn groups_iterate_in_chronological_phase_order() {
            let messages = vec![
                tagged(Role::User, "Now I build software.", Phase::Present),
                tagged(Role::User, "I played soccer.", Phase::Childhood),
                tagged(Role::User, "My parents met in 1960.", Phase::FamilyHistory),
            ];
            let grouped = group_by_phase(&messages);
            let order: Vec<_> = grouped.keys().copied().collect();
            assert_eq!(
                order,
                vec![Phase::FamilyHistory, Phase::Childhood, Phase::Present]
            );
        }
    }

    mod filtering {
        use super::*;

        #[test]
        fn filter_returns_only_selected_phases() {
            let filtered = filter_by_phases(&marker_transcript(), &[Phase::Childhood]);
            let content: Vec<_> = filtered.iter().map(|m| m.content.as_str()).collect();
            assert_eq!(content, vec!["I played soccer."]);
        }

        #[test]
        fn filter_unions_multiple_phases_in_original_order() {
            let filtered = filter_by_phases(
                &marker_transcript(),
                &[Phase::FamilyHistory, Phase::Adolescence],
            );
            let content: Vec<_> = filtered.iter().map(|m| m.content.as_str()).collect();
            assert_eq!(
                content,
                vec![
                    "Tell me about your parents.",
                    "My parents were from a small town in Brazil.",
                    "I fell in love.",
                ]
            );
        }

        #[test]
        fn filter_excludes_markers() {
            let filtered = filter_by_phases(
                &marker_transcript(),
                &[Phase::FamilyHistory, Phase::Childhood, Phase::Adolescence],
            );
            for m in &filtered {
                assert!(parse_transition_marker(&m.content).is_none());
            }
        }

        #[test]
        fn filter_is_idempotent() {
            let once = filter_by_phases(&marker_transcript(), &[Phase::Childhood]);
            let twice = filter_by_phases(&once, &[Phase::Childhood]);
            assert_eq!(once, twice);
        }

        #[test]
        fn filter_of_absent_phase_is_empty() {
            let filtered = filter_by_phases(&marker_transcript(), &[Phase::Midlife]);
            assert!(filtered.is_empty());
        }

        #[test]
        fn filter_of_empty_input_is_empty() {
            let filtered = filter_by_phases(&[], &[Phase::Childhood]);
            assert!(filtered.is_empty());
        }
    }
}
