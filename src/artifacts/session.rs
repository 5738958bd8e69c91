//! Session grouping and latest-session resolution
//!
//! Both functions are pure over a snapshot of artifacts; they never touch
//! the filesystem and never fail.

use super::{AudioArtifact, Session};
use std::collections::HashMap;

/// Group artifacts into sessions, newest session first
///
/// Artifacts are bucketed by session key. Sessions with equal latest
/// timestamps are ordered by key so repeated calls over the same snapshot
/// produce identical output.
///
/// # Examples
///
/// ```
/// use blogcast::artifacts::{group_sessions, AudioArtifact};
/// use std::time::{Duration, SystemTime};
///
/// let t = |s| SystemTime::UNIX_EPOCH + Duration::from_secs(s);
/// let sessions = group_sessions(&[
///     AudioArtifact::new("ep_part2.mp3", 20, t(2)),
///     AudioArtifact::new("ep_part1.mp3", 10, t(1)),
///     AudioArtifact::new("other.mp3", 5, t(0)),
/// ]);
/// assert_eq!(sessions.len(), 2);
/// assert_eq!(sessions[0].key, "ep");
/// assert_eq!(sessions[0].total_size, 30);
/// ```
pub fn group_sessions(artifacts: &[AudioArtifact]) -> Vec<Session> {
    let mut buckets: HashMap<String, Vec<AudioArtifact>> = HashMap::new();
    for artifact in artifacts {
        buckets
            .entry(artifact.classification().session_key)
            .or_default()
            .push(artifact.clone());
    }

    let mut sessions: Vec<Session> = buckets
        .into_iter()
        .map(|(key, members)| Session::new(key, members))
        .collect();

    sessions.sort_by(|a, b| b.latest.cmp(&a.latest).then_with(|| a.key.cmp(&b.key)));

    tracing::debug!(
        "Grouped {} artifacts into {} sessions",
        artifacts.len(),
        sessions.len()
    );

    sessions
}

/// Resolve the session containing the most recently created artifact
///
/// Membership is decided with the convention that matched the newest file,
/// so `ep_part1` and `part1_ep` are never mixed into one result. Returns
/// `None` when there are no artifacts.
///
/// # Examples
///
/// ```
/// use blogcast::artifacts::{resolve_latest_session, AudioArtifact};
/// use std::time::{Duration, SystemTime};
///
/// let t = |s| SystemTime::UNIX_EPOCH + Duration::from_secs(s);
/// let latest = resolve_latest_session(&[
///     AudioArtifact::new("solo.mp3", 1, t(5)),
/// ])
/// .unwrap();
/// assert_eq!(latest.artifacts[0].file_name(), "solo.mp3");
/// ```
pub fn resolve_latest_session(artifacts: &[AudioArtifact]) -> Option<Session> {
    let anchor = artifacts.iter().max_by(|a, b| {
        a.created
            .cmp(&b.created)
            .then_with(|| a.file_name().cmp(&b.file_name()))
    })?;
    let anchor_class = anchor.classification();

    // The anchor always matches itself, so a lone file yields a singleton.
    let members: Vec<AudioArtifact> = artifacts
        .iter()
        .filter(|a| a.classification().same_session(&anchor_class))
        .cloned()
        .collect();

    tracing::debug!(
        "Latest session '{}' anchored on {} with {} part(s)",
        anchor_class.session_key,
        anchor.file_name(),
        members.len()
    );

    Some(Session::new(anchor_class.session_key, members))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn artifact(name: &str, size: u64, secs: u64) -> AudioArtifact {
        AudioArtifact::new(format!("output/audio/{}.mp3", name), size, at(secs))
    }

    fn names(session: &Session) -> Vec<String> {
        session.artifacts.iter().map(|a| a.stem()).collect()
    }

    #[test]
    fn test_resolve_latest_multi_part_excludes_other() {
        let artifacts = vec![
            artifact("ep_part1", 10, 1),
            artifact("ep_part2", 10, 2),
            artifact("other", 10, 0),
        ];
        let session = resolve_latest_session(&artifacts).unwrap();
        assert_eq!(names(&session), vec!["ep_part1", "ep_part2"]);
        assert_eq!(session.key, "ep");
    }

    #[test]
    fn test_resolve_latest_single_file() {
        let session = resolve_latest_session(&[artifact("solo", 7, 5)]).unwrap();
        assert_eq!(names(&session), vec!["solo"]);
        assert_eq!(session.total_size, 7);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(group_sessions(&[]).is_empty());
        assert!(resolve_latest_session(&[]).is_none());
    }

    #[test]
    fn test_resolve_orders_by_part_not_time() {
        let artifacts = vec![
            artifact("ep_part3", 1, 1),
            artifact("ep_part1", 1, 3),
            artifact("ep_part2", 1, 2),
        ];
        let session = resolve_latest_session(&artifacts).unwrap();
        assert_eq!(names(&session), vec!["ep_part1", "ep_part2", "ep_part3"]);
    }

    #[test]
    fn test_resolve_orders_numerically_not_lexically() {
        let artifacts = vec![
            artifact("ep_part10", 1, 10),
            artifact("ep_part2", 1, 2),
            artifact("ep_part1", 1, 1),
        ];
        let session = resolve_latest_session(&artifacts).unwrap();
        assert_eq!(names(&session), vec!["ep_part1", "ep_part2", "ep_part10"]);
    }

    #[test]
    fn test_resolve_does_not_mix_conventions() {
        let artifacts = vec![
            artifact("ep_part1", 1, 1),
            artifact("ep_part2", 1, 5),
            artifact("part1_ep", 1, 2),
            artifact("ep", 1, 3),
        ];
        let session = resolve_latest_session(&artifacts).unwrap();
        assert_eq!(names(&session), vec!["ep_part1", "ep_part2"]);
    }

    #[test]
    fn test_resolve_prefix_anchor() {
        let artifacts = vec![
            artifact("part2_talk", 1, 4),
            artifact("part1_talk", 1, 3),
            artifact("talk_part1", 1, 1),
        ];
        let session = resolve_latest_session(&artifacts).unwrap();
        assert_eq!(names(&session), vec!["part1_talk", "part2_talk"]);
    }

    #[test]
    fn test_resolve_standalone_anchor_is_singleton() {
        let artifacts = vec![artifact("ep_part1", 1, 1), artifact("ep", 1, 9)];
        let session = resolve_latest_session(&artifacts).unwrap();
        assert_eq!(names(&session), vec!["ep"]);
    }

    #[test]
    fn test_resolve_particle_is_its_own_session() {
        let artifacts = vec![artifact("my_particle", 1, 1), artifact("my_part2", 1, 0)];
        let session = resolve_latest_session(&artifacts).unwrap();
        assert_eq!(session.key, "my_particle");
        assert_eq!(names(&session), vec!["my_particle"]);
    }

    #[test]
    fn test_group_sessions_newest_first() {
        let artifacts = vec![
            artifact("old_part1", 1, 1),
            artifact("old_part2", 1, 2),
            artifact("new", 1, 10),
            artifact("mid_part1", 1, 5),
        ];
        let sessions = group_sessions(&artifacts);
        let keys: Vec<&str> = sessions.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_group_sessions_is_idempotent() {
        let artifacts = vec![
            artifact("b_part1", 1, 3),
            artifact("a_part1", 1, 3),
            artifact("a_part2", 1, 1),
            artifact("c", 1, 3),
            artifact("b_part2", 1, 0),
        ];
        let first = group_sessions(&artifacts);
        let second = group_sessions(&artifacts);
        assert_eq!(first, second);

        let keys: Vec<&str> = first.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_browse_groups_standalone_with_parts_but_latest_does_not() {
        let artifacts = vec![
            artifact("ep_part1", 10, 1),
            artifact("ep_part2", 20, 2),
            artifact("ep", 5, 3),
            artifact("other", 1, 0),
        ];

        let sessions = group_sessions(&artifacts);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].key, "ep");
        assert_eq!(names(&sessions[0]), vec!["ep", "ep_part1", "ep_part2"]);
        assert_eq!(sessions[0].total_size, 35);

        let latest = resolve_latest_session(&artifacts).unwrap();
        assert_eq!(latest.key, "ep");
        assert_eq!(names(&latest), vec!["ep"]);
    }

    #[test]
    fn test_group_sessions_part_order_non_decreasing() {
        let artifacts = vec![
            artifact("ep_part4", 1, 0),
            artifact("ep_part1", 1, 1),
            artifact("part2_ep", 1, 2),
            artifact("ep_part2", 1, 3),
            artifact("ep", 1, 4),
        ];
        for session in group_sessions(&artifacts) {
            let parts: Vec<u32> = session.artifacts.iter().map(|a| a.part).collect();
            assert!(parts.windows(2).all(|w| w[0] <= w[1]), "{:?}", parts);
        }
    }

    #[test]
    fn test_group_sessions_ties_broken_by_file_name() {
        let artifacts = vec![
            artifact("part2_ep", 1, 0),
            artifact("ep_part2", 1, 0),
            artifact("ep_part1", 1, 0),
        ];
        let sessions = group_sessions(&artifacts);
        assert_eq!(sessions.len(), 1);
        assert_eq!(
            names(&sessions[0]),
            vec!["ep_part1", "ep_part2", "part2_ep"]
        );
    }

    #[test]
    fn test_total_size_is_sum_of_members() {
        let artifacts = vec![
            artifact("ep_part1", 1_000, 1),
            artifact("ep_part2", 2_500, 2),
            artifact("ep_part3", 4_096, 3),
            artifact("solo", 42, 4),
        ];
        for session in group_sessions(&artifacts) {
            let expected: u64 = session.artifacts.iter().map(|a| a.size).sum();
            assert_eq!(session.total_size, expected);
        }
        let latest = resolve_latest_session(&artifacts).unwrap();
        assert_eq!(latest.total_size, 42);
    }

    #[test]
    fn test_session_latest_is_max_member_time() {
        let artifacts = vec![artifact("ep_part1", 1, 7), artifact("ep_part2", 1, 3)];
        let sessions = group_sessions(&artifacts);
        assert_eq!(sessions[0].latest, at(7));
    }
}
