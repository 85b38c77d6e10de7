//! Calendar-day grouping of posts for the schedule sidebar and main list.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::post::{Post, PostId};
use super::settings::ScheduleSettings;

/// Sentinel key for posts without a publish instant.
pub const UNSCHEDULED_KEY: &str = "unscheduled";
/// Display label for the unscheduled group.
pub const UNSCHEDULED_LABEL: &str = "Unscheduled";

/// A bucket of posts sharing one local calendar day (or unscheduled).
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    /// `"YYYY-MM-DD"` in the configured zone, or [`UNSCHEDULED_KEY`].
    pub key: String,
    /// Long display date ("January 20, 2025"), or [`UNSCHEDULED_LABEL`].
    pub label: String,
    /// Member posts, in input order.
    pub posts: Vec<Post>,
}

/// Buckets posts by local calendar day in the configured zone.
///
/// Dated groups come first, most recent day first; the unscheduled group, if
/// any post lacks a publish instant, is always last. Posts keep their input
/// order within a group. Pure: the same input always yields the same groups.
pub fn group_by_day(posts: &[Post], settings: &ScheduleSettings) -> Vec<DayGroup> {
    let mut dated: BTreeMap<Reverse<NaiveDate>, Vec<Post>> = BTreeMap::new();
    let mut unscheduled: Vec<Post> = Vec::new();

    for post in posts {
        match post.published_at {
            Some(at) => dated
                .entry(Reverse(at.with_timezone(&settings.zone).date_naive()))
                .or_default()
                .push(post.clone()),
            None => unscheduled.push(post.clone()),
        }
    }

    let mut groups: Vec<DayGroup> = dated
        .into_iter()
        .map(|(Reverse(date), posts)| DayGroup {
            key: date.format("%Y-%m-%d").to_string(),
            label: settings.long_date(date),
            posts,
        })
        .collect();

    if !unscheduled.is_empty() {
        groups.push(DayGroup {
            key: UNSCHEDULED_KEY.to_string(),
            label: UNSCHEDULED_LABEL.to_string(),
            posts: unscheduled,
        });
    }

    groups
}

/// Returns `true` if `post` is the active post.
///
/// Ids are compared type-insensitively ([`PostId`] normalizes numeric and
/// string forms), so an active id of `"2"` matches a post id of `2`.
pub fn is_active_post(post: &Post, active: Option<&PostId>) -> bool {
    active.is_some_and(|id| *id == post.id)
}

/// Returns `true` if `group` contains the active post.
pub fn is_active_group(group: &DayGroup, active: Option<&PostId>) -> bool {
    group.posts.iter().any(|post| is_active_post(post, active))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;
    use quickcheck_macros::quickcheck;

    use super::*;

    fn make_post(id: i64, published_at: Option<&str>) -> Post {
        Post {
            id: PostId::from(id),
            title: format!("Post {id}"),
            description: "body".to_string(),
            published_at: published_at.map(|s| {
                chrono::DateTime::parse_from_rfc3339(s)
                    .unwrap()
                    .with_timezone(&Utc)
            }),
            created_by: None,
        }
    }

    fn utc_settings() -> ScheduleSettings {
        ScheduleSettings::default()
    }

    mod partitioning {
        use super::*;

        #[test]
        fn empty_input_yields_no_groups() {
            assert!(group_by_day(&[], &utc_settings()).is_empty());
        }

        #[test]
        fn single_post() {
            let posts = [make_post(1, Some("2025-01-20T08:00:00Z"))];
            let groups = group_by_day(&posts, &utc_settings());
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].key, "2025-01-20");
            assert_eq!(groups[0].label, "January 20, 2025");
            assert_eq!(groups[0].posts, posts);
        }

        #[test]
        fn spec_example_ordering() {
            let posts = [
                make_post(1, Some("2025-01-20T09:00:00Z")),
                make_post(2, None),
                make_post(3, Some("2025-01-22T10:00:00Z")),
                make_post(4, Some("2025-01-20T07:00:00Z")),
            ];
            let groups = group_by_day(&posts, &utc_settings());
            let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
            assert_eq!(keys, ["2025-01-22", "2025-01-20", UNSCHEDULED_KEY]);

            // Same-day posts keep input order, not time-of-day order.
            let day_ids: Vec<&PostId> = groups[1].posts.iter().map(|p| &p.id).collect();
            assert_eq!(day_ids, [&PostId::from(1), &PostId::from(4)]);
        }

        #[test]
        fn unscheduled_last_regardless_of_input_position() {
            let posts = [
                make_post(1, None),
                make_post(2, Some("2020-06-01T12:00:00Z")),
            ];
            let groups = group_by_day(&posts, &utc_settings());
            assert_eq!(groups.last().unwrap().key, UNSCHEDULED_KEY);
            assert_eq!(groups.last().unwrap().label, UNSCHEDULED_LABEL);
        }

        #[test]
        fn no_unscheduled_group_when_all_dated() {
            let posts = [make_post(1, Some("2025-01-20T08:00:00Z"))];
            let groups = group_by_day(&posts, &utc_settings());
            assert!(groups.iter().all(|g| g.key != UNSCHEDULED_KEY));
        }

        #[test]
        fn idempotent_over_identical_input() {
            let posts = [
                make_post(1, Some("2025-01-22T10:00:00Z")),
                make_post(2, None),
                make_post(3, Some("2025-01-20T09:00:00Z")),
            ];
            let first = group_by_day(&posts, &utc_settings());
            let second = group_by_day(&posts, &utc_settings());
            assert_eq!(first, second);
        }

        #[quickcheck]
        fn partitions_the_input_exactly(specs: Vec<(i64, Option<u16>)>) -> bool {
            let posts: Vec<Post> = specs
                .iter()
                .map(|(id, hours)| {
                    let at = hours.map(|h| {
                        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                            + chrono::Duration::hours(i64::from(h))
                    });
                    Post {
                        id: PostId::from(*id),
                        title: String::new(),
                        description: String::new(),
                        published_at: at,
                        created_by: None,
                    }
                })
                .collect();
            let groups = group_by_day(&posts, &utc_settings());
            let total: usize = groups.iter().map(|g| g.posts.len()).sum();
            total == posts.len()
        }

        #[quickcheck]
        fn dated_keys_strictly_descending(days: Vec<u16>) -> bool {
            let posts: Vec<Post> = days
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    let at = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap()
                        + chrono::Duration::days(i64::from(*d));
                    make_post(i as i64, None).clone_with(at)
                })
                .collect();
            let groups = group_by_day(&posts, &utc_settings());
            groups.windows(2).all(|w| w[0].key > w[1].key)
        }
    }

    impl Post {
        fn clone_with(mut self, at: chrono::DateTime<Utc>) -> Self {
            self.published_at = Some(at);
            self
        }
    }

    mod zone_awareness {
        use super::*;

        #[test]
        fn late_utc_evening_lands_on_previous_local_day() {
            // 02:00 UTC on Jan 21 is 21:00 on Jan 20 in New York.
            let posts = [make_post(1, Some("2025-01-21T02:00:00Z"))];
            let settings = ScheduleSettings {
                zone: Tz::America__New_York,
                ..ScheduleSettings::default()
            };
            let groups = group_by_day(&posts, &settings);
            assert_eq!(groups[0].key, "2025-01-20");
        }

        #[test]
        fn same_instant_different_zones_different_keys() {
            let posts = [make_post(1, Some("2025-01-21T02:00:00Z"))];
            let utc_groups = group_by_day(&posts, &utc_settings());
            assert_eq!(utc_groups[0].key, "2025-01-21");
        }
    }

    mod active_highlight {
        use super::*;

        #[test]
        fn matches_numeric_against_string_id() {
            let post = make_post(2, None);
            assert!(is_active_post(&post, Some(&PostId::from("2"))));
            assert!(is_active_post(&post, Some(&PostId::from(2))));
        }

        #[test]
        fn no_active_id_matches_nothing() {
            let post = make_post(2, None);
            assert!(!is_active_post(&post, None));
        }

        #[test]
        fn different_id_does_not_match() {
            let post = make_post(2, None);
            assert!(!is_active_post(&post, Some(&PostId::from(3))));
        }

        #[test]
        fn group_active_iff_it_contains_the_active_post() {
            let posts = [
                make_post(1, Some("2025-01-20T08:00:00Z")),
                make_post(2, None),
            ];
            let groups = group_by_day(&posts, &utc_settings());
            assert!(is_active_group(&groups[0], Some(&PostId::from("1"))));
            assert!(!is_active_group(&groups[0], Some(&PostId::from(2))));
            assert!(is_active_group(&groups[1], Some(&PostId::from(2))));
        }
    }
}
