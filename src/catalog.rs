//! Client-side derivation of the catalog view: merge the user's favorites into
//! the college list, then filter and sort it for display.
use crate::models::college::{College, Course, Location};
use std::collections::HashSet;
use std::str::FromStr;

pub const DEFAULT_FEE_MAX: u32 = 300_000;

/// A dropdown selection where "all" disables the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr> Choice<T> {
    /// Parses a `<select>` value. "all" and anything unrecognised disable the filter.
    pub fn from_select_value(value: &str) -> Self {
        match value {
            "all" => Choice::All,
            other => other.parse().map(Choice::Only).unwrap_or(Choice::All),
        }
    }
}

/// Inclusive fee interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeRange {
    pub min: u32,
    pub max: u32,
}

impl FeeRange {
    pub fn contains(&self, fee: u32) -> bool {
        fee >= self.min && fee <= self.max
    }
}

impl Default for FeeRange {
    fn default() -> Self {
        FeeRange {
            min: 0,
            max: DEFAULT_FEE_MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    None,
    FeeLowToHigh,
    FeeHighToLow,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::None => "none",
            SortMode::FeeLowToHigh => "fee-low",
            SortMode::FeeHighToLow => "fee-high",
        }
    }

    pub fn from_select_value(value: &str) -> Self {
        match value {
            "fee-low" => SortMode::FeeLowToHigh,
            "fee-high" => SortMode::FeeHighToLow,
            _ => SortMode::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    pub search: String,
    pub location: Choice<Location>,
    pub course: Choice<Course>,
    pub fee_range: FeeRange,
    pub sort: SortMode,
}

impl CatalogFilter {
    /// True when the college passes every active predicate.
    pub fn matches(&self, college: &College) -> bool {
        self.matches_search(&college.name)
            && self.location.admits(&college.location)
            && self.course.admits(&college.course)
            && self.fee_range.contains(college.fee)
    }

    fn matches_search(&self, name: &str) -> bool {
        self.search.is_empty() || name.to_lowercase().contains(&self.search.to_lowercase())
    }
}

/// Sets `is_favorite` on every college from the active user's favorite ids.
/// Pass an empty set for anonymous visitors.
pub fn merge_favorites(colleges: Vec<College>, favorite_ids: &HashSet<String>) -> Vec<College> {
    colleges
        .into_iter()
        .map(|mut college| {
            college.is_favorite = favorite_ids.contains(&college.id);
            college
        })
        .collect()
}

/// Filters then sorts. Sorting is stable, so equal fees keep their order.
pub fn apply_filters(colleges: &[College], filter: &CatalogFilter) -> Vec<College> {
    let mut visible: Vec<College> = colleges
        .iter()
        .filter(|college| filter.matches(college))
        .cloned()
        .collect();

    match filter.sort {
        SortMode::None => {}
        SortMode::FeeLowToHigh => visible.sort_by_key(|c| c.fee),
        SortMode::FeeHighToLow => visible.sort_by(|a, b| b.fee.cmp(&a.fee)),
    }
    visible
}

/// The write a favorite toggle performs, decided by the flag the user saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Add,
    Remove,
}

impl ToggleAction {
    pub fn for_flag(is_favorite: bool) -> Self {
        if is_favorite {
            ToggleAction::Remove
        } else {
            ToggleAction::Add
        }
    }

    pub fn notice_title(&self) -> &'static str {
        match self {
            ToggleAction::Add => "Added to favorites",
            ToggleAction::Remove => "Removed from favorites",
        }
    }
}

/// Colleges with a favorite toggle still waiting on its write and refetch.
/// A second toggle for the same college is refused until the first settles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingToggles(HashSet<String>);

impl PendingToggles {
    /// Returns false if a toggle for this college is already running.
    pub fn try_begin(&mut self, college_id: &str) -> bool {
        self.0.insert(college_id.to_string())
    }

    pub fn finish(&mut self, college_id: &str) {
        self.0.remove(college_id);
    }

    pub fn is_pending(&self, college_id: &str) -> bool {
        self.0.contains(college_id)
    }
}

/// Catalog reloads can finish out of order. Each reload takes a ticket when
/// it is sent; a result is applied only if nothing newer was applied first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshOrder {
    issued: u64,
    applied: u64,
}

impl RefreshOrder {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Returns false for a result older than the one on screen.
    pub fn accept(&mut self, ticket: u64) -> bool {
        if ticket > self.applied {
            self.applied = ticket;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn college(id: &str, name: &str, location: Location, course: Course, fee: u32) -> College {
        College {
            id: id.to_string(),
            name: name.to_string(),
            location,
            course,
            fee,
            is_favorite: false,
        }
    }

    fn sample() -> Vec<College> {
        vec![
            college("1", "IIT Hyderabad", Location::Hyderabad, Course::ComputerScience, 220_000),
            college("2", "Christ University", Location::Bangalore, Course::Mba, 150_000),
            college("3", "Anna University", Location::Chennai, Course::Electronics, 60_000),
            college("4", "IIIT Hyderabad", Location::Hyderabad, Course::ComputerScience, 150_000),
            college("5", "Madras Medical College", Location::Chennai, Course::Mbbs, 40_000),
        ]
    }

    fn ids(colleges: &[College]) -> Vec<&str> {
        colleges.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn default_filter_keeps_everything_in_order() {
        let all = sample();
        let visible = apply_filters(&all, &CatalogFilter::default());
        assert_eq!(visible, all);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filter = CatalogFilter {
            search: "hYdErAbAd".into(),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec!["1", "4"]);

        let filter = CatalogFilter {
            search: "univ".into(),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec!["2", "3"]);
    }

    #[test]
    fn location_and_course_combine() {
        let filter = CatalogFilter {
            location: Choice::Only(Location::Hyderabad),
            course: Choice::Only(Course::ComputerScience),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec!["1", "4"]);

        let filter = CatalogFilter {
            location: Choice::Only(Location::Chennai),
            course: Choice::Only(Course::ComputerScience),
            ..Default::default()
        };
        assert!(apply_filters(&sample(), &filter).is_empty());
    }

    #[test]
    fn fee_range_is_inclusive() {
        let filter = CatalogFilter {
            fee_range: FeeRange {
                min: 60_000,
                max: 150_000,
            },
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec!["2", "3", "4"]);
    }

    #[test]
    fn filtered_result_is_exactly_the_matching_subset() {
        let all = sample();
        let searches = ["", "iit", "college", "zzz"];
        let locations = [Choice::All, Choice::Only(Location::Hyderabad), Choice::Only(Location::Chennai)];
        let courses = [Choice::All, Choice::Only(Course::ComputerScience), Choice::Only(Course::Mbbs)];
        let ranges = [FeeRange::default(), FeeRange { min: 50_000, max: 160_000 }];

        for search in searches {
            for location in locations {
                for course in courses {
                    for fee_range in ranges {
                        let filter = CatalogFilter {
                            search: search.to_string(),
                            location,
                            course,
                            fee_range,
                            sort: SortMode::None,
                        };
                        let visible = apply_filters(&all, &filter);
                        let expected: Vec<College> =
                            all.iter().filter(|c| filter.matches(c)).cloned().collect();
                        assert_eq!(visible, expected, "filter {filter:?}");
                        for c in &visible {
                            assert!(all.contains(c));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn fee_sorts_are_monotone_and_stable() {
        let all = sample();
        let low = apply_filters(
            &all,
            &CatalogFilter {
                sort: SortMode::FeeLowToHigh,
                ..Default::default()
            },
        );
        assert!(low.windows(2).all(|w| w[0].fee <= w[1].fee));
        // 2 and 4 share a fee and keep their original order
        assert_eq!(ids(&low), vec!["5", "3", "2", "4", "1"]);

        let high = apply_filters(
            &all,
            &CatalogFilter {
                sort: SortMode::FeeHighToLow,
                ..Default::default()
            },
        );
        assert!(high.windows(2).all(|w| w[0].fee >= w[1].fee));
        assert_eq!(ids(&high), vec!["1", "2", "4", "3", "5"]);

        // no sort on an already sorted list changes nothing
        let again = apply_filters(&low, &CatalogFilter::default());
        assert_eq!(again, low);
    }

    #[test]
    fn fee_range_scenario() {
        let all = vec![
            college("a", "Cheap College", Location::Chennai, Course::Mba, 40_000),
            college("b", "Mid College", Location::Chennai, Course::Mba, 75_000),
        ];
        let filter = CatalogFilter {
            fee_range: FeeRange {
                min: 50_000,
                max: 100_000,
            },
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&all, &filter)), vec!["b"]);
    }

    #[test]
    fn merge_flags_match_the_favorite_set() {
        let favorites: HashSet<String> = ["2".to_string(), "5".to_string(), "missing".to_string()]
            .into_iter()
            .collect();
        let merged = merge_favorites(sample(), &favorites);
        for c in &merged {
            assert_eq!(c.is_favorite, favorites.contains(&c.id));
        }

        let mut stale = merged.clone();
        stale[0].is_favorite = true;
        let anonymous = merge_favorites(stale, &HashSet::new());
        assert!(anonymous.iter().all(|c| !c.is_favorite));
    }

    #[test]
    fn select_values_parse() {
        assert_eq!(Choice::<Location>::from_select_value("all"), Choice::All);
        assert_eq!(
            Choice::<Location>::from_select_value("Chennai"),
            Choice::Only(Location::Chennai)
        );
        assert_eq!(
            Choice::<Course>::from_select_value("Computer Science"),
            Choice::Only(Course::ComputerScience)
        );
        assert_eq!(Choice::<Course>::from_select_value("Law"), Choice::All);
        assert_eq!(SortMode::from_select_value("fee-high"), SortMode::FeeHighToLow);
        assert_eq!(SortMode::from_select_value("whatever"), SortMode::None);
    }

    #[test]
    fn pending_toggles_serialize_per_college() {
        let mut pending = PendingToggles::default();
        assert!(pending.try_begin("1"));
        assert!(!pending.try_begin("1"));
        assert!(pending.try_begin("2"));
        assert!(pending.is_pending("1"));
        pending.finish("1");
        assert!(!pending.is_pending("1"));
        assert!(pending.try_begin("1"));
    }

    #[test]
    fn older_reload_never_overwrites_a_newer_one() {
        let mut order = RefreshOrder::default();
        let first = order.issue();
        let second = order.issue();
        assert!(order.accept(second));
        assert!(!order.accept(first));

        let third = order.issue();
        assert!(order.accept(third));
        assert!(!order.accept(third));
    }
}
