//! Priority/urgency weighting and badge styling
//!
//! Weights are monotonic with severity (3/2/1). Note the asymmetric
//! fallbacks: an unrecognized priority parses to `Low` (weight 1) while
//! an unrecognized urgency parses to `Normal` (weight 2). That matches
//! the observed upstream behavior and is preserved on purpose.

use std::cmp::Ordering;

use crate::task::{Priority, Task, Urgency};

/// Display configuration for a priority or urgency badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeStyle {
    pub label: &'static str,
    /// Color token consumed by the presentation layer
    pub color: &'static str,
}

impl Priority {
    /// Numeric severity weight: High 3, Medium 2, Low 1
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// Badge styling; unknown input already parsed to `Low`, so the
    /// low-priority style doubles as the fallback
    pub fn badge(self) -> BadgeStyle {
        match self {
            Priority::High => BadgeStyle {
                label: "High Priority",
                color: "red",
            },
            Priority::Medium => BadgeStyle {
                label: "Medium Priority",
                color: "yellow",
            },
            Priority::Low => BadgeStyle {
                label: "Low Priority",
                color: "blue",
            },
        }
    }
}

impl Urgency {
    /// Numeric severity weight: Urgent 3, Normal 2, Low 1
    pub fn weight(self) -> u8 {
        match self {
            Urgency::Urgent => 3,
            Urgency::Normal => 2,
            Urgency::Low => 1,
        }
    }

    /// Badge styling; unknown input already parsed to `Normal`
    pub fn badge(self) -> BadgeStyle {
        match self {
            Urgency::Urgent => BadgeStyle {
                label: "Urgent",
                color: "red",
            },
            Urgency::Normal => BadgeStyle {
                label: "Normal",
                color: "blue",
            },
            Urgency::Low => BadgeStyle {
                label: "Low",
                color: "gray",
            },
        }
    }
}

/// Compare two tasks by priority weight descending, urgency weight
/// descending as the tie-break
///
/// Returns `Equal` for exact ties so that a stable sort preserves the
/// original relative order.
pub fn compare_by_priority(a: &Task, b: &Task) -> Ordering {
    b.priority
        .weight()
        .cmp(&a.priority.weight())
        .then_with(|| b.urgency.weight().cmp(&a.urgency.weight()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_monotonic_with_severity() {
        assert_eq!(Priority::High.weight(), 3);
        assert_eq!(Priority::Medium.weight(), 2);
        assert_eq!(Priority::Low.weight(), 1);

        assert_eq!(Urgency::Urgent.weight(), 3);
        assert_eq!(Urgency::Normal.weight(), 2);
        assert_eq!(Urgency::Low.weight(), 1);
    }

    #[test]
    fn test_fallback_asymmetry() {
        // Unknown priority weighs 1, unknown urgency weighs 2. Intentional.
        assert_eq!(Priority::parse("???").weight(), 1);
        assert_eq!(Urgency::parse("???").weight(), 2);
    }

    #[test]
    fn test_badge_lookup() {
        assert_eq!(Priority::High.badge().color, "red");
        assert_eq!(Priority::parse("unknown").badge().color, "blue");
        assert_eq!(Urgency::parse("unknown").badge().label, "Normal");
    }

    #[test]
    fn test_compare_primary_key_is_priority() {
        let a = Task::new(1, "A").with_priority(Priority::Low);
        let b = Task::new(2, "B")
            .with_priority(Priority::High)
            .with_urgency(Urgency::Low);

        assert_eq!(compare_by_priority(&b, &a), Ordering::Less);
        assert_eq!(compare_by_priority(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_compare_urgency_breaks_ties() {
        let a = Task::new(1, "A")
            .with_priority(Priority::Medium)
            .with_urgency(Urgency::Low);
        let b = Task::new(2, "B")
            .with_priority(Priority::Medium)
            .with_urgency(Urgency::Urgent);

        assert_eq!(compare_by_priority(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_compare_exact_tie_is_equal() {
        let a = Task::new(1, "A");
        let b = Task::new(2, "B");

        assert_eq!(compare_by_priority(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_stable_sort_preserves_input_order_on_ties() {
        let tasks = vec![
            Task::new(10, "first"),
            Task::new(20, "second"),
            Task::new(30, "third"),
        ];
        let mut sorted: Vec<&Task> = tasks.iter().collect();
        sorted.sort_by(|a, b| compare_by_priority(a, b));

        let ids: Vec<u32> = sorted.iter().map(|t| t.id.into()).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }
}
