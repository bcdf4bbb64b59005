//! Personalised routine derivation.
//!
//! The deriver is a pure function: detected issues, skin type, and premium
//! status in; three ordered step lists out. Rules live in a declarative
//! table ([`RULES`]) and are applied by a single interpreter so each rule
//! can be audited and tested in isolation.
//!
//! Insertion mechanics are deliberate and load-bearing: every insert lands
//! at the *literal* slot index of the already-mutated list, so when several
//! rules fire, a later rule's step ends up in front of earlier ones at the
//! same slot. Downstream consumers render steps in order, so this decides
//! the application order a user sees.

use serde::{Deserialize, Serialize};

use super::{IssueTag, SkinType};

/// Morning slot where treatment serums are inserted (after toner).
const MORNING_SERUM_SLOT: usize = 2;
/// Evening slot where treatments are inserted (after toner).
const EVENING_TREATMENT_SLOT: usize = 3;

const MORNING_BASE: [&str; 4] = ["cleanser", "toner", "moisturizer", "sunscreen"];
const EVENING_BASE: [&str; 4] = ["oil cleanser", "water cleanser", "toner", "moisturizer"];
const WEEKLY_BASE: [&str; 2] = ["exfoliation", "hydrating mask"];

/// A derived routine: three ordered lists of free-text steps.
///
/// ## Invariants
/// - All three lists are non-empty (the base templates guarantee at least
///   4 morning, 4 evening, and 2 weekly steps).
/// - Step order is significant; it encodes application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct RoutinePlan {
    /// Morning steps, in application order.
    pub morning: Vec<String>,
    /// Evening steps, in application order.
    pub evening: Vec<String>,
    /// Weekly treatments.
    pub weekly: Vec<String>,
}

impl RoutinePlan {
    fn from_bases() -> Self {
        Self {
            morning: MORNING_BASE.iter().map(|s| (*s).to_owned()).collect(),
            evening: EVENING_BASE.iter().map(|s| (*s).to_owned()).collect(),
            weekly: WEEKLY_BASE.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

/// The fixed plan returned when no analysis context exists.
///
/// Returning a usable default instead of failing is deliberate: a brand-new
/// user opening the routines panel before their first scan still gets
/// something to follow.
pub fn default_plan() -> RoutinePlan {
    RoutinePlan::from_bases()
}

/// Condition deciding whether a rule fires.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    /// Fires when the tag was detected.
    Issue(IssueTag),
    /// Fires when any of the tags was detected.
    AnyIssue(&'static [IssueTag]),
    /// Fires for the listed skin types.
    SkinTypeIn(&'static [SkinType]),
}

impl Trigger {
    fn fires(&self, issues: &[IssueTag], skin_type: SkinType) -> bool {
        match self {
            Self::Issue(tag) => issues.contains(tag),
            Self::AnyIssue(tags) => tags.iter().any(|tag| issues.contains(tag)),
            Self::SkinTypeIn(types) => types.contains(&skin_type),
        }
    }
}

/// One mutation a fired rule performs on the plan.
#[derive(Debug, Clone, Copy)]
enum Action {
    /// Insert at the morning serum slot.
    InsertMorning(&'static str),
    /// Insert at the evening treatment slot.
    InsertEvening(&'static str),
    /// Append to the end of the evening list.
    AppendEvening(&'static str),
    /// Append to the end of the weekly list.
    AppendWeekly(&'static str),
    /// Drop every weekly step whose text contains the pattern.
    RemoveWeeklyContaining(&'static str),
}

/// One derivation rule: a trigger plus the mutations it performs.
struct RoutineRule {
    premium_only: bool,
    trigger: Trigger,
    actions: &'static [Action],
}

/// The derivation table, in evaluation order.
///
/// Issue rules come first (acne, dryness, hyperpigmentation, texture),
/// then the premium layer (skin-type oil control, aging, sensitivity).
/// Reordering entries changes the emitted step order; see the module docs.
const RULES: [RoutineRule; 7] = [
    RoutineRule {
        premium_only: false,
        trigger: Trigger::Issue(IssueTag::Acne),
        actions: &[
            Action::InsertMorning("niacinamide serum"),
            Action::InsertEvening("BHA treatment (2-3x weekly)"),
            Action::AppendWeekly("clay mask for T-zone"),
        ],
    },
    RoutineRule {
        premium_only: false,
        trigger: Trigger::Issue(IssueTag::Dryness),
        actions: &[
            Action::InsertMorning("hyaluronic acid serum"),
            Action::InsertEvening("rich hydrating serum"),
            Action::AppendEvening("occlusive"),
            Action::AppendWeekly("overnight hydrating mask"),
        ],
    },
    RoutineRule {
        premium_only: false,
        trigger: Trigger::Issue(IssueTag::Hyperpigmentation),
        actions: &[
            Action::InsertMorning("vitamin C serum"),
            Action::InsertEvening("alpha arbutin or tranexamic acid"),
            Action::AppendWeekly("brightening mask"),
        ],
    },
    RoutineRule {
        premium_only: false,
        trigger: Trigger::Issue(IssueTag::UnevenTexture),
        actions: &[
            Action::InsertEvening("AHA treatment (2-3x weekly)"),
            Action::AppendWeekly("chemical exfoliation treatment"),
        ],
    },
    RoutineRule {
        premium_only: true,
        trigger: Trigger::SkinTypeIn(&[SkinType::Oily, SkinType::Combination]),
        actions: &[
            Action::InsertMorning("oil-control toner with witch hazel"),
            Action::InsertEvening("azelaic acid treatment"),
        ],
    },
    RoutineRule {
        premium_only: true,
        trigger: Trigger::AnyIssue(&[IssueTag::Wrinkles, IssueTag::Aging]),
        actions: &[
            Action::InsertMorning("peptide complex"),
            Action::InsertEvening("retinol serum (start 2x weekly)"),
            Action::AppendWeekly("firming mask"),
        ],
    },
    RoutineRule {
        premium_only: true,
        trigger: Trigger::Issue(IssueTag::Sensitivity),
        actions: &[
            Action::InsertMorning("centella asiatica serum"),
            Action::InsertEvening("barrier repair concentrate"),
            Action::RemoveWeeklyContaining("exfoliation"),
            Action::AppendWeekly("cica mask"),
        ],
    },
];

fn apply(plan: &mut RoutinePlan, action: Action) {
    match action {
        Action::InsertMorning(step) => plan.morning.insert(MORNING_SERUM_SLOT, step.to_owned()),
        Action::InsertEvening(step) => plan.evening.insert(EVENING_TREATMENT_SLOT, step.to_owned()),
        Action::AppendEvening(step) => plan.evening.push(step.to_owned()),
        Action::AppendWeekly(step) => plan.weekly.push(step.to_owned()),
        Action::RemoveWeeklyContaining(pattern) => {
            plan.weekly.retain(|step| !step.contains(pattern));
        }
    }
}

/// Derive a routine plan from analysis context.
///
/// Pure over its inputs: identical arguments always produce identical
/// plans. Issue tags outside the rule table contribute nothing. Callers
/// with no analysis context should use [`default_plan`] instead.
///
/// # Examples
///
/// ```
/// use backend::domain::{derive_plan, IssueTag, SkinType};
///
/// let plan = derive_plan(&[IssueTag::Acne], SkinType::Combination, false);
/// assert!(plan.morning.contains(&"niacinamide serum".to_owned()));
/// ```
pub fn derive_plan(issues: &[IssueTag], skin_type: SkinType, is_premium: bool) -> RoutinePlan {
    let mut plan = RoutinePlan::from_bases();

    for rule in &RULES {
        if rule.premium_only && !is_premium {
            continue;
        }
        if !rule.trigger.fires(issues, skin_type) {
            continue;
        }
        for action in rule.actions {
            apply(&mut plan, *action);
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn owned(steps: &[&str]) -> Vec<String> {
        steps.iter().map(|s| (*s).to_owned()).collect()
    }

    #[rstest]
    fn no_issues_without_premium_yields_the_base_templates() {
        let plan = derive_plan(&[], SkinType::Normal, false);

        assert_eq!(plan, default_plan());
        assert_eq!(plan.morning.len(), 4);
        assert_eq!(plan.evening.len(), 4);
        assert_eq!(plan.weekly.len(), 2);
    }

    #[rstest]
    fn derivation_is_pure() {
        let issues = [IssueTag::Acne, IssueTag::Sensitivity, IssueTag::Aging];
        let first = derive_plan(&issues, SkinType::Oily, true);
        let second = derive_plan(&issues, SkinType::Oily, true);
        assert_eq!(first, second);
    }

    #[rstest]
    fn acne_and_dryness_insert_at_the_original_slot() {
        let plan = derive_plan(
            &[IssueTag::Acne, IssueTag::Dryness],
            SkinType::Combination,
            false,
        );

        // Dryness fires after acne and inserts at the same slot, so its
        // serum lands in front of the niacinamide.
        assert_eq!(
            plan.morning,
            owned(&[
                "cleanser",
                "toner",
                "hyaluronic acid serum",
                "niacinamide serum",
                "moisturizer",
                "sunscreen",
            ])
        );
        assert_eq!(
            plan.evening,
            owned(&[
                "oil cleanser",
                "water cleanser",
                "toner",
                "rich hydrating serum",
                "BHA treatment (2-3x weekly)",
                "moisturizer",
                "occlusive",
            ])
        );
        assert_eq!(
            plan.weekly,
            owned(&[
                "exfoliation",
                "hydrating mask",
                "clay mask for T-zone",
                "overnight hydrating mask",
            ])
        );
    }

    #[rstest]
    fn all_four_issue_rules_stack_in_evaluation_order() {
        let plan = derive_plan(
            &[
                IssueTag::Acne,
                IssueTag::Dryness,
                IssueTag::Hyperpigmentation,
                IssueTag::UnevenTexture,
            ],
            SkinType::Normal,
            false,
        );

        assert_eq!(
            plan.morning,
            owned(&[
                "cleanser",
                "toner",
                "vitamin C serum",
                "hyaluronic acid serum",
                "niacinamide serum",
                "moisturizer",
                "sunscreen",
            ])
        );
        assert_eq!(
            plan.evening,
            owned(&[
                "oil cleanser",
                "water cleanser",
                "toner",
                "AHA treatment (2-3x weekly)",
                "alpha arbutin or tranexamic acid",
                "rich hydrating serum",
                "BHA treatment (2-3x weekly)",
                "moisturizer",
                "occlusive",
            ])
        );
        assert_eq!(
            plan.weekly,
            owned(&[
                "exfoliation",
                "hydrating mask",
                "clay mask for T-zone",
                "overnight hydrating mask",
                "brightening mask",
                "chemical exfoliation treatment",
            ])
        );
    }

    #[rstest]
    fn premium_rules_are_inert_without_the_flag() {
        let plan = derive_plan(
            &[IssueTag::Sensitivity, IssueTag::Wrinkles],
            SkinType::Oily,
            false,
        );

        assert_eq!(plan, default_plan());
    }

    #[rstest]
    #[case::oily(SkinType::Oily)]
    #[case::combination(SkinType::Combination)]
    fn premium_oil_control_fires_for_oily_and_combination(#[case] skin_type: SkinType) {
        let plan = derive_plan(&[], skin_type, true);

        assert_eq!(
            plan.morning,
            owned(&[
                "cleanser",
                "toner",
                "oil-control toner with witch hazel",
                "moisturizer",
                "sunscreen",
            ])
        );
        assert_eq!(
            plan.evening,
            owned(&[
                "oil cleanser",
                "water cleanser",
                "toner",
                "azelaic acid treatment",
                "moisturizer",
            ])
        );
    }

    #[rstest]
    #[case::dry(SkinType::Dry)]
    #[case::normal(SkinType::Normal)]
    #[case::sensitive(SkinType::Sensitive)]
    fn premium_oil_control_skips_other_skin_types(#[case] skin_type: SkinType) {
        let plan = derive_plan(&[], skin_type, true);
        assert_eq!(plan, default_plan());
    }

    #[rstest]
    #[case::wrinkles(IssueTag::Wrinkles)]
    #[case::aging(IssueTag::Aging)]
    fn premium_aging_rule_fires_for_either_tag(#[case] tag: IssueTag) {
        let plan = derive_plan(&[tag], SkinType::Normal, true);

        assert!(plan.morning.contains(&"peptide complex".to_owned()));
        assert!(
            plan.evening
                .contains(&"retinol serum (start 2x weekly)".to_owned())
        );
        assert_eq!(plan.weekly.last(), Some(&"firming mask".to_owned()));
    }

    #[rstest]
    fn premium_sensitivity_strips_every_exfoliation_step() {
        // Acne and texture both fire first, so the weekly list holds the
        // base exfoliation plus the chemical exfoliation treatment before
        // the sensitivity rule runs.
        let plan = derive_plan(
            &[IssueTag::Acne, IssueTag::UnevenTexture, IssueTag::Sensitivity],
            SkinType::Normal,
            true,
        );

        assert!(plan.weekly.iter().all(|step| !step.contains("exfoliation")));
        assert_eq!(plan.weekly.last(), Some(&"cica mask".to_owned()));
        assert_eq!(
            plan.weekly,
            owned(&["hydrating mask", "clay mask for T-zone", "cica mask"])
        );
    }

    #[rstest]
    fn weekly_never_drops_below_two_steps() {
        // Worst case for the weekly list: nothing appended before the
        // sensitivity filter removes the base exfoliation step.
        let plan = derive_plan(&[IssueTag::Sensitivity], SkinType::Normal, true);

        assert_eq!(plan.weekly, owned(&["hydrating mask", "cica mask"]));
    }

    #[rstest]
    #[case::nothing(&[], SkinType::Normal, false)]
    #[case::everything(
        &[
            IssueTag::Acne,
            IssueTag::Dryness,
            IssueTag::Hyperpigmentation,
            IssueTag::UnevenTexture,
            IssueTag::Wrinkles,
            IssueTag::Sensitivity,
        ],
        SkinType::Combination,
        true
    )]
    #[case::unmapped_tags(&[IssueTag::DarkCircles, IssueTag::Dullness], SkinType::Dry, true)]
    fn lists_never_shrink_below_the_base_sizes(
        #[case] issues: &[IssueTag],
        #[case] skin_type: SkinType,
        #[case] is_premium: bool,
    ) {
        let plan = derive_plan(issues, skin_type, is_premium);

        assert!(plan.morning.len() >= 4);
        assert!(plan.evening.len() >= 4);
        assert!(plan.weekly.len() >= 2);
    }

    #[rstest]
    fn unmapped_tags_are_silently_ignored() {
        let plan = derive_plan(
            &[IssueTag::DarkCircles, IssueTag::LargePores, IssueTag::Redness],
            SkinType::Normal,
            false,
        );

        assert_eq!(plan, default_plan());
    }
}
