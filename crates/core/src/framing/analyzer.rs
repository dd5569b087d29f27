//! Weighted framing judgment: shot type, subject size, bottom space,
//! and margin balance folded into one score plus an ordered set of
//! corrections.

use serde::{Deserialize, Serialize};

use crate::feedback::action::{ActionKind, FeedbackAction};
use crate::geometry::bbox::subject_area_ratio;
use crate::geometry::margins::four_margins;
use crate::shared::config::FramingWeights;
use crate::shared::frame::FrameAnalysis;

use super::balance::{
    analyze_horizontal, analyze_vertical, compare_margins, HorizontalBalance, HorizontalDirection,
    MarginComparison, VerticalBalance, VerticalMove,
};
use super::bottom_space::{compare_bottom_space, BottomSpaceAnalysis};
use super::orientation::detect_orientation;
use super::shot_type::{classify_shot, compare_shot_types, ShotComparison};
use super::subject_ratio::{compare_subject_ratio, SubjectRatioAnalysis};

/// Margin-balance score below which margins count as a framing issue.
const MARGIN_ISSUE_SCORE: f64 = 70.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramingIssue {
    ShotTypeMismatch,
    SubjectRatio,
    BottomSpace,
    MarginImbalance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Excellent,
    Minor,
    Moderate,
    Major,
}

impl Severity {
    fn from_issue_count(count: usize) -> Self {
        match count {
            0 => Self::Excellent,
            1 => Self::Minor,
            2 => Self::Moderate,
            _ => Self::Major,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FramingFeedback {
    pub issues: Vec<FramingIssue>,
    pub severity: Severity,
    /// Out-of-frame warnings; these outrank numeric adjustments.
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub primary_action: Option<FeedbackAction>,
    pub secondary_actions: Vec<FeedbackAction>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FramingAnalysis {
    pub shot: ShotComparison,
    pub subject: SubjectRatioAnalysis,
    pub bottom: BottomSpaceAnalysis,
    pub margins: MarginComparison,
    pub horizontal: HorizontalBalance,
    pub vertical: VerticalBalance,
    pub overall_score: f64,
    pub feedback: FramingFeedback,
}

/// Runs every framing sub-analysis and folds the scores with the
/// configured weights.
pub fn analyze_framing(
    current: &FrameAnalysis,
    reference: &FrameAnalysis,
    weights: &FramingWeights,
) -> FramingAnalysis {
    let curr_orientation = detect_orientation(&current.keypoints);
    let ref_orientation = detect_orientation(&reference.keypoints);

    let curr_shot = classify_shot(&current.keypoints, current.shape, &curr_orientation);
    let ref_shot = classify_shot(&reference.keypoints, reference.shape, &ref_orientation);
    let shot = compare_shot_types(curr_shot, ref_shot);

    let subject = compare_subject_ratio(
        subject_area_ratio(&current.keypoints, current.shape),
        subject_area_ratio(&reference.keypoints, reference.shape),
    );

    let curr_margins = four_margins(&current.keypoints, current.shape);
    let ref_margins = four_margins(&reference.keypoints, reference.shape);

    let bottom = compare_bottom_space(curr_margins.bottom, ref_margins.bottom);
    let margins = compare_margins(&curr_margins, &ref_margins);
    let horizontal = analyze_horizontal(&curr_margins, &ref_margins);
    let vertical = analyze_vertical(&curr_margins, &ref_margins);

    let overall_score = shot.score * weights.shot_type
        + subject.score * weights.subject_ratio
        + bottom.score * weights.bottom_space
        + margins.overall_score * weights.margins;

    let feedback = build_feedback(&shot, &subject, &bottom, &margins, &horizontal, &vertical);

    FramingAnalysis {
        shot,
        subject,
        bottom,
        margins,
        horizontal,
        vertical,
        overall_score,
        feedback,
    }
}

fn build_feedback(
    shot: &ShotComparison,
    subject: &SubjectRatioAnalysis,
    bottom: &BottomSpaceAnalysis,
    margins: &MarginComparison,
    horizontal: &HorizontalBalance,
    vertical: &VerticalBalance,
) -> FramingFeedback {
    let mut issues = Vec::new();
    if !shot.same_category {
        issues.push(FramingIssue::ShotTypeMismatch);
    }
    if subject.needs_adjustment() {
        issues.push(FramingIssue::SubjectRatio);
    }
    if bottom.needs_adjustment() || bottom.table_heavy {
        issues.push(FramingIssue::BottomSpace);
    }
    if margins.overall_score < MARGIN_ISSUE_SCORE
        || horizontal.status.needs_adjustment()
        || vertical.status.needs_adjustment()
    {
        issues.push(FramingIssue::MarginImbalance);
    }

    let mut warnings = Vec::new();
    if let Some(w) = &horizontal.out_of_frame_warning {
        warnings.push(w.clone());
    }
    if let Some(w) = &vertical.out_of_frame_warning {
        warnings.push(w.clone());
    }

    // Worst-scoring adjustable sub-issue becomes the primary action.
    let mut candidates: Vec<(f64, FeedbackAction)> = Vec::new();
    if horizontal.status.needs_adjustment() {
        if let Some(adj) = &horizontal.adjustment {
            let arrow = match adj.direction {
                HorizontalDirection::Left => "\u{2190}",
                HorizontalDirection::Right => "\u{2192}",
            };
            candidates.push((
                horizontal.score,
                FeedbackAction::new(1, ActionKind::HorizontalMove, adj.camera_action.clone())
                    .with_direction(arrow)
                    .with_amount(format!("{:.0}%", adj.percent))
                    .with_impact(adj.subject_action.clone()),
            ));
        }
    }
    if vertical.status.needs_adjustment() {
        if let Some(adj) = &vertical.adjustment {
            let arrow = match adj.kind {
                VerticalMove::TiltUp => "\u{2191}",
                VerticalMove::TiltDown | VerticalMove::LowerCamera => "\u{2193}",
            };
            candidates.push((
                vertical.score,
                FeedbackAction::new(1, ActionKind::VerticalTilt, adj.camera_action.clone())
                    .with_direction(arrow)
                    .with_amount(format!("{}\u{b0}", adj.angle))
                    .with_impact(adj.subject_action.clone()),
            ));
        }
    }
    if bottom.needs_adjustment() {
        if let Some(msg) = &bottom.special_message {
            candidates.push((
                bottom.score,
                FeedbackAction::new(1, ActionKind::BottomSpace, msg.clone()),
            ));
        }
    }

    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut ranked = candidates.into_iter().map(|(_, action)| action);
    let primary_action = ranked.next();
    let secondary_actions: Vec<FeedbackAction> = ranked
        .take(2)
        .enumerate()
        .map(|(i, mut action)| {
            action.priority = 2 + i as u8;
            action
        })
        .collect();

    let message = compose_message(&warnings, &primary_action, &secondary_actions);

    FramingFeedback {
        severity: Severity::from_issue_count(issues.len()),
        issues,
        warnings,
        primary_action,
        secondary_actions,
        message,
    }
}

/// Warnings first, then the main correction, then at most one
/// "additionally" follow-up.
fn compose_message(
    warnings: &[String],
    primary: &Option<FeedbackAction>,
    secondary: &[FeedbackAction],
) -> String {
    let mut parts: Vec<String> = warnings.to_vec();

    if let Some(action) = primary {
        parts.push(action.action_text.clone());
        if let Some(next) = secondary.first() {
            parts.push(format!("additionally, {}", next.action_text));
        }
    }

    if parts.is_empty() {
        "framing closely matches the reference".to_string()
    } else {
        parts.join("; ")
    }
}
