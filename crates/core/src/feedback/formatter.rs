//! Turns a gate report into prioritized actions and summary text.

use crate::gates::report::{GateName, GateReport};

use super::action::{ActionKind, FeedbackAction};

/// Builds the ordered action list from a gate report: failing gates
/// contribute in evaluation order (most fundamental first), framing
/// contributes its own worst-first bundle, and pose notes trail as
/// optional suggestions.
pub fn collect_actions(report: &GateReport) -> Vec<FeedbackAction> {
    let mut actions = Vec::new();

    if let Some(gate) = &report.aspect_ratio {
        if !gate.passed {
            if let Some(fb) = &gate.feedback {
                actions.push(
                    FeedbackAction::new(1, ActionKind::AspectRatio, fb.action.clone())
                        .with_current(fb.current_name.clone())
                        .with_target(fb.target_name.clone()),
                );
            }
        }
    }

    if let Some(gate) = &report.framing {
        if !gate.passed {
            if let Some(analysis) = &gate.feedback {
                if !analysis.shot.same_category {
                    if let Some(adjustment) = &analysis.shot.adjustment {
                        actions.push(
                            FeedbackAction::new(1, ActionKind::ShotType, adjustment.clone())
                                .with_current(analysis.shot.current.label())
                                .with_target(analysis.shot.reference.label()),
                        );
                    }
                }
                if let Some(action) = &analysis.subject.action {
                    actions.push(
                        FeedbackAction::new(1, ActionKind::SubjectSize, action.clone())
                            .with_current(format!(
                                "{:.0}% of frame",
                                analysis.subject.current_ratio * 100.0
                            ))
                            .with_target(format!(
                                "{:.0}% of frame",
                                analysis.subject.reference_ratio * 100.0
                            )),
                    );
                }
                if let Some(primary) = &analysis.feedback.primary_action {
                    actions.push(primary.clone());
                }
                actions.extend(analysis.feedback.secondary_actions.iter().cloned());
            }
        }
    }

    if let Some(gate) = &report.composition {
        if !gate.passed {
            if let Some(fb) = &gate.feedback {
                let text = if fb.actions.is_empty() {
                    "re-center the subject on the reference grid cell".to_string()
                } else {
                    fb.actions.join("; ")
                };
                actions.push(
                    FeedbackAction::new(1, ActionKind::Composition, text)
                        .with_current(format!("cell {},{}", fb.current_grid.0, fb.current_grid.1))
                        .with_target(format!("cell {},{}", fb.target_grid.0, fb.target_grid.1)),
                );
            }
        }
    }

    if let Some(gate) = &report.compression {
        if !gate.passed {
            if let Some(fb) = &gate.feedback {
                let mut action = FeedbackAction::new(
                    1,
                    ActionKind::Compression,
                    fb.actions.first().cloned().unwrap_or_default(),
                )
                .with_current(format!("{} ({:.2})", fb.current_character, fb.current))
                .with_target(format!("{} ({:.2})", fb.target_character, fb.target));
                if let Some(estimate) = fb.actions.get(1) {
                    action = action.with_amount(estimate.clone());
                }
                actions.push(action);
            }
        }
    }

    if let Some(notes) = &report.pose {
        for note in notes {
            actions.push(FeedbackAction::new(
                1,
                ActionKind::Pose,
                note.suggestion.clone(),
            ));
        }
    }

    for (index, action) in actions.iter_mut().enumerate() {
        action.priority = index as u8 + 1;
    }
    actions
}

/// Per-gate status lines, one per evaluated gate.
pub fn gate_summary(report: &GateReport) -> String {
    let mut lines: Vec<String> = report
        .scored()
        .into_iter()
        .map(|(name, score, passed)| {
            let marker = if passed { "[OK]" } else { "[!]" };
            format!("{marker} {}: {score:.0}", name.label())
        })
        .collect();

    if let Some(notes) = &report.pose {
        if !notes.is_empty() {
            lines.push(format!("[i] pose: {} note(s)", notes.len()));
        }
    }

    lines.join("\n")
}

/// One-paragraph verdict banded by the overall score, leading with the
/// most fundamental pending action when one exists.
pub fn friendly_summary(
    overall_score: f64,
    report: &GateReport,
    actions: &[FeedbackAction],
) -> String {
    let failed = report.failed_gates();
    let lead_action = actions
        .iter()
        .find(|a| a.kind != ActionKind::Pose)
        .map(|a| a.action_text.clone());

    if overall_score >= 95.0 {
        return "nearly identical to the reference; great match".to_string();
    }

    if overall_score >= 85.0 {
        return match (failed.len(), lead_action) {
            (1, Some(action)) => {
                format!("very close to the reference; {action} and it should line up")
            }
            (1, None) => "very close to the reference; one area needs a small tweak".to_string(),
            _ => "very close to the reference; a few minor tweaks remain".to_string(),
        };
    }

    if overall_score >= 75.0 {
        return match lead_action {
            Some(action) => format!("generally good, but {action}"),
            None => describe_split(report)
                .unwrap_or_else(|| "generally good with a few areas to improve".to_string()),
        };
    }

    if overall_score >= 65.0 {
        return match lead_action {
            Some(action) => format!("noticeably different from the reference; {action} first"),
            None => "noticeably different from the reference; adjustments needed".to_string(),
        };
    }

    match lead_action {
        Some(action) => format!("substantially different from the reference; start with: {action}"),
        None => "substantially different from the reference; work through the adjustments one at \
                 a time"
            .to_string(),
    }
}

/// "X and Y look right, but Z needs adjustment" when at least two gates
/// passed.
fn describe_split(report: &GateReport) -> Option<String> {
    let passed = report.passed_gates();
    let failed = report.failed_gates();
    if passed.len() < 2 || failed.is_empty() {
        return None;
    }
    Some(format!(
        "{} look right, but {} needs adjustment",
        join_labels(&passed),
        join_labels(&failed)
    ))
}

fn join_labels(gates: &[GateName]) -> String {
    gates
        .iter()
        .map(|g| g.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::aspect_ratio::AspectRatioFeedback;
    use crate::gates::pose::{NoteImportance, PoseCategory, PoseNote};
    use crate::gates::report::ScoredGate;

    fn failing_aspect_report() -> GateReport {
        GateReport {
            aspect_ratio: Some(ScoredGate {
                score: 55.0,
                passed: false,
                feedback: Some(AspectRatioFeedback {
                    current_ratio: 1.78,
                    target_ratio: 1.33,
                    current_name: "16:9 (wide)".to_string(),
                    target_name: "4:3 (standard)".to_string(),
                    action: "switch the aspect ratio from 16:9 (wide) to 4:3 (standard)"
                        .to_string(),
                }),
            }),
            ..GateReport::default()
        }
    }

    #[test]
    fn test_failing_aspect_gate_produces_action() {
        let actions = collect_actions(&failing_aspect_report());
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind, ActionKind::AspectRatio);
        assert_eq!(actions[0].priority, 1);
        assert_eq!(actions[0].current.as_deref(), Some("16:9 (wide)"));
        assert_eq!(actions[0].target.as_deref(), Some("4:3 (standard)"));
    }

    #[test]
    fn test_passing_gates_produce_no_actions() {
        let report = GateReport {
            aspect_ratio: Some(ScoredGate {
                score: 100.0,
                passed: true,
                feedback: None,
            }),
            pose: Some(Vec::new()),
            ..GateReport::default()
        };
        assert!(collect_actions(&report).is_empty());
    }

    #[test]
    fn test_pose_notes_trail_with_sequential_priorities() {
        let mut report = failing_aspect_report();
        report.pose = Some(vec![PoseNote {
            category: PoseCategory::Posture,
            importance: NoteImportance::Optional,
            suggestion: "level the shoulders".to_string(),
        }]);
        let actions = collect_actions(&report);
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1].kind, ActionKind::Pose);
        assert_eq!(actions[1].priority, 2);
    }

    #[test]
    fn test_gate_summary_marks_pass_and_fail() {
        let report = GateReport {
            aspect_ratio: Some(ScoredGate {
                score: 100.0,
                passed: true,
                feedback: None,
            }),
            composition: Some(ScoredGate {
                score: 64.0,
                passed: false,
                feedback: None,
            }),
            ..GateReport::default()
        };
        let summary = gate_summary(&report);
        assert!(summary.contains("[OK] aspect ratio: 100"));
        assert!(summary.contains("[!] composition: 64"));
    }

    #[test]
    fn test_friendly_summary_top_band() {
        let summary = friendly_summary(96.0, &GateReport::default(), &[]);
        assert!(summary.contains("nearly identical"));
    }

    #[test]
    fn test_friendly_summary_names_the_fix() {
        let report = failing_aspect_report();
        let actions = collect_actions(&report);
        let summary = friendly_summary(86.0, &report, &actions);
        assert!(summary.contains("switch the aspect ratio"));
    }

    #[test]
    fn test_friendly_summary_low_band_leads_with_action() {
        let report = failing_aspect_report();
        let actions = collect_actions(&report);
        let summary = friendly_summary(50.0, &report, &actions);
        assert!(summary.starts_with("substantially different"));
        assert!(summary.contains("switch the aspect ratio"));
    }

    #[test]
    fn test_pose_only_actions_do_not_lead_summary() {
        let report = GateReport {
            pose: Some(vec![PoseNote {
                category: PoseCategory::Posture,
                importance: NoteImportance::Optional,
                suggestion: "level the shoulders".to_string(),
            }]),
            ..GateReport::default()
        };
        let actions = collect_actions(&report);
        let summary = friendly_summary(88.0, &report, &actions);
        assert!(!summary.contains("level the shoulders"));
    }
}
