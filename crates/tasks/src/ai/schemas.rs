//! Structured shapes exchanged with AI providers and written to disk.

use serde::{Deserialize, Serialize};

use crate::entities::{Subtask, SubtaskDependency, TaskStatus};

/// Complexity report file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexityReport {
    #[serde(default)]
    pub meta: ReportMeta,

    #[serde(default, rename = "complexityAnalysis")]
    pub complexity_analysis: Vec<TaskComplexityAnalysis>,
}

impl ComplexityReport {
    /// Analysis entry for a task, if present
    pub fn analysis_for(&self, task_id: u32) -> Option<&TaskComplexityAnalysis> {
        self.complexity_analysis
            .iter()
            .find(|a| a.task_id == task_id)
    }

    /// Threshold recorded in the report, or the default of 5
    pub fn threshold(&self) -> f64 {
        self.meta.threshold_score.unwrap_or(DEFAULT_THRESHOLD)
    }

    /// Entries scoring at or above the threshold, in report order
    pub fn high_complexity(&self) -> impl Iterator<Item = &TaskComplexityAnalysis> {
        let threshold = self.threshold();
        self.complexity_analysis
            .iter()
            .filter(move |a| a.complexity_score.is_some_and(|s| s >= threshold))
    }
}

/// Score at or above which a task should be broken down
pub const DEFAULT_THRESHOLD: f64 = 5.0;

/// Report metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    /// RFC 3339 generation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_analyzed: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_research: Option<bool>,
}

/// Complexity analysis for a single task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskComplexityAnalysis {
    pub task_id: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,

    /// Score from 1 (trivial) to 10 (very complex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_subtasks: Option<u32>,

    /// Prompt to feed back into `expand`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansion_prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// AI output for complexity analysis.
///
/// Models answer with either a wrapped object or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnalyzeComplexityResponse {
    Wrapped {
        #[serde(rename = "complexityAnalysis")]
        complexity_analysis: Vec<TaskComplexityAnalysis>,
    },
    Bare(Vec<TaskComplexityAnalysis>),
}

impl AnalyzeComplexityResponse {
    pub fn into_entries(self) -> Vec<TaskComplexityAnalysis> {
        match self {
            Self::Wrapped {
                complexity_analysis,
            } => complexity_analysis,
            Self::Bare(entries) => entries,
        }
    }
}

/// AI output for task expansion
#[derive(Debug, Clone, Deserialize)]
pub struct ExpandTaskResponse {
    pub subtasks: Vec<GeneratedSubtask>,
}

/// A subtask as produced by the model, before ids are assigned
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSubtask {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub dependencies: Vec<SubtaskDependency>,

    #[serde(default)]
    pub details: String,

    #[serde(default, rename = "testStrategy")]
    pub test_strategy: String,
}

impl GeneratedSubtask {
    /// Convert into a pending subtask with the given id
    pub fn into_subtask(self, id: u32) -> Subtask {
        Subtask {
            id,
            title: self.title,
            description: self.description,
            status: TaskStatus::Pending,
            dependencies: self.dependencies,
            details: self.details,
            test_strategy: self.test_strategy,
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_report_parses() {
        let report: ComplexityReport =
            serde_json::from_str(r#"{"meta": {}, "complexityAnalysis": [{"taskId": 1}]}"#)
                .unwrap();
        assert_eq!(report.complexity_analysis.len(), 1);
        assert!(report.analysis_for(1).is_some());
        assert!(report.analysis_for(2).is_none());
        assert!((report.threshold() - DEFAULT_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn test_analysis_field_names() {
        let entry = TaskComplexityAnalysis {
            task_id: 1,
            task_title: Some("Setup".to_string()),
            complexity_score: Some(8.0),
            recommended_subtasks: Some(6),
            expansion_prompt: Some("Split it".to_string()),
            reasoning: Some("Many parts".to_string()),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["taskId"], 1);
        assert_eq!(value["recommendedSubtasks"], 6);
        assert_eq!(value["expansionPrompt"], "Split it");
    }

    #[test]
    fn test_both_response_shapes() {
        let wrapped: AnalyzeComplexityResponse =
            serde_json::from_str(r#"{"complexityAnalysis": [{"taskId": 1, "complexityScore": 3}]}"#)
                .unwrap();
        assert_eq!(wrapped.into_entries().len(), 1);

        let bare: AnalyzeComplexityResponse =
            serde_json::from_str(r#"[{"taskId": 1}, {"taskId": 2}]"#).unwrap();
        assert_eq!(bare.into_entries().len(), 2);
    }

    #[test]
    fn test_high_complexity_filter() {
        let report = ComplexityReport {
            meta: ReportMeta {
                threshold_score: Some(7.0),
                ..ReportMeta::default()
            },
            complexity_analysis: vec![
                serde_json::from_str(r#"{"taskId": 1, "complexityScore": 9}"#).unwrap(),
                serde_json::from_str(r#"{"taskId": 2, "complexityScore": 4}"#).unwrap(),
                serde_json::from_str(r#"{"taskId": 3}"#).unwrap(),
            ],
        };
        let ids: Vec<u32> = report.high_complexity().map(|a| a.task_id).collect();
        assert_eq!(ids, vec![1]);
    }
}
